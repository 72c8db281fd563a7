use crate::collect::batch_builder::BatchBuilder;
use crate::collect::queries;
use crate::collect::value_table::ValueTable;
use crate::collect::CollectError;
use crate::collect::CollectedDocuments;
use crate::document::Document;
use crate::store::Context;
use crate::store::PooledConnection;
use crate::store::Store;
use crate::worker_pool::default_workers;
use crate::worker_pool::WorkerPool;
use std::collections::BTreeMap;

const MAX_BATCH_SIZE: usize = 100;

type Result<T> = std::result::Result<T, Vec<CollectError>>;

/// Rebuilds [`Document`] trees from the store.
#[derive(Clone, Copy, Debug)]
pub struct Collector<'store> {
    store: &'store Store,
    workers: usize,
}
impl<'store> Collector<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self {
            store,
            workers: default_workers(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Collects the documents of `task_id` (every document when `None`)
    /// together with the fragments they reference.
    ///
    /// Documents are split into batches that a pool of workers loads in
    /// parallel, each worker on its own pooled connection. Returns every
    /// error any worker hit, never a partial map.
    pub fn collect(&self, ctx: &Context, task_id: Option<&str>) -> Result<CollectedDocuments> {
        let targets = self.target_documents(ctx, task_id).map_err(|err| vec![err])?;
        if targets.is_empty() {
            tracing::debug!("no documents to collect for task {task_id:?}");
            return Ok(CollectedDocuments::default());
        }

        let ids: Vec<i64> = targets.iter().map(|(id, _, _)| *id).collect();
        let batch_size = (ids.len() / self.workers).clamp(1, MAX_BATCH_SIZE);
        let batches: Vec<&[i64]> = ids.chunks(batch_size).collect();
        tracing::debug!(
            "collecting {} documents in {} batches of up to {batch_size}",
            ids.len(),
            batches.len(),
        );

        let collected = WorkerPool::new(self.workers)
            .stop_worker_on_error()
            .run(
                ctx,
                &batches,
                || self.store.take(ctx).map_err(CollectError::from),
                |conn, batch| collect_batch(ctx, conn, batch).map_err(|err| vec![err]),
            )?;

        let mut documents = BTreeMap::new();
        for document in collected.into_iter().flatten() {
            documents.insert(document.name().to_string(), document);
        }
        let mut task_documents: Vec<String> = targets
            .into_iter()
            .filter(|(_, _, is_task)| *is_task)
            .map(|(_, name, _)| name)
            .filter(|name| documents.contains_key(name))
            .collect();
        task_documents.sort();

        Ok(CollectedDocuments {
            documents,
            task_documents,
        })
    }

    fn target_documents(
        &self,
        ctx: &Context,
        task_id: Option<&str>,
    ) -> std::result::Result<Vec<(i64, String, bool)>, CollectError> {
        let conn = self.store.take(ctx)?;
        let mut targets = vec![];
        conn.step_query(ctx, queries::TARGET_DOCUMENTS, [task_id], |row| {
            targets.push((row.get(0)?, row.get(1)?, row.get(2)?));
            Ok::<(), CollectError>(())
        })?;
        Ok(targets)
    }
}

fn collect_batch(
    ctx: &Context,
    conn: &mut PooledConnection<'_>,
    ids: &[i64],
) -> std::result::Result<Vec<Document>, CollectError> {
    let ids_json = serde_json::to_string(ids).map_err(|source| CollectError::Encoding {
        column: "documents.id",
        owner: "document batch".to_string(),
        source,
    })?;
    let mut batch = BatchBuilder::default();

    conn.step_query(ctx, queries::DOCUMENTS, [&ids_json], |row| {
        batch.add_document_row(row)
    })?;
    conn.step_query(ctx, queries::SELECTION_TREE, [&ids_json], |row| {
        batch.add_selection_row(row)
    })?;
    conn.step_query(ctx, queries::DOCUMENT_VARIABLES, [&ids_json], |row| {
        batch.add_variable_row(row)
    })?;
    conn.step_query(ctx, queries::DOCUMENT_DIRECTIVES, [&ids_json], |row| {
        batch.add_document_directive_row(row)
    })?;

    let values = ValueTable::load(ctx, conn, batch.value_ids())?;
    let documents = batch.finish(&values)?;
    tracing::trace!("collected batch of {} documents", documents.len());
    Ok(documents)
}
