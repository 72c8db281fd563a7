use crate::artifact::Emitter;
use crate::collect::Collector;
use crate::config::ProjectConfig;
use crate::fs::Filesystem;
use crate::generate::GenerateError;
use crate::generate::GenerateErrors;
use crate::generate::GenerateSummary;
use crate::merge::MergeOptions;
use crate::merge::Merger;
use crate::schema::SchemaIndex;
use crate::store::Context;
use crate::store::Store;
use crate::worker_pool::default_workers;

type Result<T> = std::result::Result<T, GenerateErrors>;

/// Runs collect, merge and emit over the documents of one task.
#[derive(Clone, Copy)]
pub struct Generator<'a> {
    filesystem: &'a dyn Filesystem,
    store: &'a Store,
    workers: usize,
}
impl<'a> Generator<'a> {
    pub fn new(store: &'a Store, filesystem: &'a dyn Filesystem) -> Self {
        Self {
            filesystem,
            store,
            workers: default_workers(),
        }
    }

    /// Pool size for every stage. Clamped to at least one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Generates an artifact for every document of `task` (every document
    /// when `None`).
    ///
    /// Cancelling `ctx` is not an error: the summary comes back with
    /// [`GenerateSummary::cancelled`] set and lists what was written before
    /// the workers stopped.
    pub fn run(&self, ctx: &Context, task: Option<&str>) -> Result<GenerateSummary> {
        let cancelled = || GenerateSummary {
            cancelled: true,
            ..Default::default()
        };

        let (config, schema) = match self.load_schema(ctx) {
            Ok(loaded) => loaded,
            Err(_) if ctx.is_cancelled() => return Ok(cancelled()),
            Err(err) => return Err(GenerateErrors(vec![err])),
        };

        let collected = match Collector::new(self.store)
            .with_workers(self.workers)
            .collect(ctx, task)
        {
            Ok(collected) => collected,
            Err(_) if ctx.is_cancelled() => return Ok(cancelled()),
            Err(errors) => return Err(errors.into()),
        };
        if ctx.is_cancelled() {
            return Ok(cancelled());
        }
        tracing::debug!(
            "collected {} documents, {} in task {task:?}",
            collected.len(),
            collected.task_documents().len(),
        );

        let merger = Merger::new(
            &schema,
            collected.documents(),
            MergeOptions::from_config(&config),
        );
        let emitted = Emitter::new(self.store, self.filesystem, &config)
            .with_workers(self.workers)
            .emit(ctx, &merger, collected.task_documents());
        let artifacts = match emitted {
            Ok(artifacts) => artifacts,
            Err(errors) => {
                let errors: Vec<GenerateError> = errors.into_iter().map(Into::into).collect();
                if ctx.is_cancelled() || GenerateError::only_cancellations(&errors) {
                    return Ok(cancelled());
                }
                return Err(GenerateErrors(errors));
            },
        };

        Ok(GenerateSummary {
            artifacts,
            cancelled: ctx.is_cancelled(),
            collected: collected.len(),
        })
    }

    fn load_schema(
        &self,
        ctx: &Context,
    ) -> std::result::Result<(ProjectConfig, SchemaIndex), GenerateError> {
        let conn = self.store.take(ctx)?;
        let config = ProjectConfig::load(&conn)?;
        let schema = SchemaIndex::load(&conn, &config)?;
        Ok((config, schema))
    }
}
