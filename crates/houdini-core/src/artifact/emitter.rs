use crate::artifact::Artifact;
use crate::artifact::ArtifactBuilder;
use crate::artifact::EmitError;
use crate::config::ProjectConfig;
use crate::fs::Filesystem;
use crate::merge::Merger;
use crate::print::Printer;
use crate::store::Context;
use crate::store::PooledConnection;
use crate::store::Store;
use crate::worker_pool::default_workers;
use crate::worker_pool::WorkerPool;

const UPDATE_PRINTED: &str = "UPDATE documents SET printed = ?1, hash = ?2 WHERE name = ?3";

type Result<T> = std::result::Result<T, Vec<EmitError>>;

/// Prints, hashes and writes the artifact of every requested document.
#[derive(Clone, Copy)]
pub struct Emitter<'a> {
    config: &'a ProjectConfig,
    filesystem: &'a dyn Filesystem,
    store: &'a Store,
    workers: usize,
}
impl<'a> Emitter<'a> {
    pub fn new(
        store: &'a Store,
        filesystem: &'a dyn Filesystem,
        config: &'a ProjectConfig,
    ) -> Self {
        Self {
            config,
            filesystem,
            store,
            workers: default_workers(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Emits one artifact per name, in the order given.
    ///
    /// A failing document does not stop the others; every failure is
    /// returned once all workers are done. After cancellation the artifacts
    /// written so far are returned.
    pub fn emit(
        &self,
        ctx: &Context,
        merger: &Merger<'_>,
        names: &[String],
    ) -> Result<Vec<Artifact>> {
        if names.is_empty() {
            return Ok(vec![]);
        }
        tracing::debug!(
            "emitting {} artifacts to {}",
            names.len(),
            self.config.artifact_directory().display(),
        );
        let artifacts = WorkerPool::new(self.workers).run(
            ctx,
            names,
            || self.store.take(ctx).map_err(EmitError::from),
            |conn, name| {
                self.emit_document(ctx, conn, merger, name)
                    .map_err(|err| vec![err])
            },
        )?;
        tracing::debug!("emitted {} artifacts", artifacts.len());
        Ok(artifacts)
    }

    fn emit_document(
        &self,
        ctx: &Context,
        conn: &PooledConnection<'_>,
        merger: &Merger<'_>,
        name: &str,
    ) -> std::result::Result<Artifact, EmitError> {
        if !merger.contains(name) {
            return Err(EmitError::MissingArtifactInput {
                name: name.to_string(),
            });
        }
        let set = merger.merge_with_fragments(name)?;
        let artifact = ArtifactBuilder::new(self.config, merger).build(&set);
        let printed = Printer::new(merger.schema()).print(set.document().document());

        let contents = artifact.render().map_err(|source| EmitError::Encoding {
            document: name.to_string(),
            source,
        })?;
        let tx = conn.unchecked_transaction()?;
        let mut stmt = tx.prepare_cached(UPDATE_PRINTED)?;
        conn.exec_statement(
            ctx,
            &mut stmt,
            rusqlite::params![printed, artifact.hash(), name],
        )?;
        drop(stmt);

        let directory = self.config.artifact_directory();
        self.filesystem
            .mkdir_all(&directory)
            .map_err(|source| EmitError::Filesystem {
                path: directory.clone(),
                source,
            })?;
        let path = self.config.artifact_path(name);
        self.filesystem
            .write_atomic(&path, contents.as_bytes())
            .map_err(|source| EmitError::Filesystem {
                path: path.clone(),
                source,
            })?;
        tx.commit()?;
        tracing::trace!("wrote {} ({})", path.display(), artifact.hash());
        Ok(artifact)
    }
}
