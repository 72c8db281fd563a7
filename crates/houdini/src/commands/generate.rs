use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context as _;
use houdini_core::config::ProjectConfig;
use houdini_core::fs::OsFilesystem;
use houdini_core::ingest::DocumentIngest;
use houdini_core::ingest::SchemaIngest;
use houdini_core::schema::SchemaIndex;
use houdini_core::Context;
use houdini_core::GenerateSummary;
use houdini_core::Generator;
use houdini_core::Store;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct GenerateCmd {
    #[arg(
        help="Path to a JSON project config. Settings it leaves out keep \
             their defaults.",
        long,
    )]
    config: Option<PathBuf>,

    #[arg(
        help="Where to build the store. Any existing file at this path is \
             replaced. Defaults to a temporary file.",
        long,
    )]
    database: Option<PathBuf>,

    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for document \
             files within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Cache keys for a type, as `Type=field1,field2`. May be repeated.",
        long="keys",
        value_name="TYPE=FIELDS",
    )]
    keys: Vec<String>,

    #[arg(
        help="Overrides `projectRoot` from the project config.",
        long,
    )]
    project_root: Option<PathBuf>,

    #[arg(
        help="Overrides `runtimeDir` from the project config.",
        long,
    )]
    runtime_dir: Option<String>,

    #[arg(
        help="Paths to one or more schema files or directories containing \
             `.graphql`/`.graphqls` schema files.",
        long,
        required=true,
    )]
    schema: Vec<PathBuf>,

    #[arg(
        help="Tag the ingested documents with this task and only emit \
             artifacts for them.",
        long,
    )]
    task: Option<String>,

    #[arg(
        help="Number of workers for each pipeline stage. Defaults to the \
             number of available CPUs.",
        long,
    )]
    workers: Option<usize>,

    #[arg(
        help="Paths to one or more GraphQL document files or directories \
             containing them.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}
impl GenerateCmd {
    fn generate(&self, ctx: &Context) -> anyhow::Result<GenerateReport> {
        let config = self.project_config()?;
        let workers = self.workers.unwrap_or_else(houdini_core::default_workers).max(1);

        let schema_files = find_graphql_files(
            &self.schema,
            &normalize_exts(["graphql", "graphqls"]),
        )?;
        let document_files = find_graphql_files(
            &self.file_or_dir_paths,
            &normalize_exts(&self.graphql_file_exts),
        )?;
        log::debug!(
            "Found {} schema files and {} document files.",
            schema_files.len(),
            document_files.len(),
        );

        let tempdir = tempfile::tempdir()
            .context("Failed to create a directory for the store")?;
        let database = match &self.database {
            Some(path) => {
                if path.exists() {
                    log::debug!("Replacing existing store at {path:#?}.");
                    std::fs::remove_file(path)
                        .with_context(|| format!("Failed to remove {path:#?}"))?;
                }
                path.clone()
            },
            None => tempdir.path().join("houdini.db"),
        };
        let store = Store::open(&database, workers)?;
        store.bootstrap(ctx)?;

        {
            let conn = store.take(ctx)?;
            config.save(&conn)?;

            let mut schema_ingest = SchemaIngest::new(&config);
            for (type_name, keys) in self.type_keys()? {
                schema_ingest = schema_ingest.with_keys(type_name, keys);
            }
            for path in &schema_files {
                schema_ingest = schema_ingest.load_str(Some(path.clone()), &read(path)?)?;
            }
            let types = schema_ingest.write(ctx, &conn)?;

            let schema = SchemaIndex::load(&conn, &config)?;
            let mut document_ingest = DocumentIngest::new(&schema);
            if let Some(task) = &self.task {
                document_ingest = document_ingest.with_task(task.as_str());
            }
            for path in &document_files {
                document_ingest = document_ingest.load_str(Some(path.clone()), &read(path)?)?;
            }
            let documents = document_ingest.write(ctx, &conn)?;
            log::info!("Ingested {types} schema types and {documents} documents.");
        }

        let summary = Generator::new(&store, &OsFilesystem)
            .with_workers(workers)
            .run(ctx, self.task.as_deref())?;
        Ok(GenerateReport {
            artifact_directory: config.artifact_directory(),
            num_document_files: document_files.len(),
            num_schema_files: schema_files.len(),
            summary,
        })
    }

    fn project_config(&self) -> anyhow::Result<ProjectConfig> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str::<ProjectConfig>(&read(path)?)
                .with_context(|| format!("Invalid project config in {path:#?}"))?,
            None => ProjectConfig::default(),
        };
        if let Some(project_root) = &self.project_root {
            config.project_root = project_root.clone();
        }
        if let Some(runtime_dir) = &self.runtime_dir {
            config.runtime_dir = runtime_dir.clone();
        }
        Ok(config)
    }

    fn type_keys(&self) -> anyhow::Result<Vec<(String, Vec<String>)>> {
        self.keys
            .iter()
            .map(|arg| {
                let Some((type_name, fields)) = arg.split_once('=') else {
                    anyhow::bail!("Expected `--keys Type=field1,field2`, got `{arg}`");
                };
                let fields: Vec<String> = fields
                    .split(',')
                    .map(str::trim)
                    .filter(|field| !field.is_empty())
                    .map(str::to_string)
                    .collect();
                if fields.is_empty() {
                    anyhow::bail!("`--keys {arg}` names no fields");
                }
                Ok((type_name.trim().to_string(), fields))
            })
            .collect()
    }
}

#[inherent::inherent]
impl RunnableCommand for GenerateCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let ctx = Context::new();
        let interrupt_ctx = ctx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupted; waiting for in-flight documents to finish...");
                interrupt_ctx.cancel();
            }
        });

        let report = tokio::task::spawn_blocking(move || self.generate(&ctx)).await;
        match report {
            Ok(Ok(report)) if report.summary.cancelled() => CommandResult::stderr(format_args!(
                "{} Generation cancelled after writing {} artifacts.",
                output_utils::RED_X,
                report.summary.written(),
            )),

            Ok(Ok(report)) => CommandResult::stdout(format_args!(
                concat!(
                    "{} Generated artifacts successfully:\n",
                    "  * Ingested {} schema files.\n",
                    "  * Ingested {} document files.\n",
                    "  * Collected {} documents.\n",
                    "  * Wrote {} artifacts to {}.",
                ),
                output_utils::GREEN_CHECK,
                report.num_schema_files,
                report.num_document_files,
                report.summary.collected(),
                report.summary.written(),
                report.artifact_directory.display(),
            )),

            Ok(Err(err)) => CommandResult::stderr(format_args!(
                "{} {err:#}",
                output_utils::RED_X,
            )),

            Err(err) => CommandResult::stderr(format_args!(
                "{} Generation stopped unexpectedly: {err}",
                output_utils::RED_X,
            )),
        }
    }
}

#[derive(Debug)]
struct GenerateReport {
    artifact_directory: PathBuf,
    num_document_files: usize,
    num_schema_files: usize,
    summary: GenerateSummary,
}

fn normalize_exts<S: AsRef<str>>(exts: impl IntoIterator<Item = S>) -> HashSet<String> {
    exts.into_iter()
        .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
        .collect()
}

/// Every file at or under `paths` whose extension is in `exts`, sorted so
/// ingestion order does not depend on directory iteration order. A path
/// named explicitly is always included, whatever its extension.
fn find_graphql_files(
    paths: &[PathBuf],
    exts: &HashSet<String>,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut file_paths = vec![];
    for path in paths {
        if path.is_file() {
            file_paths.push(canonicalize(path)?);
            continue;
        }
        for entry in WalkDir::new(path.as_path()).follow_links(true) {
            let entry = entry.with_context(|| {
                format!("Failed to scan files at/under {path:#?}")
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                log::trace!("Skipping non-file: {path:#?}.");
                continue;
            }
            if let Some(ext) = path.extension().map(|s| s.to_string_lossy())
                && exts.contains(&*ext) {
                log::trace!("Found GraphQL file at {path:#?}.");
                file_paths.push(canonicalize(path)?);
            }
        }
    }
    file_paths.sort();
    file_paths.dedup();
    Ok(file_paths)
}

fn canonicalize(path: &Path) -> anyhow::Result<PathBuf> {
    std::fs::canonicalize(path).with_context(|| format!("Failed to resolve {path:#?}"))
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {path:#?}"))
}
