//! Shared fixtures for the pipeline tests: a fixed schema and a throwaway
//! project backed by a store in a temporary directory.

use crate::collect::CollectedDocuments;
use crate::collect::Collector;
use crate::config::ProjectConfig;
use crate::fs::MemoryFilesystem;
use crate::generate::GenerateErrors;
use crate::generate::GenerateSummary;
use crate::generate::Generator;
use crate::ingest::DocumentIngest;
use crate::ingest::SchemaIngest;
use crate::schema::SchemaIndex;
use crate::store::Context;
use crate::store::Store;
use tempfile::TempDir;

pub(crate) const SCHEMA: &str = r#"
    type Query {
        version: Int!
        user(id: ID, name: String): User
        users(stringValue: String, boolValue: Boolean, limit: Int = 10): [User!]!
        node(id: ID!): Node
        entities: [Entity!]!
        viewer: User
        usersByCursor(first: Int, after: String, last: Int, before: String): UserConnection!
        usersByForwardCursor(first: Int, after: String): UserConnection!
        usersByOffset(limit: Int, offset: Int): [User!]!
        search(filter: UserFilter, sort: Sort = ASC): [User!]!
    }

    type Mutation {
        addFriend(id: ID!): User
        deleteUser(id: ID!): DeleteUserOutput
    }

    type Subscription {
        newUser: User
    }

    type DeleteUserOutput {
        userID: ID
    }

    interface Node {
        id: ID!
    }

    interface Pet {
        name: String
    }

    union Entity = User | Cat | Dog

    type User implements Node {
        id: ID!
        name: String
        firstName: String
        pets: [Pet!]!
        bestFriend: User
        friendsByCursor(
            first: Int
            after: String
            last: Int
            before: String
            filter: String
        ): UserConnection!
        friendsByOffset(limit: Int, offset: Int): [User!]!
    }

    type Cat implements Node & Pet {
        id: ID!
        name: String
        meows: Boolean
    }

    type Dog implements Node & Pet {
        id: ID!
        name: String
        barks: Boolean
    }

    type UserConnection {
        edges: [UserEdge!]!
        pageInfo: PageInfo!
    }

    type UserEdge {
        cursor: String
        node: User
    }

    type PageInfo {
        hasNextPage: Boolean!
        hasPreviousPage: Boolean!
        startCursor: String
        endCursor: String
    }

    input UserFilter {
        name: String
        nested: NestedFilter
    }

    input NestedFilter {
        age: Int
    }

    enum Sort {
        ASC
        DESC
    }
"#;

/// A bootstrapped store holding [`SCHEMA`] and whatever documents a test
/// ingests. The store file lives as long as the project.
pub(crate) struct TestProject {
    _dir: TempDir,
    pub(crate) config: ProjectConfig,
    pub(crate) store: Store,
}
impl TestProject {
    pub(crate) fn new() -> Self {
        Self::with_config(ProjectConfig::default())
    }

    pub(crate) fn with_config(config: ProjectConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("houdini.db"), 4).unwrap();
        let ctx = Context::new();
        store.bootstrap(&ctx).unwrap();
        {
            let conn = store.take(&ctx).unwrap();
            config.save(&conn).unwrap();
            SchemaIngest::new(&config)
                .load_str(None, SCHEMA)
                .unwrap()
                .write(&ctx, &conn)
                .unwrap();
        }
        Self {
            _dir: dir,
            config,
            store,
        }
    }

    /// A project with `documents` ingested outside of any task.
    pub(crate) fn with_documents(documents: &str) -> Self {
        let project = Self::new();
        project.ingest(None, documents);
        project
    }

    pub(crate) fn ingest(&self, task: Option<&str>, documents: &str) {
        let ctx = Context::new();
        let schema = self.schema();
        let conn = self.store.take(&ctx).unwrap();
        let mut ingest = DocumentIngest::new(&schema);
        if let Some(task) = task {
            ingest = ingest.with_task(task);
        }
        ingest
            .load_str(None, documents)
            .unwrap()
            .write(&ctx, &conn)
            .unwrap();
    }

    pub(crate) fn schema(&self) -> SchemaIndex {
        let conn = self.store.take(&Context::new()).unwrap();
        SchemaIndex::load(&conn, &self.config).unwrap()
    }

    pub(crate) fn collect(&self) -> CollectedDocuments {
        Collector::new(&self.store)
            .with_workers(2)
            .collect(&Context::new(), None)
            .unwrap()
    }

    pub(crate) fn try_generate(
        &self,
        workers: usize,
    ) -> (MemoryFilesystem, Result<GenerateSummary, GenerateErrors>) {
        let filesystem = MemoryFilesystem::new();
        let result = Generator::new(&self.store, &filesystem)
            .with_workers(workers)
            .run(&Context::new(), None);
        (filesystem, result)
    }

    pub(crate) fn generate(&self) -> (MemoryFilesystem, GenerateSummary) {
        let (filesystem, result) = self.try_generate(2);
        (filesystem, result.unwrap())
    }

    /// The written artifact module for `name`.
    pub(crate) fn artifact_file(&self, filesystem: &MemoryFilesystem, name: &str) -> String {
        filesystem
            .contents_string(self.config.artifact_path(name))
            .unwrap_or_else(|| panic!("no artifact written for `{name}`"))
    }

    /// The object literal of the written artifact for `name`, parsed back
    /// into JSON.
    pub(crate) fn artifact_json(
        &self,
        filesystem: &MemoryFilesystem,
        name: &str,
    ) -> serde_json::Value {
        parse_artifact_module(&self.artifact_file(filesystem, name))
    }
}

/// Strips the `export default` prefix and the hash marker off a rendered
/// artifact module.
pub(crate) fn parse_artifact_module(module: &str) -> serde_json::Value {
    let body = module
        .strip_prefix("export default ")
        .expect("artifact module starts with `export default`");
    let end = body
        .rfind(";\n\n\"HoudiniHash=")
        .expect("artifact module ends with a hash marker");
    serde_json::from_str(&body[..end]).unwrap()
}
