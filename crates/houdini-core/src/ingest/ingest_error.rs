use crate::store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("operation defined in {file} has no name")]
    AnonymousOperation { file: PathBuf },

    #[error("document '{name}' is defined more than once")]
    DuplicateDocument { name: String },

    #[error("failed to parse {file}: {err}")]
    ParseError { file: PathBuf, err: String },

    #[error("type `{type_name}` referenced by `{referenced_by}` is not defined in the schema")]
    UnknownType {
        referenced_by: String,
        type_name: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
impl From<rusqlite::Error> for IngestError {
    fn from(err: rusqlite::Error) -> Self {
        IngestError::Store(StoreError::Sqlite(err))
    }
}
