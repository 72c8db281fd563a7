use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("operation cancelled")]
    Cancelled,

    #[error("invalid project config value for `{setting}`: `{value}`")]
    InvalidConfig {
        setting: &'static str,
        value: String,
    },

    #[error("the store has no project config row")]
    MissingConfig,

    #[error("failed to open store at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("a store connection pool needs at least one connection")]
    EmptyPool,

    #[error("store statement failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
impl StoreError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, StoreError::Cancelled)
    }
}
