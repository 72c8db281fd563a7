use crate::error_kind::ErrorKind;
use crate::merge::MergeError;
use crate::store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to encode the artifact for '{document}': {source}")]
    Encoding {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write artifact {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("cannot emit an artifact for '{name}': the document was not collected")]
    MissingArtifactInput { name: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
impl EmitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EmitError::Encoding { .. } => ErrorKind::EncodingError,
            EmitError::Filesystem { .. } => ErrorKind::FsError,
            EmitError::Merge(err) => err.kind(),
            EmitError::MissingArtifactInput { .. } => ErrorKind::MissingArtifactInput,
            EmitError::Store(_) => ErrorKind::StoreError,
        }
    }
}
impl From<rusqlite::Error> for EmitError {
    fn from(err: rusqlite::Error) -> Self {
        EmitError::Store(StoreError::Sqlite(err))
    }
}
