use crate::error_kind::ErrorKind;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to decode the `{column}` column of {owner}: {source}")]
    Encoding {
        column: &'static str,
        owner: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "selection {selection_id} of document {document_id} references parent selection \
         {parent_id}, which was not collected"
    )]
    MissingParentSelection {
        document_id: i64,
        parent_id: i64,
        selection_id: i64,
    },

    #[error("value {value_id} is referenced but was not found in the store")]
    MissingValue { value_id: i64 },

    #[error("object field value {value_id} has no field name")]
    UnnamedObjectField { value_id: i64 },

    #[error("document {document_id} has unknown kind `{kind}`")]
    UnknownDocumentKind { document_id: i64, kind: String },

    #[error("selection {selection_id} has unknown kind `{kind}`")]
    UnknownSelectionKind { selection_id: i64, kind: String },

    #[error("value {value_id} has unknown kind `{kind}`")]
    UnknownValueKind { value_id: i64, kind: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
impl CollectError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CollectError::Encoding { .. } => ErrorKind::EncodingError,
            CollectError::Store(_) => ErrorKind::StoreError,
            CollectError::MissingParentSelection { .. }
            | CollectError::MissingValue { .. }
            | CollectError::UnnamedObjectField { .. }
            | CollectError::UnknownDocumentKind { .. }
            | CollectError::UnknownSelectionKind { .. }
            | CollectError::UnknownValueKind { .. } => ErrorKind::ShapeError,
        }
    }
}
impl From<rusqlite::Error> for CollectError {
    fn from(err: rusqlite::Error) -> Self {
        CollectError::Store(StoreError::Sqlite(err))
    }
}
