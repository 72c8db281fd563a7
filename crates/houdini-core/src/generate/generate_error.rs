use crate::artifact::EmitError;
use crate::collect::CollectError;
use crate::error_kind::ErrorKind;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
impl GenerateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::Collect(err) => err.kind(),
            GenerateError::Emit(err) => err.kind(),
            GenerateError::Store(_) => ErrorKind::StoreError,
        }
    }

    fn is_cancelled(&self) -> bool {
        match self {
            GenerateError::Collect(CollectError::Store(err))
            | GenerateError::Emit(EmitError::Store(err))
            | GenerateError::Store(err) => err.is_cancelled(),
            _ => false,
        }
    }

    pub(crate) fn only_cancellations(errors: &[GenerateError]) -> bool {
        !errors.is_empty() && errors.iter().all(GenerateError::is_cancelled)
    }
}
