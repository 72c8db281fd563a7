use crate::error_kind::ErrorKind;
use crate::generate::GenerateError;
use std::fmt;

/// Every failure of one generate run, in the order the stages reported
/// them.
#[derive(Debug)]
pub struct GenerateErrors(pub Vec<GenerateError>);
impl GenerateErrors {
    pub fn errors(&self) -> &[GenerateError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.0.iter().map(GenerateError::kind).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
impl fmt::Display for GenerateErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s) while generating artifacts", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n  [{}] {err}", err.kind().as_str())?;
        }
        Ok(())
    }
}
impl std::error::Error for GenerateErrors {}
impl<E: Into<GenerateError>> From<Vec<E>> for GenerateErrors {
    fn from(errors: Vec<E>) -> Self {
        GenerateErrors(errors.into_iter().map(Into::into).collect())
    }
}
