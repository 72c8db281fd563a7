/// Stable classification of every failure the pipeline reports.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// An aggregated JSON column could not be decoded.
    EncodingError,
    FsError,
    MergeError,
    /// Emission needed a document the collector did not produce.
    MissingArtifactInput,
    /// A row referenced a selection or value that was never loaded.
    ShapeError,
    StoreError,
}
impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EncodingError => "EncodingError",
            ErrorKind::FsError => "FsError",
            ErrorKind::MergeError => "MergeError",
            ErrorKind::MissingArtifactInput => "MissingArtifactInput",
            ErrorKind::ShapeError => "ShapeError",
            ErrorKind::StoreError => "StoreError",
        }
    }
}
