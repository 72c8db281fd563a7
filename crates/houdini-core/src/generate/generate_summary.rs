use crate::artifact::Artifact;

/// What a generate run did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerateSummary {
    pub(crate) artifacts: Vec<Artifact>,
    pub(crate) cancelled: bool,
    pub(crate) collected: usize,
}
impl GenerateSummary {
    /// The artifacts written, ordered by document name.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Whether the run stopped early because its context was cancelled.
    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    /// How many documents the collector loaded, fragments included.
    pub fn collected(&self) -> usize {
        self.collected
    }

    pub fn written(&self) -> usize {
        self.artifacts.len()
    }
}
