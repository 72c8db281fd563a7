use crate::artifact::js_value::render_module;
use crate::artifact::js_value::JsObject;

/// One rendered artifact, ready to be written.
#[derive(Clone, Debug, PartialEq)]
pub struct Artifact {
    pub(crate) hash: String,
    pub(crate) name: String,
    pub(crate) raw: String,
    pub(crate) record: JsObject,
}
impl Artifact {
    /// Lowercase hex SHA-256 of [`Artifact::raw`].
    pub fn hash(&self) -> &str {
        self.hash.as_str()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The printed document followed by every fragment it reaches.
    pub fn raw(&self) -> &str {
        self.raw.as_str()
    }

    /// The artifact object, as the runtime reads it.
    pub fn record(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.record
    }

    /// The JavaScript module written to disk.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        render_module(&self.record, &self.hash)
    }
}
