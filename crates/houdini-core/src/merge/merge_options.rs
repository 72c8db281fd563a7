use crate::config::ProjectConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeOptions {
    /// Whether fields reached only through a fragment spread are hidden
    /// from the spreading selection unless the spread says otherwise.
    pub default_fragment_masking: bool,
    /// Sort every merged selection set by response key.
    pub sort_keys: bool,
}
impl MergeOptions {
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self {
            default_fragment_masking: config.default_fragment_masking,
            sort_keys: true,
        }
    }
}
impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            default_fragment_masking: true,
            sort_keys: true,
        }
    }
}
