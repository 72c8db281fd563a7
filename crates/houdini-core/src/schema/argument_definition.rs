use crate::document::wrap_type;

/// An argument accepted by a schema field.
#[derive(Clone, Debug, PartialEq)]
pub struct ArgumentDefinition {
    pub(crate) default_value: Option<String>,
    pub(crate) name: String,
    pub(crate) type_modifiers: String,
    pub(crate) type_name: String,
}
impl ArgumentDefinition {
    /// The default value as printed GraphQL, if the schema declares one.
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn type_modifiers(&self) -> &str {
        self.type_modifiers.as_str()
    }

    pub fn type_name(&self) -> &str {
        self.type_name.as_str()
    }

    pub fn type_string(&self) -> String {
        wrap_type(&self.type_name, &self.type_modifiers)
    }
}
