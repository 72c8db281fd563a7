use crate::document::wrap_type;
use crate::schema::ArgumentDefinition;
use indexmap::IndexMap;

/// A field of an object, interface or input object type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub(crate) arguments: IndexMap<String, ArgumentDefinition>,
    pub(crate) default_value: Option<String>,
    pub(crate) name: String,
    pub(crate) type_modifiers: String,
    pub(crate) type_name: String,
}
impl FieldDefinition {
    pub(crate) fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        type_modifiers: impl Into<String>,
    ) -> Self {
        Self {
            arguments: IndexMap::new(),
            default_value: None,
            name: name.into(),
            type_modifiers: type_modifiers.into(),
            type_name: type_name.into(),
        }
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.arguments.get(name)
    }

    pub fn arguments(&self) -> &IndexMap<String, ArgumentDefinition> {
        &self.arguments
    }

    /// Input object fields only.
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn is_list(&self) -> bool {
        self.type_modifiers.contains(']')
    }

    /// How many list wrappers surround the named type.
    pub fn list_depth(&self) -> usize {
        self.type_modifiers.matches(']').count()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Whether the outermost type accepts `null`.
    pub fn nullable(&self) -> bool {
        !self.type_modifiers.ends_with('!')
    }

    pub fn type_modifiers(&self) -> &str {
        self.type_modifiers.as_str()
    }

    /// The innermost named type.
    pub fn type_name(&self) -> &str {
        self.type_name.as_str()
    }

    pub fn type_string(&self) -> String {
        wrap_type(&self.type_name, &self.type_modifiers)
    }
}
