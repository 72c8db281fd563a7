use crate::document::wrap_type;
use crate::document::Directive;
use crate::document::Value;

/// A variable declared by an operation, or an argument declared by a
/// fragment through `@arguments`.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationVariable {
    pub(crate) default_value: Option<Value>,
    pub(crate) default_value_id: Option<i64>,
    pub(crate) directives: Vec<Directive>,
    pub(crate) name: String,
    pub(crate) type_modifiers: String,
    pub(crate) type_name: String,
}
impl OperationVariable {
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        type_modifiers: impl Into<String>,
        default_value: Option<Value>,
    ) -> Self {
        Self {
            default_value,
            default_value_id: None,
            directives: vec![],
            name: name.into(),
            type_modifiers: type_modifiers.into(),
            type_name: type_name.into(),
        }
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn directives(&self) -> &[Directive] {
        self.directives.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Trailing `!` and `]` characters, innermost first.
    pub fn type_modifiers(&self) -> &str {
        self.type_modifiers.as_str()
    }

    /// The innermost named type.
    pub fn type_name(&self) -> &str {
        self.type_name.as_str()
    }

    /// The full type annotation, e.g. `[String!]!`.
    pub fn type_string(&self) -> String {
        wrap_type(&self.type_name, &self.type_modifiers)
    }
}
