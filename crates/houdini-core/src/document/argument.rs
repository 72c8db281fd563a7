use crate::document::Value;

static NULL_VALUE: Value = Value::Null;

/// A named argument on a field or directive.
///
/// Arguments come out of the store holding only the id of their value tree;
/// the collector resolves every id once all value rows for a batch are
/// loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub(crate) name: String,
    pub(crate) value: Option<Value>,
    pub(crate) value_id: Option<i64>,
}
impl Argument {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            value_id: None,
        }
    }

    pub(crate) fn unresolved(name: impl Into<String>, value_id: Option<i64>) -> Self {
        Self {
            name: name.into(),
            value: None,
            value_id,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The resolved value, or `null` when the argument has no value row.
    pub fn value(&self) -> &Value {
        self.value.as_ref().unwrap_or(&NULL_VALUE)
    }

    pub fn value_id(&self) -> Option<i64> {
        self.value_id
    }

    /// Same name and structurally equal value.
    pub fn same_as(&self, other: &Argument) -> bool {
        self.name == other.name && self.value().structurally_eq(other.value())
    }
}

/// Order-insensitive comparison of two argument lists.
pub(crate) fn arguments_equal(a: &[Argument], b: &[Argument]) -> bool {
    a.len() == b.len()
        && a.iter().all(|arg| b.iter().any(|other| arg.same_as(other)))
}

/// Arguments sorted by name, the order every printed argument block uses.
pub(crate) fn sorted_arguments(arguments: &[Argument]) -> Vec<&Argument> {
    let mut sorted: Vec<&Argument> = arguments.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}
