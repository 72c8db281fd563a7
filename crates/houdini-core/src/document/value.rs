use std::collections::BTreeSet;
use std::collections::HashMap;
use std::fmt;

/// The kind tag stored alongside every row of `argument_values`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueKind {
    Block,
    Boolean,
    Enum,
    Float,
    Int,
    List,
    Null,
    Object,
    String,
    Variable,
}
impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Block => "Block",
            ValueKind::Boolean => "Boolean",
            ValueKind::Enum => "Enum",
            ValueKind::Float => "Float",
            ValueKind::Int => "Int",
            ValueKind::List => "List",
            ValueKind::Null => "Null",
            ValueKind::Object => "Object",
            ValueKind::String => "String",
            ValueKind::Variable => "Variable",
        }
    }

    pub fn parse(kind: &str) -> Option<Self> {
        Some(match kind {
            "Block" => ValueKind::Block,
            "Boolean" => ValueKind::Boolean,
            "Enum" => ValueKind::Enum,
            "Float" => ValueKind::Float,
            "Int" => ValueKind::Int,
            "List" => ValueKind::List,
            "Null" => ValueKind::Null,
            "Object" => ValueKind::Object,
            "String" => ValueKind::String,
            "Variable" => ValueKind::Variable,
            _ => return None,
        })
    }
}

/// A GraphQL input value as reconstructed from the store.
///
/// Scalars keep their raw source text (`Int("10")`, `Float("1.5")`) so that
/// printing never re-formats a literal. Object fields keep their source
/// order; [`Value::canonical`] sorts them when order must not matter.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Block(String),
    Boolean(bool),
    Enum(String),
    Float(String),
    Int(String),
    List(Vec<Value>),
    Null,
    Object(Vec<(String, Value)>),
    String(String),
    Variable(String),
}
impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Block(_) => ValueKind::Block,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Enum(_) => ValueKind::Enum,
            Value::Float(_) => ValueKind::Float,
            Value::Int(_) => ValueKind::Int,
            Value::List(_) => ValueKind::List,
            Value::Null => ValueKind::Null,
            Value::Object(_) => ValueKind::Object,
            Value::String(_) => ValueKind::String,
            Value::Variable(_) => ValueKind::Variable,
        }
    }

    /// Builds a leaf value from a `(kind, raw)` pair. Returns `None` for the
    /// container kinds, which need their children.
    pub fn scalar(kind: ValueKind, raw: &str) -> Option<Self> {
        Some(match kind {
            ValueKind::Block => Value::Block(raw.to_string()),
            ValueKind::Boolean => Value::Boolean(raw == "true"),
            ValueKind::Enum => Value::Enum(raw.to_string()),
            ValueKind::Float => Value::Float(raw.to_string()),
            ValueKind::Int => Value::Int(raw.to_string()),
            ValueKind::Null => Value::Null,
            ValueKind::String => Value::String(raw.to_string()),
            ValueKind::Variable => Value::Variable(raw.to_string()),
            ValueKind::List | ValueKind::Object => return None,
        })
    }

    /// The text stored in `argument_values.raw` for this value.
    pub fn raw(&self) -> String {
        match self {
            Value::Block(s)
            | Value::Enum(s)
            | Value::Float(s)
            | Value::Int(s)
            | Value::String(s)
            | Value::Variable(s) => s.clone(),
            Value::Boolean(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::List(_) | Value::Object(_) => String::new(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(raw) => raw.parse().ok(),
            _ => None,
        }
    }

    /// String-ish payload: strings, block strings and enum names.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Block(s) | Value::Enum(s) | Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Value::Variable(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn object_field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(fields) => fields
                .iter()
                .find(|(field_name, _)| field_name == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// A copy with every object's fields sorted by name, recursively.
    pub fn canonical(&self) -> Value {
        match self {
            Value::List(items) => Value::List(items.iter().map(Value::canonical).collect()),
            Value::Object(fields) => {
                let mut fields: Vec<(String, Value)> = fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.canonical()))
                    .collect();
                fields.sort_by(|(a, _), (b, _)| a.cmp(b));
                Value::Object(fields)
            },
            _ => self.clone(),
        }
    }

    /// Structural equality that ignores object field order.
    pub fn structurally_eq(&self, other: &Value) -> bool {
        self.canonical() == other.canonical()
    }

    /// Adds the name of every variable referenced by this value to `out`.
    pub fn collect_variables(&self, out: &mut BTreeSet<String>) {
        match self {
            Value::Variable(name) => {
                out.insert(name.clone());
            },
            Value::List(items) => {
                for item in items {
                    item.collect_variables(out);
                }
            },
            Value::Object(fields) => {
                for (_, value) in fields {
                    value.collect_variables(out);
                }
            },
            _ => (),
        }
    }

    /// Replaces every variable bound in `bindings` with its bound value.
    /// Unbound variables are left in place.
    pub fn substitute(&self, bindings: &HashMap<String, Value>) -> Value {
        match self {
            Value::Variable(name) => bindings
                .get(name)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Value::List(items) => Value::List(
                items.iter().map(|item| item.substitute(bindings)).collect(),
            ),
            Value::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.substitute(bindings)))
                    .collect(),
            ),
            _ => self.clone(),
        }
    }
}

/// Prints the value as a GraphQL literal.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Block(raw) => write!(f, "\"\"\"{raw}\"\"\""),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Enum(raw) | Value::Float(raw) | Value::Int(raw) => f.write_str(raw),
            Value::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
            Value::Null => f.write_str("null"),
            Value::Object(fields) => {
                f.write_str("{")?;
                for (idx, (name, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            },
            Value::String(s) => write_escaped_string(f, s),
            Value::Variable(name) => write!(f, "${name}"),
        }
    }
}

fn write_escaped_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{c}' => f.write_str("\\f")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04X}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}
