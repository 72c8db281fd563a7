use crate::document::Value;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Map;
use serde_json::Number;
use serde_json::Serializer;

pub(crate) type JsObject = Map<String, serde_json::Value>;

/// A GraphQL literal as the runtime reads it. Enums become strings and
/// variables become their name.
pub(crate) fn js_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Int(raw) => raw
            .parse::<i64>()
            .map(|n| serde_json::Value::Number(n.into()))
            .unwrap_or_else(|_| serde_json::Value::String(raw.clone())),
        Value::Float(raw) => raw
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::String(raw.clone())),
        Value::Null => serde_json::Value::Null,
        Value::List(items) => serde_json::Value::Array(items.iter().map(js_value).collect()),
        Value::Object(fields) => serde_json::Value::Object(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), js_value(value)))
                .collect(),
        ),
        Value::Block(s) | Value::Enum(s) | Value::String(s) | Value::Variable(s) => {
            serde_json::Value::String(s.clone())
        },
    }
}

/// `{"kind": <ValueKind>, "value": <literal>}`, the shape used for list
/// filters and fragment arguments.
pub(crate) fn tagged_value(value: &Value) -> serde_json::Value {
    let mut tagged = JsObject::new();
    tagged.insert("kind".to_string(), value.kind().as_str().into());
    tagged.insert("value".to_string(), js_value(value));
    serde_json::Value::Object(tagged)
}

/// Renders the artifact module: the object literal with four-space
/// indentation, then the hash marker line.
pub(crate) fn render_module(
    artifact: &JsObject,
    hash: &str,
) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    artifact.serialize(&mut serializer)?;
    let body = String::from_utf8_lossy(&buf);
    Ok(format!("export default {body};\n\n\"HoudiniHash={hash}\";\n"))
}
