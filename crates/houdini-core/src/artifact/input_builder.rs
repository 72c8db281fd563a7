use crate::artifact::js_value::js_value;
use crate::artifact::js_value::JsObject;
use crate::document::Document;
use crate::schema::SchemaIndex;
use crate::schema::TypeKind;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::VecDeque;

/// The `input` section: what the runtime needs to marshal the variables of
/// an operation, or the arguments of a fragment. `None` when there are no
/// variables.
pub(crate) fn input_section(schema: &SchemaIndex, document: &Document) -> Option<JsObject> {
    if document.variables().is_empty() {
        return None;
    }

    let mut fields = JsObject::new();
    let mut defaults = JsObject::new();
    let mut runtime_scalars = JsObject::new();
    let mut pending = VecDeque::new();
    for variable in document.variables() {
        let type_name = variable.type_name();
        match schema.runtime_scalar(type_name) {
            Some(scalar) => {
                fields.insert(variable.name().to_string(), scalar.into());
                runtime_scalars.insert(variable.name().to_string(), type_name.into());
            },
            None => {
                fields.insert(variable.name().to_string(), type_name.into());
            },
        }
        if let Some(default) = variable.default_value() {
            defaults.insert(variable.name().to_string(), js_value(default));
        }
        pending.push_back(type_name.to_string());
    }

    let mut types = BTreeMap::new();
    let mut seen = BTreeSet::new();
    while let Some(type_name) = pending.pop_front() {
        if !seen.insert(type_name.clone())
            || schema.type_kind(&type_name) != Some(TypeKind::InputObject)
        {
            continue;
        }
        let mut members = JsObject::new();
        for (name, field) in schema.fields(&type_name).into_iter().flatten() {
            members.insert(name.clone(), field.type_name().into());
            pending.push_back(field.type_name().to_string());
        }
        types.insert(type_name, serde_json::Value::Object(members));
    }

    let mut input = JsObject::new();
    input.insert("fields".to_string(), fields.into());
    input.insert("types".to_string(), JsObject::from_iter(types).into());
    input.insert("defaults".to_string(), defaults.into());
    input.insert("runtimeScalars".to_string(), runtime_scalars.into());
    Some(input)
}
