use crate::document::Document;
use crate::document::DocumentKind;
use crate::document::Value;
use crate::schema::SchemaIndex;
use std::collections::BTreeMap;

/// A virtual field declared by `fragment F on T @componentField(field:
/// "X", prop: "p")`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComponentField {
    pub(crate) field: String,
    pub(crate) fragment: String,
    pub(crate) prop: String,
    pub(crate) type_name: String,
}
impl ComponentField {
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    pub fn fragment(&self) -> &str {
        self.fragment.as_str()
    }

    pub fn prop(&self) -> &str {
        self.prop.as_str()
    }

    pub fn type_name(&self) -> &str {
        self.type_name.as_str()
    }
}

/// Every component field of the collected documents, keyed by
/// `(type, field)`.
#[derive(Clone, Debug, Default)]
pub struct ComponentFields {
    fields: BTreeMap<(String, String), ComponentField>,
}
impl ComponentFields {
    pub(crate) fn from_documents<'a>(documents: impl IntoIterator<Item = &'a Document>) -> Self {
        let mut fields = BTreeMap::new();
        for document in documents {
            if document.kind() != DocumentKind::Fragment {
                continue;
            }
            let Some(directive) = document.directive("componentField") else {
                continue;
            };
            let Some(field) = directive.argument("field").and_then(Value::as_str) else {
                tracing::warn!(
                    "@componentField on fragment `{}` has no field name; ignored",
                    document.name(),
                );
                continue;
            };
            let Some(type_name) = document.type_condition() else {
                continue;
            };
            let prop = directive
                .argument("prop")
                .and_then(Value::as_str)
                .unwrap_or(field);
            fields.insert(
                (type_name.to_string(), field.to_string()),
                ComponentField {
                    field: field.to_string(),
                    fragment: document.name().to_string(),
                    prop: prop.to_string(),
                    type_name: type_name.to_string(),
                },
            );
        }
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The component field `field` as seen from `parent_type`: declared on
    /// the type itself or on one of its supertypes.
    pub fn lookup(
        &self,
        schema: &SchemaIndex,
        parent_type: &str,
        field: &str,
    ) -> Option<&ComponentField> {
        if let Some(exact) = self.fields.get(&(parent_type.to_string(), field.to_string())) {
            return Some(exact);
        }
        self.fields
            .values()
            .find(|candidate| {
                candidate.field == field
                    && schema.is_supertype_of(&candidate.type_name, parent_type)
            })
    }

    /// The component field a fragment declares, if any.
    pub fn for_fragment(&self, fragment: &str) -> Option<&ComponentField> {
        self.fields.values().find(|field| field.fragment == fragment)
    }
}
