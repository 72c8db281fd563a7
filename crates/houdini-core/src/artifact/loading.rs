use crate::artifact::js_value::JsObject;
use crate::document::Document;
use crate::document::FieldSelection;
use crate::document::Selection;
use crate::document::Value;
use crate::schema::FieldDefinition;
use crate::schema::SchemaIndex;

/// Placeholder count for list fields that do not say otherwise.
const DEFAULT_LIST_COUNT: i64 = 3;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum LoadingKind {
    /// Descend into the field's selection to find loading values.
    Continue,
    /// The field itself renders as a loading value.
    Value,
}

/// The loading state of a field, either from its own `@loading` or from a
/// cascading ancestor.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FieldLoading {
    cascade: bool,
    count: i64,
    kind: LoadingKind,
    list_depth: Option<usize>,
}
impl FieldLoading {
    /// A document-level `@loading` cascades from the root.
    pub(crate) fn for_document(document: &Document) -> Option<Self> {
        let directive = document.directive("loading")?;
        Some(Self {
            cascade: true,
            count: directive
                .argument("count")
                .and_then(Value::as_i64)
                .unwrap_or(DEFAULT_LIST_COUNT),
            kind: LoadingKind::Continue,
            list_depth: None,
        })
    }

    pub(crate) fn resolve(
        schema: &SchemaIndex,
        field: &FieldSelection,
        definition: &FieldDefinition,
        inherited: Option<&FieldLoading>,
    ) -> Option<Self> {
        let directive = field.directive("loading");
        if directive.is_none() && inherited.is_none() {
            return None;
        }
        let count = directive
            .and_then(|d| d.argument("count"))
            .and_then(Value::as_i64)
            .or(inherited.map(|loading| loading.count))
            .unwrap_or(DEFAULT_LIST_COUNT);
        let cascade = match directive {
            Some(directive) => directive
                .argument("cascade")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            None => true,
        };
        let kind = if schema.is_composite(definition.type_name())
            && (cascade || children_loading(field.selections()))
        {
            LoadingKind::Continue
        } else {
            LoadingKind::Value
        };
        Some(Self {
            cascade,
            count,
            kind,
            list_depth: definition.is_list().then(|| definition.list_depth()),
        })
    }

    /// Whether the field's own selection is searched for loading values.
    pub(crate) fn continues(&self) -> bool {
        self.kind == LoadingKind::Continue
    }

    /// The loading state children inherit, if this one cascades.
    pub(crate) fn cascade(&self) -> Option<&FieldLoading> {
        self.cascade.then_some(self)
    }

    pub(crate) fn record(&self) -> JsObject {
        let mut record = JsObject::new();
        let kind = match self.kind {
            LoadingKind::Continue => "continue",
            LoadingKind::Value => "value",
        };
        record.insert("kind".to_string(), kind.into());
        if let Some(depth) = self.list_depth {
            let mut list = JsObject::new();
            list.insert("depth".to_string(), depth.into());
            list.insert("count".to_string(), self.count.into());
            record.insert("list".to_string(), list.into());
        }
        record
    }
}

/// Whether a field directly under `selections`, or under one of its
/// branches, carries `@loading`.
fn children_loading(selections: &[Selection]) -> bool {
    selections.iter().any(|child| match child {
        Selection::Field(field) => field.directive("loading").is_some(),
        Selection::InlineFragment(inline) => children_loading(inline.selections()),
        Selection::FragmentSpread(_) => false,
    })
}
