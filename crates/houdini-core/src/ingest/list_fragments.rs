use crate::document::Document;
use crate::document::DocumentKind;
use crate::document::FieldSelection;
use crate::document::Selection;
use crate::document::Value;
use crate::schema::SchemaIndex;

/// The fragments a named list (`@list(name:)` or `@paginate(name:)`)
/// makes available to mutations: `<name>_insert` and `<name>_toggle`
/// select what the list selects, `<name>_remove` selects only the keys.
pub(crate) fn list_fragments(schema: &SchemaIndex, document: &Document) -> Vec<Document> {
    let root_type = match document.kind() {
        DocumentKind::Fragment => document
            .type_condition()
            .unwrap_or(schema.query_type())
            .to_string(),
        kind => schema.root_type(kind).to_string(),
    };
    let mut fragments = vec![];
    collect(schema, &root_type, document.selections(), &mut fragments);
    fragments
}

fn collect(
    schema: &SchemaIndex,
    parent_type: &str,
    selections: &[Selection],
    out: &mut Vec<Document>,
) {
    for selection in selections {
        match selection {
            Selection::Field(field) => {
                let Some(definition) = schema.field(parent_type, field.field_name()) else {
                    continue;
                };
                if let Some(name) = list_name(field) {
                    match schema.connection_node_type(definition.type_name()) {
                        Some(node_type) => {
                            let node = node_selections(field);
                            out.extend(fragments_for(schema, name, node_type, node));
                        },
                        None => out.extend(fragments_for(
                            schema,
                            name,
                            definition.type_name(),
                            field.selections(),
                        )),
                    }
                }
                collect(schema, definition.type_name(), field.selections(), out);
            },
            Selection::InlineFragment(inline) => {
                let condition = inline.type_condition().unwrap_or(parent_type);
                collect(schema, condition, inline.selections(), out);
            },
            Selection::FragmentSpread(_) => (),
        }
    }
}

fn list_name(field: &FieldSelection) -> Option<&str> {
    field
        .directive("list")
        .or_else(|| field.directive("paginate"))
        .and_then(|directive| directive.argument("name"))
        .and_then(Value::as_str)
}

/// The selections of `edges { node { ... } }` under a connection field.
fn node_selections(field: &FieldSelection) -> &[Selection] {
    child_field(field.selections(), "edges")
        .and_then(|edges| child_field(edges.selections(), "node"))
        .map(FieldSelection::selections)
        .unwrap_or_default()
}

fn child_field<'a>(selections: &'a [Selection], name: &str) -> Option<&'a FieldSelection> {
    selections.iter().find_map(|selection| match selection {
        Selection::Field(field) if field.field_name() == name => Some(field),
        _ => None,
    })
}

fn fragments_for(
    schema: &SchemaIndex,
    list_name: &str,
    element_type: &str,
    selections: &[Selection],
) -> Vec<Document> {
    let fragment = |suffix: &str, selections: Vec<Selection>| {
        let mut document = Document::new(
            0,
            format!("{list_name}_{suffix}"),
            DocumentKind::Fragment,
            Some(element_type.to_string()),
        );
        document.selections = selections;
        document
    };
    let keys: Vec<Selection> = schema
        .keys_for(element_type)
        .into_iter()
        .map(|key| Selection::Field(FieldSelection::new(key)))
        .collect();
    vec![
        fragment("insert", selections.to_vec()),
        fragment("remove", keys),
        fragment("toggle", selections.to_vec()),
    ]
}
