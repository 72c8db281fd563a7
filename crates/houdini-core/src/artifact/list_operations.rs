use crate::artifact::js_value::js_value;
use crate::artifact::js_value::tagged_value;
use crate::artifact::js_value::JsObject;
use crate::config::ListPosition;
use crate::config::ListTarget;
use crate::config::ProjectConfig;
use crate::document::Directive;
use crate::document::FieldSelection;
use crate::document::FragmentSpread;
use crate::document::Selection;
use crate::document::Value;
use crate::merge::PaginationMethod;
use crate::schema::FieldDefinition;
use crate::schema::SchemaIndex;

const LIST_ACTIONS: [(&str, &str); 3] = [
    ("_insert", "insert"),
    ("_remove", "remove"),
    ("_toggle", "toggle"),
];

/// `list` and `filters` for a field marked `@list(name:)` or
/// `@paginate(name:)`.
pub(crate) fn list_record(
    schema: &SchemaIndex,
    field: &FieldSelection,
    definition: &FieldDefinition,
    paginated: Option<PaginationMethod>,
) -> Option<(JsObject, JsObject)> {
    let directive = field
        .directive("list")
        .or_else(|| field.directive("paginate"))?;
    let name = directive.argument("name").and_then(Value::as_str)?;

    let node_type = schema.connection_node_type(definition.type_name());
    let connection = directive
        .argument("connection")
        .and_then(Value::as_bool)
        .unwrap_or(node_type.is_some());
    let list_type = match node_type {
        Some(node_type) if connection => node_type,
        _ => definition.type_name(),
    };

    let mut list = JsObject::new();
    list.insert("name".to_string(), name.into());
    list.insert("connection".to_string(), connection.into());
    list.insert("type".to_string(), list_type.into());

    let mut filters = JsObject::new();
    for argument in field.arguments() {
        let stripped = paginated.is_some_and(|method| {
            method.arguments().iter().any(|name| *name == argument.name())
        });
        if !stripped {
            filters.insert(argument.name().to_string(), tagged_value(argument.value()));
        }
    }
    Some((list, filters))
}

/// List mutations attached to a field: spreads of the generated
/// `<List>_insert|_remove|_toggle` fragments in its selection set, and
/// `<Type>_delete` directives on the field itself.
pub(crate) fn operations(
    schema: &SchemaIndex,
    config: &ProjectConfig,
    field: &FieldSelection,
) -> Vec<serde_json::Value> {
    let mut operations = vec![];
    for selection in field.selections() {
        if let Selection::FragmentSpread(spread) = selection {
            if let Some(operation) = list_operation(config, spread) {
                operations.push(serde_json::Value::Object(operation));
            }
        }
    }
    for directive in field.directives() {
        let Some(type_name) = directive.name().strip_suffix("_delete") else {
            continue;
        };
        if !schema.has_type(type_name) {
            continue;
        }
        let mut operation = JsObject::new();
        operation.insert("action".to_string(), "delete".into());
        operation.insert("type".to_string(), type_name.into());
        operations.push(serde_json::Value::Object(operation));
    }
    operations
}

fn list_operation(config: &ProjectConfig, spread: &FragmentSpread) -> Option<JsObject> {
    let (list, action) = LIST_ACTIONS.iter().find_map(|(suffix, action)| {
        spread
            .fragment_name()
            .strip_suffix(suffix)
            .filter(|list| !list.is_empty())
            .map(|list| (list, *action))
    })?;

    let mut operation = JsObject::new();
    operation.insert("action".to_string(), action.into());
    operation.insert("list".to_string(), list.into());
    if action != "remove" {
        let position = if spread.directive("prepend").is_some() {
            ListPosition::First
        } else if spread.directive("append").is_some() {
            ListPosition::Last
        } else {
            config.default_list_position
        };
        operation.insert("position".to_string(), position.as_str().into());
    }
    if spread.directive("allLists").is_some() || config.default_list_target == ListTarget::All {
        operation.insert("target".to_string(), ListTarget::All.as_str().into());
    }
    if let Some(parent_id) = spread
        .directive("parentID")
        .and_then(|directive| directive.argument("value"))
    {
        operation.insert("parentID".to_string(), tagged_value(parent_id));
    }

    let mut when = JsObject::new();
    if let Some(directive) = spread.directive("when") {
        when.insert("must".to_string(), directive_arguments(directive).into());
    }
    if let Some(directive) = spread.directive("when_not") {
        when.insert("must_not".to_string(), directive_arguments(directive).into());
    }
    if !when.is_empty() {
        operation.insert("when".to_string(), when.into());
    }
    Some(operation)
}

fn directive_arguments(directive: &Directive) -> JsObject {
    directive
        .arguments()
        .iter()
        .map(|arg| (arg.name().to_string(), js_value(arg.value())))
        .collect()
}
