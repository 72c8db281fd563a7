use crate::document::sorted_arguments;
use crate::document::FieldSelection;
use crate::merge::PaginationMethod;
use crate::schema::FieldDefinition;

/// The cache key of a field: its name plus a canonical signature of the
/// arguments that are not at their schema default.
///
/// A paginated field leaves out its pagination arguments and is suffixed
/// with `::paginated`, so every page lands in the same record.
pub(crate) fn key_raw(
    field: &FieldSelection,
    definition: Option<&FieldDefinition>,
    paginated: Option<PaginationMethod>,
) -> String {
    let arguments: Vec<String> = sorted_arguments(field.arguments())
        .into_iter()
        .filter(|arg| {
            paginated.is_none_or(|method| {
                !method.arguments().iter().any(|name| *name == arg.name())
            })
        })
        .map(|arg| (arg, arg.value().to_string()))
        .filter(|(arg, printed)| {
            let default = definition
                .and_then(|definition| definition.argument(arg.name()))
                .and_then(|argument| argument.default_value());
            default != Some(printed.as_str())
        })
        .map(|(arg, printed)| format!("{}: {printed}", arg.name()))
        .collect();

    let mut key = field.field_name().to_string();
    if !arguments.is_empty() {
        key.push_str(&format!("({})", arguments.join(", ")));
    }
    if paginated.is_some() {
        key.push_str("::paginated");
    }
    key
}
