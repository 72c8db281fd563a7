mod argument;
mod directive;
#[allow(clippy::module_inception)]
mod document;
mod document_kind;
mod field_selection;
mod fragment_spread;
mod inline_fragment;
mod operation_variable;
mod selection;
mod type_modifiers;
mod value;

pub use argument::Argument;
pub(crate) use argument::arguments_equal;
pub(crate) use argument::sorted_arguments;
pub use directive::Directive;
pub(crate) use directive::find_directive;
pub(crate) use directive::merge_directives;
pub use document::Document;
pub use document_kind::DocumentKind;
pub use field_selection::FieldSelection;
pub use fragment_spread::FragmentSpread;
pub use fragment_spread::FragmentVariant;
pub use inline_fragment::InlineFragment;
pub use operation_variable::OperationVariable;
pub use selection::Selection;
pub use selection::SelectionKind;
pub use type_modifiers::parse_type_string;
pub use type_modifiers::wrap_type;
pub use value::Value;
pub use value::ValueKind;

#[cfg(test)]
mod tests;
