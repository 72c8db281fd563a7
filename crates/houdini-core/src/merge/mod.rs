mod abstract_selection;
mod component_fields;
mod fragment_arguments;
mod fragment_graph;
mod merge_error;
mod merge_options;
mod merged_document;
mod merger;
mod pagination;
mod selection_set;
mod strip_variables;

pub use abstract_selection::abstract_selection;
pub use abstract_selection::AbstractSelection;
pub(crate) use abstract_selection::common_selections;
pub use component_fields::ComponentField;
pub use component_fields::ComponentFields;
pub use merge_error::MergeError;
pub use merge_options::MergeOptions;
pub use merged_document::MergedDocument;
pub use merged_document::MergedSet;
pub use merger::Merger;
pub use pagination::Pagination;
pub use pagination::PaginationDirection;
pub use pagination::PaginationMethod;

#[cfg(test)]
mod tests;
