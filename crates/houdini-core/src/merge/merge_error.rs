use crate::error_kind::ErrorKind;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum MergeError {
    #[error(
        "Document '{document}' selects '{response_key}' more than once with different \
         fields or arguments"
    )]
    ConflictingSelections {
        document: String,
        response_key: String,
    },

    #[error("Fragment cycle detected: {}", format_cycle_path(.cycle_path))]
    FragmentCycle {
        document: String,
        cycle_path: Vec<String>,
    },

    #[error("Document '{document}' declares fragment argument '{argument}' without a valid type")]
    InvalidFragmentArgument { document: String, argument: String },

    #[error(
        "Document '{document}' paginates '{field}', which accepts neither cursor nor offset \
         arguments"
    )]
    InvalidPagination { document: String, field: String },

    #[error("Document '{document}' has more than one @paginate field")]
    MultiplePaginatedFields { document: String },

    #[error("Document '{document}' selects unknown field '{field}' on type '{parent_type}'")]
    UnknownField {
        document: String,
        field: String,
        parent_type: String,
    },

    #[error("Document '{document}' references undefined fragment '{fragment}'")]
    UnknownFragment { document: String, fragment: String },

    #[error("Document '{document}' was not collected")]
    UnknownDocument { document: String },

    #[error("Document '{document}' references type '{type_name}', which is not in the schema")]
    UnknownType { document: String, type_name: String },
}
impl MergeError {
    pub fn document(&self) -> &str {
        match self {
            MergeError::ConflictingSelections { document, .. }
            | MergeError::FragmentCycle { document, .. }
            | MergeError::InvalidFragmentArgument { document, .. }
            | MergeError::InvalidPagination { document, .. }
            | MergeError::MultiplePaginatedFields { document }
            | MergeError::UnknownDocument { document }
            | MergeError::UnknownField { document, .. }
            | MergeError::UnknownFragment { document, .. }
            | MergeError::UnknownType { document, .. } => document.as_str(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::MergeError
    }
}

fn format_cycle_path(cycle: &[String]) -> String {
    cycle.join(" → ")
}
