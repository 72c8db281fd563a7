use crate::config::PaginateMode;
use crate::document::Argument;
use crate::document::Document;
use crate::document::DocumentKind;
use crate::document::FieldSelection;
use crate::document::OperationVariable;
use crate::document::Selection;
use crate::document::Value;
use crate::merge::MergeError;
use crate::schema::FieldDefinition;
use crate::schema::SchemaIndex;

const CURSOR_ARGUMENTS: [&str; 4] = ["first", "after", "last", "before"];
const OFFSET_ARGUMENTS: [&str; 2] = ["limit", "offset"];
const PAGE_INFO_FIELDS: [&str; 4] = ["endCursor", "hasNextPage", "hasPreviousPage", "startCursor"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaginationMethod {
    Cursor,
    Offset,
}
impl PaginationMethod {
    /// Cursor pagination when the field accepts `first` or `last`, offset
    /// pagination when it accepts `limit` or `offset`.
    pub fn for_field(definition: &FieldDefinition) -> Option<Self> {
        let accepts = |name: &str| definition.argument(name).is_some();
        if accepts("first") || accepts("last") {
            Some(PaginationMethod::Cursor)
        } else if accepts("limit") || accepts("offset") {
            Some(PaginationMethod::Offset)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaginationMethod::Cursor => "cursor",
            PaginationMethod::Offset => "offset",
        }
    }

    /// The arguments this method replaces with variables.
    pub fn arguments(&self) -> &'static [&'static str] {
        match self {
            PaginationMethod::Cursor => &CURSOR_ARGUMENTS,
            PaginationMethod::Offset => &OFFSET_ARGUMENTS,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaginationDirection {
    Backward,
    Both,
    Forward,
}
impl PaginationDirection {
    pub fn for_field(definition: &FieldDefinition) -> Self {
        let accepts = |name: &str| definition.argument(name).is_some();
        match (
            accepts("first") && accepts("after"),
            accepts("last") && accepts("before"),
        ) {
            (true, true) => PaginationDirection::Both,
            (false, true) => PaginationDirection::Backward,
            _ => PaginationDirection::Forward,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaginationDirection::Backward => "backward",
            PaginationDirection::Both => "both",
            PaginationDirection::Forward => "forward",
        }
    }
}

/// What the artifact needs to know about a document's `@paginate` field.
#[derive(Clone, Debug, PartialEq)]
pub struct Pagination {
    pub direction: PaginationDirection,
    /// True for fragments whose type is not the query root.
    pub embedded: bool,
    /// Response keys from the document root down to the paginated field.
    pub field_path: Vec<String>,
    pub list_name: Option<String>,
    pub method: PaginationMethod,
    /// `@paginate(mode:)`, when the field overrides the project default.
    pub mode: Option<PaginateMode>,
    pub page_size: Option<i64>,
    pub target_type: String,
}

/// Rewrites the `@paginate` field of `document`, if any.
///
/// Page-size and cursor arguments become variables (defaulting to the
/// literal that was written), the variables are declared on the document,
/// and cursor connections get the `edges`/`pageInfo` selections the
/// runtime needs to load more pages.
pub(crate) fn apply_pagination(
    schema: &SchemaIndex,
    document: &mut Document,
) -> Result<Option<Pagination>, MergeError> {
    let root_type = match document.kind() {
        DocumentKind::Fragment => document
            .type_condition()
            .unwrap_or(schema.query_type())
            .to_string(),
        kind => schema.root_type(kind).to_string(),
    };
    let mut rewrite = PaginationRewrite {
        document_name: document.name().to_string(),
        found: None,
        new_variables: vec![],
        path: vec![],
        schema,
        variables: document.variables().to_vec(),
    };
    rewrite.walk(&root_type, &mut document.selections)?;

    let Some(mut pagination) = rewrite.found else {
        return Ok(None);
    };
    document.variables.extend(rewrite.new_variables);

    if document.kind() == DocumentKind::Fragment {
        pagination.embedded = root_type != schema.query_type();
        pagination.target_type = if root_type == "Node" || schema.implements(&root_type, "Node") {
            "Node".to_string()
        } else {
            root_type
        };
    } else {
        pagination.embedded = false;
        pagination.target_type = root_type;
    }
    if pagination.page_size.is_none() {
        pagination.page_size = page_size_from_variables(document, pagination.method);
    }
    Ok(Some(pagination))
}

struct PaginationRewrite<'a> {
    document_name: String,
    found: Option<Pagination>,
    new_variables: Vec<OperationVariable>,
    path: Vec<String>,
    schema: &'a SchemaIndex,
    variables: Vec<OperationVariable>,
}
impl PaginationRewrite<'_> {
    fn walk(&mut self, parent_type: &str, selections: &mut [Selection]) -> Result<(), MergeError> {
        for selection in selections {
            match selection {
                Selection::Field(field) => {
                    let Some(definition) = self.schema.field(parent_type, field.field_name()) else {
                        continue;
                    };
                    let definition = definition.clone();
                    self.path.push(field.response_key().to_string());
                    if field.directive("paginate").is_some() {
                        if self.found.is_some() {
                            return Err(MergeError::MultiplePaginatedFields {
                                document: self.document_name.clone(),
                            });
                        }
                        let pagination = self.rewrite_field(field, &definition)?;
                        self.found = Some(pagination);
                    }
                    self.walk(definition.type_name(), &mut field.selections)?;
                    self.path.pop();
                },
                Selection::InlineFragment(inline) => {
                    let type_condition = inline
                        .type_condition()
                        .unwrap_or(parent_type)
                        .to_string();
                    self.walk(&type_condition, &mut inline.selections)?;
                },
                Selection::FragmentSpread(_) => (),
            }
        }
        Ok(())
    }

    fn rewrite_field(
        &mut self,
        field: &mut FieldSelection,
        definition: &FieldDefinition,
    ) -> Result<Pagination, MergeError> {
        let method = PaginationMethod::for_field(definition).ok_or_else(|| {
            MergeError::InvalidPagination {
                document: self.document_name.clone(),
                field: field.response_key().to_string(),
            }
        })?;
        let direction = PaginationDirection::for_field(definition);
        let size_argument = match method {
            PaginationMethod::Cursor
                if field.argument("first").is_some() || definition.argument("last").is_none() =>
            {
                "first"
            },
            PaginationMethod::Cursor => "last",
            PaginationMethod::Offset => "limit",
        };
        let page_size = field.argument(size_argument).and_then(Value::as_i64);

        for name in method.arguments() {
            let Some(argument_definition) = definition.argument(name) else {
                continue;
            };
            let current = field.argument(name).cloned();
            if let Some(Value::Variable(_)) = current {
                continue;
            }
            field.arguments.retain(|arg| arg.name() != *name);
            field
                .arguments
                .push(Argument::new(*name, Value::Variable(name.to_string())));

            let declared = self.variables.iter().any(|var| var.name() == *name)
                || self.new_variables.iter().any(|var| var.name() == *name);
            if !declared {
                let modifiers = argument_definition
                    .type_modifiers()
                    .trim_end_matches('!')
                    .to_string();
                self.new_variables.push(OperationVariable::new(
                    *name,
                    argument_definition.type_name(),
                    modifiers,
                    current,
                ));
            }
        }

        if method == PaginationMethod::Cursor {
            ensure_connection_selections(field);
        }

        let paginate = field.directive("paginate");
        let list_name = paginate
            .and_then(|d| d.argument("name"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let mode = paginate
            .and_then(|d| d.argument("mode"))
            .and_then(Value::as_str)
            .and_then(PaginateMode::parse);

        Ok(Pagination {
            direction,
            embedded: false,
            field_path: self.path.clone(),
            list_name,
            method,
            mode,
            page_size,
            target_type: String::new(),
        })
    }
}

fn page_size_from_variables(document: &Document, method: PaginationMethod) -> Option<i64> {
    let names: &[&str] = match method {
        PaginationMethod::Cursor => &["first", "last"],
        PaginationMethod::Offset => &["limit"],
    };
    names.iter().find_map(|name| {
        document
            .variable(name)
            .and_then(OperationVariable::default_value)
            .and_then(Value::as_i64)
    })
}

/// Makes sure a cursor connection selects
/// `edges { cursor node { __typename } }` and the full `pageInfo`.
fn ensure_connection_selections(field: &mut FieldSelection) {
    let edges = child_field(&mut field.selections, "edges");
    child_field(&mut edges.selections, "cursor");
    let node = child_field(&mut edges.selections, "node");
    child_field(&mut node.selections, "__typename");

    let page_info = child_field(&mut field.selections, "pageInfo");
    for name in PAGE_INFO_FIELDS {
        child_field(&mut page_info.selections, name);
    }
}

/// The unaliased child field `name`, injected when missing.
fn child_field<'a>(selections: &'a mut Vec<Selection>, name: &str) -> &'a mut FieldSelection {
    let position = selections.iter().position(|selection| {
        matches!(
            selection,
            Selection::Field(field) if field.field_name() == name && field.alias().is_none()
        )
    });
    let index = match position {
        Some(index) => index,
        None => {
            selections.push(Selection::Field(FieldSelection::injected(name)));
            selections.len() - 1
        },
    };
    match &mut selections[index] {
        Selection::Field(field) => field,
        _ => unreachable!("index points at a field selection"),
    }
}
