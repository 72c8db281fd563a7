use crate::config::PaginateMode;
use crate::document::Selection;
use crate::document::Value;
use crate::merge::MergeError;
use crate::merge::MergeOptions;
use crate::merge::MergedDocument;
use crate::merge::Merger;
use crate::merge::PaginationDirection;
use crate::merge::PaginationMethod;
use crate::test_utils::TestProject;

fn merge(documents: &str, name: &str) -> Result<MergedDocument, MergeError> {
    let project = TestProject::with_documents(documents);
    let schema = project.schema();
    let collected = project.collect();
    Merger::new(&schema, collected.documents(), MergeOptions::default()).merge(name)
}

fn variables(merged: &MergedDocument) -> Vec<(String, String, Option<String>)> {
    merged
        .document()
        .variables()
        .iter()
        .map(|variable| {
            (
                variable.name().to_string(),
                variable.type_string(),
                variable.default_value().map(Value::to_string),
            )
        })
        .collect()
}

fn child_keys(selections: &[Selection], path: &[&str]) -> Vec<String> {
    let mut current = selections;
    for key in path {
        current = current
            .iter()
            .find_map(|selection| match selection {
                Selection::Field(field) if field.response_key() == *key => {
                    Some(field.selections())
                },
                _ => None,
            })
            .unwrap_or_else(|| panic!("no field `{key}`"));
    }
    current
        .iter()
        .filter_map(|selection| match selection {
            Selection::Field(field) => Some(field.response_key().to_string()),
            _ => None,
        })
        .collect()
}

#[test]
fn forward_cursor_pagination() {
    let merged = merge(
        r#"
        query Users {
            usersByForwardCursor(first: 10) @paginate {
                edges {
                    node {
                        name
                    }
                }
            }
        }
        "#,
        "Users",
    )
    .unwrap();
    let pagination = merged.pagination().unwrap();
    assert_eq!(pagination.method, PaginationMethod::Cursor);
    assert_eq!(pagination.direction, PaginationDirection::Forward);
    assert_eq!(pagination.page_size, Some(10));
    assert_eq!(pagination.field_path, vec!["usersByForwardCursor"]);
    assert_eq!(pagination.target_type, "Query");
    assert!(!pagination.embedded);
    assert_eq!(pagination.list_name, None);
    assert_eq!(pagination.mode, None);

    assert_eq!(
        variables(&merged),
        vec![
            ("first".to_string(), "Int".to_string(), Some("10".to_string())),
            ("after".to_string(), "String".to_string(), None),
        ],
    );

    let selections = merged.document().selections();
    let Selection::Field(field) = &selections[0] else {
        panic!("expected a field");
    };
    assert_eq!(field.argument("first"), Some(&Value::Variable("first".to_string())));
    assert_eq!(field.argument("after"), Some(&Value::Variable("after".to_string())));
    assert_eq!(
        child_keys(selections, &["usersByForwardCursor"]),
        vec!["__typename", "edges", "pageInfo"],
    );
    assert_eq!(
        child_keys(selections, &["usersByForwardCursor", "edges"]),
        vec!["__typename", "cursor", "node"],
    );
    assert_eq!(
        child_keys(selections, &["usersByForwardCursor", "pageInfo"]),
        vec!["__typename", "endCursor", "hasNextPage", "hasPreviousPage", "startCursor"],
    );
}

#[test]
fn bidirectional_cursor_declares_every_cursor_variable() {
    let merged = merge(
        "query Users { usersByCursor(first: 5) @paginate { edges { node { id } } } }",
        "Users",
    )
    .unwrap();
    assert_eq!(merged.pagination().unwrap().direction, PaginationDirection::Both);
    let names: Vec<String> = variables(&merged).into_iter().map(|(name, ..)| name).collect();
    assert_eq!(names, vec!["first", "after", "last", "before"]);
}

#[test]
fn offset_pagination_uses_limit() {
    let merged = merge(
        "query Users { usersByOffset(limit: 5) @paginate(mode: SinglePage) { id } }",
        "Users",
    )
    .unwrap();
    let pagination = merged.pagination().unwrap();
    assert_eq!(pagination.method, PaginationMethod::Offset);
    assert_eq!(pagination.page_size, Some(5));
    assert_eq!(pagination.mode, Some(PaginateMode::SinglePage));
    assert_eq!(
        variables(&merged),
        vec![
            ("limit".to_string(), "Int".to_string(), Some("5".to_string())),
            ("offset".to_string(), "Int".to_string(), None),
        ],
    );
}

#[test]
fn existing_variables_are_reused() {
    let merged = merge(
        r#"
        query Users($first: Int = 20) {
            usersByForwardCursor(first: $first) @paginate {
                edges {
                    node {
                        id
                    }
                }
            }
        }
        "#,
        "Users",
    )
    .unwrap();
    assert_eq!(merged.pagination().unwrap().page_size, Some(20));
    assert_eq!(
        variables(&merged),
        vec![
            ("first".to_string(), "Int".to_string(), Some("20".to_string())),
            ("after".to_string(), "String".to_string(), None),
        ],
    );
}

#[test]
fn node_fragments_paginate_through_node() {
    let merged = merge(
        r#"
        fragment Friends on User {
            friendsByCursor(first: 10) @paginate(name: "Friends") {
                edges {
                    node {
                        id
                    }
                }
            }
        }
        "#,
        "Friends",
    )
    .unwrap();
    let pagination = merged.pagination().unwrap();
    assert!(pagination.embedded);
    assert_eq!(pagination.target_type, "Node");
    assert_eq!(pagination.list_name.as_deref(), Some("Friends"));
    assert_eq!(pagination.direction, PaginationDirection::Both);
}

#[test]
fn query_fragments_are_not_embedded() {
    let merged = merge(
        "fragment AllUsers on Query { usersByOffset(limit: 3) @paginate { id } }",
        "AllUsers",
    )
    .unwrap();
    let pagination = merged.pagination().unwrap();
    assert!(!pagination.embedded);
    assert_eq!(pagination.target_type, "Query");
}

#[test]
fn one_paginated_field_per_document() {
    let err = merge(
        r#"
        query Users {
            usersByOffset(limit: 5) @paginate {
                id
            }
            viewer {
                friendsByOffset(limit: 2) @paginate {
                    id
                }
            }
        }
        "#,
        "Users",
    )
    .unwrap_err();
    assert_eq!(
        err,
        MergeError::MultiplePaginatedFields {
            document: "Users".to_string(),
        },
    );
}

#[test]
fn fields_without_page_arguments_cannot_paginate() {
    let err = merge("query Things { entities @paginate { __typename } }", "Things").unwrap_err();
    assert_eq!(
        err,
        MergeError::InvalidPagination {
            document: "Things".to_string(),
            field: "entities".to_string(),
        },
    );
}
