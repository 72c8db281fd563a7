use crate::document::FieldSelection;
use crate::document::Selection;
use crate::document::Value;
use crate::hash::short_hash;
use crate::merge::abstract_selection;
use crate::merge::MergeError;
use crate::merge::MergeOptions;
use crate::merge::MergedDocument;
use crate::merge::MergedSet;
use crate::merge::Merger;
use crate::test_utils::TestProject;

fn merge_with(
    documents: &str,
    name: &str,
    options: MergeOptions,
) -> Result<MergedDocument, MergeError> {
    let project = TestProject::with_documents(documents);
    let schema = project.schema();
    let collected = project.collect();
    Merger::new(&schema, collected.documents(), options).merge(name)
}

fn merge(documents: &str, name: &str) -> Result<MergedDocument, MergeError> {
    merge_with(documents, name, MergeOptions::default())
}

fn merge_set(documents: &str, name: &str) -> MergedSet {
    let project = TestProject::with_documents(documents);
    let schema = project.schema();
    let collected = project.collect();
    Merger::new(&schema, collected.documents(), MergeOptions::default())
        .merge_with_fragments(name)
        .unwrap()
}

/// Response keys, `... on T` for branches and `...Name` for spreads.
fn outline(selections: &[Selection]) -> Vec<String> {
    selections
        .iter()
        .map(|selection| match selection {
            Selection::Field(field) => field.response_key().to_string(),
            Selection::InlineFragment(inline) => {
                format!("... on {}", inline.type_condition().unwrap_or_default())
            },
            Selection::FragmentSpread(spread) => format!("...{}", spread.printed_name()),
        })
        .collect()
}

fn field<'a>(selections: &'a [Selection], key: &str) -> &'a FieldSelection {
    selections
        .iter()
        .find_map(|selection| match selection {
            Selection::Field(field) if field.response_key() == key => Some(field),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no field `{key}`"))
}

// =============================================================================
// Field merging
// =============================================================================

#[test]
fn repeated_fields_merge_and_keys_are_injected() {
    let merged = merge(
        r#"
        query Q {
            user(id: "1") {
                name
            }
            user(id: "1") {
                firstName
            }
        }
        "#,
        "Q",
    )
    .unwrap();
    let selections = merged.document().selections();
    assert_eq!(outline(selections), vec!["user"]);
    let user = field(selections, "user");
    assert_eq!(outline(user.selections()), vec!["__typename", "firstName", "id", "name"]);
    assert!(!field(user.selections(), "id").visible());
}

#[test]
fn argument_order_does_not_matter() {
    let merged = merge(
        r#"
        query Q {
            user(id: "1", name: "x") {
                name
            }
            user(name: "x", id: "1") {
                firstName
            }
        }
        "#,
        "Q",
    )
    .unwrap();
    assert_eq!(outline(merged.document().selections()), vec!["user"]);
}

#[test]
fn different_arguments_under_one_key_conflict() {
    let err = merge(
        r#"
        query Q {
            a: user(id: "1") {
                id
            }
            a: user(id: "2") {
                id
            }
        }
        "#,
        "Q",
    )
    .unwrap_err();
    assert_eq!(
        err,
        MergeError::ConflictingSelections {
            document: "Q".to_string(),
            response_key: "a".to_string(),
        },
    );
}

#[test]
fn different_fields_under_one_alias_conflict() {
    let err = merge("query Q { a: version  a: viewer { id } }", "Q").unwrap_err();
    assert!(matches!(
        err,
        MergeError::ConflictingSelections { response_key, .. } if response_key == "a"
    ));
}

#[test]
fn unsorted_merge_keeps_source_order() {
    let options = MergeOptions {
        sort_keys: false,
        ..MergeOptions::default()
    };
    let merged = merge_with("query Q { viewer { name firstName } }", "Q", options).unwrap();
    let viewer = field(merged.document().selections(), "viewer");
    assert_eq!(outline(viewer.selections()), vec!["name", "firstName", "__typename", "id"]);
}

#[test]
fn unknown_field_is_reported() {
    let err = merge("query Q { viewer { shoeSize } }", "Q").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Document 'Q' selects unknown field 'shoeSize' on type 'User'",
    );
}

#[test]
fn unknown_document_is_reported() {
    let err = merge("query Q { version }", "Nope").unwrap_err();
    assert_eq!(err, MergeError::UnknownDocument { document: "Nope".to_string() });
}

// =============================================================================
// Inline fragments
// =============================================================================

#[test]
fn covering_inline_fragments_dissolve() {
    let merged = merge(
        r#"
        query Q {
            node(id: "1") {
                ... on Node {
                    id
                }
                ... on User {
                    name
                }
            }
        }
        "#,
        "Q",
    )
    .unwrap();
    let node = field(merged.document().selections(), "node");
    assert_eq!(outline(node.selections()), vec!["__typename", "id", "... on User"]);
}

#[test]
fn inline_fragments_with_printed_directives_stay() {
    let merged = merge(
        r#"
        query Q {
            viewer {
                ... on User @include(if: true) {
                    name
                }
            }
        }
        "#,
        "Q",
    )
    .unwrap();
    let viewer = field(merged.document().selections(), "viewer");
    assert_eq!(outline(viewer.selections()), vec!["__typename", "id", "... on User"]);
}

#[test]
fn abstract_selection_maps_uncovered_types() {
    let merged = merge(
        r#"
        query Q {
            entities {
                ... on User {
                    firstName
                }
                ... on Pet {
                    name
                }
            }
        }
        "#,
        "Q",
    )
    .unwrap();
    let project = TestProject::new();
    let schema = project.schema();
    let entities = field(merged.document().selections(), "entities");
    let split = abstract_selection(&schema, "Entity", entities.selections()).unwrap();

    assert_eq!(split.fields.keys().collect::<Vec<_>>(), vec!["Pet", "User"]);
    assert_eq!(outline(&split.fields["Pet"]), vec!["__typename", "name"]);
    assert_eq!(split.type_map.get("Cat").map(String::as_str), Some("Pet"));
    assert_eq!(split.type_map.get("Dog").map(String::as_str), Some("Pet"));
    assert!(!split.type_map.contains_key("User"));
}

#[test]
fn nested_branches_get_their_own_entry() {
    let merged = merge(
        r#"
        query Q {
            node(id: "1") {
                ... on Pet {
                    name
                    ... on Cat {
                        meows
                    }
                }
            }
        }
        "#,
        "Q",
    )
    .unwrap();
    let project = TestProject::new();
    let schema = project.schema();
    let node = field(merged.document().selections(), "node");
    let split = abstract_selection(&schema, "Node", node.selections()).unwrap();

    assert_eq!(split.fields.keys().collect::<Vec<_>>(), vec!["Cat", "Pet"]);
    let cat = outline(&split.fields["Cat"]);
    assert!(cat.contains(&"meows".to_string()));
    assert!(cat.contains(&"name".to_string()));
    assert!(!outline(&split.fields["Pet"]).contains(&"meows".to_string()));
    assert_eq!(split.type_map.get("Dog").map(String::as_str), Some("Pet"));
    assert!(!split.type_map.contains_key("Cat"));
}

// =============================================================================
// Fragments
// =============================================================================

const USER_NAME: &str = r#"
    fragment UserName on User {
        name
    }
"#;

#[test]
fn spread_fields_are_inlined_and_masked() {
    let documents = format!("{USER_NAME} query Q {{ viewer {{ ...UserName }} }}");
    let merged = merge(&documents, "Q").unwrap();
    let viewer = field(merged.document().selections(), "viewer");

    assert_eq!(outline(viewer.selections()), vec!["__typename", "id", "name", "...UserName"]);
    let name = field(viewer.selections(), "name");
    assert!(name.inlined());
    assert!(!name.visible());
    assert_eq!(merged.document().referenced_fragments(), &["UserName"]);
}

#[test]
fn mask_disable_keeps_spread_fields_visible() {
    let documents = format!("{USER_NAME} query Q {{ viewer {{ ...UserName @mask_disable }} }}");
    let merged = merge(&documents, "Q").unwrap();
    let viewer = field(merged.document().selections(), "viewer");
    assert!(field(viewer.selections(), "name").visible());
}

#[test]
fn masking_can_be_disabled_project_wide() {
    let documents = format!("{USER_NAME} query Q {{ viewer {{ ...UserName }} }}");
    let options = MergeOptions {
        default_fragment_masking: false,
        ..MergeOptions::default()
    };
    let merged = merge_with(&documents, "Q", options).unwrap();
    let viewer = field(merged.document().selections(), "viewer");
    assert!(field(viewer.selections(), "name").visible());
}

#[test]
fn unknown_fragment_is_reported() {
    let err = merge("query Q { viewer { ...Missing } }", "Q").unwrap_err();
    assert_eq!(
        err,
        MergeError::UnknownFragment {
            document: "Q".to_string(),
            fragment: "Missing".to_string(),
        },
    );
}

#[test]
fn fragment_cycles_are_rejected() {
    let err = merge(
        r#"
        fragment B on User {
            ...A
        }

        fragment A on User {
            bestFriend {
                ...B
            }
        }

        query Q {
            viewer {
                ...A
            }
        }
        "#,
        "Q",
    )
    .unwrap_err();
    assert_eq!(
        err,
        MergeError::FragmentCycle {
            document: "Q".to_string(),
            cycle_path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        },
    );
    assert_eq!(err.to_string(), "Fragment cycle detected: A → B → A");
}

#[test]
fn component_fields_become_spreads() {
    let documents = r#"
        fragment UserAvatar on User @componentField(field: "Avatar", prop: "user") {
            firstName
        }

        query Q {
            viewer {
                Avatar
            }
        }
    "#;
    let project = TestProject::with_documents(documents);
    let schema = project.schema();
    let collected = project.collect();
    let merger = Merger::new(&schema, collected.documents(), MergeOptions::default());

    let component = merger.component_fields().for_fragment("UserAvatar").unwrap();
    assert_eq!(component.field(), "Avatar");
    assert_eq!(component.prop(), "user");
    assert_eq!(component.type_name(), "User");

    let merged = merger.merge("Q").unwrap();
    let viewer = field(merged.document().selections(), "viewer");
    assert_eq!(
        outline(viewer.selections()),
        vec!["__typename", "firstName", "id", "...UserAvatar"],
    );
    let Some(Selection::FragmentSpread(spread)) = viewer.selections().last() else {
        panic!("expected a spread");
    };
    assert_eq!(spread.component_field(), Some("Avatar"));
}

// =============================================================================
// Fragment arguments
// =============================================================================

const SIZED_FRIENDS: &str = r#"
    fragment Friends on User @arguments(size: { type: "Int", default: 10 }) {
        friendsByOffset(limit: $size) {
            name
        }
    }
"#;

#[test]
fn bound_arguments_produce_a_variant() {
    let documents = format!("{SIZED_FRIENDS} query Q {{ viewer {{ ...Friends @with(size: 5) }} }}");
    let set = merge_set(&documents, "Q");
    let variant = format!("Friends_{}", short_hash("size: 5"));

    let viewer = field(set.document().document().selections(), "viewer");
    assert_eq!(outline(viewer.selections()).last(), Some(&format!("...{variant}")));
    let inlined = field(viewer.selections(), "friendsByOffset");
    assert_eq!(inlined.argument("limit"), Some(&Value::Int("5".to_string())));

    assert_eq!(set.fragments().keys().collect::<Vec<_>>(), vec![&variant]);
    let fragment = &set.fragments()[&variant];
    assert_eq!(fragment.name(), variant);
    assert!(fragment.variables().is_empty());
    let printed_field = field(fragment.selections(), "friendsByOffset");
    assert_eq!(printed_field.argument("limit"), Some(&Value::Int("5".to_string())));
}

#[test]
fn defaults_bind_when_with_is_absent() {
    let documents = format!("{SIZED_FRIENDS} query Q {{ viewer {{ ...Friends }} }}");
    let set = merge_set(&documents, "Q");
    let variant = format!("Friends_{}", short_hash("size: 10"));
    assert!(set.fragments().contains_key(&variant));
}

#[test]
fn fragments_without_arguments_keep_their_name() {
    let documents = format!("{USER_NAME} query Q {{ viewer {{ ...UserName }} }}");
    let set = merge_set(&documents, "Q");
    assert_eq!(set.fragments().keys().collect::<Vec<_>>(), vec!["UserName"]);
}

#[test]
fn untyped_fragment_argument_is_invalid() {
    let err = merge(
        r#"
        fragment Broken on User @arguments(size: { default: 1 }) {
            id
        }

        query Q {
            viewer {
                ...Broken
            }
        }
        "#,
        "Broken",
    )
    .unwrap_err();
    assert_eq!(
        err,
        MergeError::InvalidFragmentArgument {
            document: "Broken".to_string(),
            argument: "size".to_string(),
        },
    );
}

// =============================================================================
// Variables
// =============================================================================

#[test]
fn variables_used_only_by_internal_directives_are_stripped() {
    let merged = merge(
        r#"
        query Q($id: ID, $count: Int, $unused: Int) {
            user(id: $id) @loading(count: $count) {
                name
            }
        }
        "#,
        "Q",
    )
    .unwrap();
    assert_eq!(merged.document().strip_variables(), &["count"]);
}
