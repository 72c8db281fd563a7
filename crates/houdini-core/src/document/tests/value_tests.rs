use crate::document::Value;
use crate::document::ValueKind;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::collections::HashMap;

fn object(fields: &[(&str, Value)]) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect(),
    )
}

/// Parses `{ f(a: <literal>) }` and returns the argument's string payload.
fn reparse_string_literal(literal: &str) -> String {
    let source = format!("{{ f(a: {literal}) }}");
    let document = graphql_parser::parse_query::<String>(&source).unwrap();
    let graphql_parser::query::Definition::Operation(
        graphql_parser::query::OperationDefinition::SelectionSet(selection_set),
    ) = &document.definitions[0]
    else {
        panic!("expected an anonymous selection set");
    };
    let graphql_parser::query::Selection::Field(field) = &selection_set.items[0] else {
        panic!("expected a field");
    };
    match &field.arguments[0].1 {
        graphql_parser::query::Value::String(value) => value.clone(),
        other => panic!("expected a string, got {other:?}"),
    }
}

#[test]
fn kind_names_round_trip() {
    for kind in [
        ValueKind::Block,
        ValueKind::Boolean,
        ValueKind::Enum,
        ValueKind::Float,
        ValueKind::Int,
        ValueKind::List,
        ValueKind::Null,
        ValueKind::Object,
        ValueKind::String,
        ValueKind::Variable,
    ] {
        assert_eq!(ValueKind::parse(kind.as_str()), Some(kind));
    }
    assert_eq!(ValueKind::parse("Tuple"), None);
}

#[test]
fn scalar_rebuilds_leaf_values_only() {
    assert_eq!(Value::scalar(ValueKind::Int, "10"), Some(Value::Int("10".to_string())));
    assert_eq!(Value::scalar(ValueKind::Boolean, "true"), Some(Value::Boolean(true)));
    assert_eq!(Value::scalar(ValueKind::Null, ""), Some(Value::Null));
    assert_eq!(Value::scalar(ValueKind::List, ""), None);
    assert_eq!(Value::scalar(ValueKind::Object, ""), None);
}

#[test]
fn display_prints_graphql_literals() {
    let value = Value::List(vec![
        Value::Int("1".to_string()),
        Value::Float("1.50".to_string()),
        Value::Enum("ASC".to_string()),
        Value::Null,
        Value::Variable("id".to_string()),
        object(&[
            ("b", Value::Boolean(false)),
            ("a", Value::String("x".to_string())),
        ]),
    ]);
    assert_eq!(value.to_string(), r#"[1, 1.50, ASC, null, $id, {b: false, a: "x"}]"#);
}

#[test]
fn display_escapes_strings() {
    let value = Value::String("say \"hi\"\n\tback\\slash\u{1}".to_string());
    assert_eq!(value.to_string(), r#""say \"hi\"\n\tback\\slash\u0001""#);
}

#[test]
fn display_spells_backspace_as_a_unicode_escape() {
    let value = Value::String("a\u{8}b".to_string());
    assert_eq!(value.to_string(), r#""a\u0008b""#);
}

#[test]
fn canonical_sorts_object_fields_recursively() {
    let value = object(&[
        ("z", Value::Int("1".to_string())),
        ("a", Value::List(vec![object(&[
            ("y", Value::Null),
            ("b", Value::Null),
        ])])),
    ]);
    assert_eq!(value.canonical().to_string(), "{a: [{b: null, y: null}], z: 1}");
}

#[test]
fn structural_equality_ignores_field_order() {
    let left = object(&[("a", Value::Int("1".to_string())), ("b", Value::Null)]);
    let right = object(&[("b", Value::Null), ("a", Value::Int("1".to_string()))]);
    assert!(left.structurally_eq(&right));
    assert_ne!(left, right);

    let different = object(&[("a", Value::Int("2".to_string())), ("b", Value::Null)]);
    assert!(!left.structurally_eq(&different));
}

#[test]
fn collect_variables_walks_containers() {
    let value = object(&[
        ("first", Value::Variable("first".to_string())),
        ("nested", Value::List(vec![
            Value::Variable("after".to_string()),
            Value::Variable("first".to_string()),
        ])),
    ]);
    let mut variables = BTreeSet::new();
    value.collect_variables(&mut variables);
    assert_eq!(variables.into_iter().collect::<Vec<_>>(), vec!["after", "first"]);
}

#[test]
fn substitute_replaces_bound_variables_only() {
    let value = Value::List(vec![
        Value::Variable("bound".to_string()),
        Value::Variable("free".to_string()),
    ]);
    let bindings = HashMap::from([("bound".to_string(), Value::Int("7".to_string()))]);
    assert_eq!(value.substitute(&bindings).to_string(), "[7, $free]");
}

#[test]
fn accessors() {
    assert_eq!(Value::Int("42".to_string()).as_i64(), Some(42));
    assert_eq!(Value::String("42".to_string()).as_i64(), None);
    assert_eq!(Value::Enum("DESC".to_string()).as_str(), Some("DESC"));
    assert_eq!(Value::Variable("id".to_string()).as_variable(), Some("id"));
    assert_eq!(Value::Boolean(true).as_bool(), Some(true));
    let value = object(&[("name", Value::String("hello".to_string()))]);
    assert_eq!(value.object_field("name"), Some(&Value::String("hello".to_string())));
    assert_eq!(value.object_field("missing"), None);
}

const STRING_CHARS: &str = "[ -~\\n\\t\\r\\x01-\\x08\\x0b\\x0c\\x0e-\\x1féß💖]{0,24}";

proptest! {
    /// Whatever a string holds, its printed literal parses back to the same
    /// string.
    #[test]
    fn printed_strings_reparse(s in STRING_CHARS) {
        let printed = Value::String(s.clone()).to_string();
        prop_assert_eq!(reparse_string_literal(&printed), s);
    }
}
