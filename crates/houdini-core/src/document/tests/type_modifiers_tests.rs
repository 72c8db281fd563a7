use crate::document::parse_type_string;
use crate::document::wrap_type;

#[test]
fn wrap_type_applies_modifiers_innermost_first() {
    assert_eq!(wrap_type("String", ""), "String");
    assert_eq!(wrap_type("String", "!"), "String!");
    assert_eq!(wrap_type("String", "]"), "[String]");
    assert_eq!(wrap_type("String", "!]!"), "[String!]!");
    assert_eq!(wrap_type("ID", "]!]"), "[[ID]!]");
}

#[test]
fn parse_type_string_splits_name_and_modifiers() {
    assert_eq!(
        parse_type_string("[ID!]!"),
        Some(("ID".to_string(), "!]!".to_string())),
    );
    assert_eq!(
        parse_type_string("  User "),
        Some(("User".to_string(), String::new())),
    );
    assert_eq!(
        parse_type_string("[[Int]!]"),
        Some(("Int".to_string(), "]!]".to_string())),
    );
}

#[test]
fn parse_type_string_rejects_malformed_annotations() {
    assert_eq!(parse_type_string(""), None);
    assert_eq!(parse_type_string("[ID"), None);
    assert_eq!(parse_type_string("[]"), None);
    assert_eq!(parse_type_string("User Name"), None);
}

#[test]
fn parse_then_wrap_is_identity() {
    for annotation in ["Boolean", "Boolean!", "[Boolean]", "[[Boolean!]!]!"] {
        let (name, modifiers) = parse_type_string(annotation).unwrap();
        assert_eq!(wrap_type(&name, &modifiers), annotation);
    }
}
