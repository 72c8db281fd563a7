/// Re-applies a `type_modifiers` string to a named type.
///
/// Modifiers are read innermost first: `!` appends a non-null marker and
/// `]` wraps everything so far in a list. `wrap_type("String", "!]!")`
/// yields `[String!]!`.
pub fn wrap_type(type_name: &str, type_modifiers: &str) -> String {
    let mut wrapped = type_name.to_string();
    for modifier in type_modifiers.chars() {
        match modifier {
            '!' => wrapped.push('!'),
            ']' => wrapped = format!("[{wrapped}]"),
            _ => (),
        }
    }
    wrapped
}

/// Splits a type annotation such as `[ID!]!` into its innermost named type
/// and its modifier string (`("ID", "!]!")`).
///
/// Returns `None` when the brackets are unbalanced or the name is empty.
pub fn parse_type_string(annotation: &str) -> Option<(String, String)> {
    let annotation = annotation.trim();
    if let Some(inner) = annotation.strip_suffix('!') {
        let (name, modifiers) = parse_type_string(inner)?;
        return Some((name, modifiers + "!"));
    }
    if let Some(inner) = annotation
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        let (name, modifiers) = parse_type_string(inner)?;
        return Some((name, modifiers + "]"));
    }
    if annotation.is_empty()
        || !annotation.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return None;
    }
    Some((annotation.to_string(), String::new()))
}
