use crate::document::Argument;
use crate::document::Directive;
use crate::document::Value;
use graphql_parser::query as ast;

/// `(named type, modifiers)` of a type annotation, modifiers innermost
/// first as `wrap_type` reads them.
pub(crate) fn type_parts(ty: &ast::Type<'static, String>) -> (String, String) {
    match ty {
        ast::Type::NamedType(name) => (name.clone(), String::new()),
        ast::Type::ListType(inner) => {
            let (name, modifiers) = type_parts(inner);
            (name, modifiers + "]")
        },
        ast::Type::NonNullType(inner) => {
            let (name, modifiers) = type_parts(inner);
            (name, modifiers + "!")
        },
    }
}

pub(crate) fn value_from_ast(value: &ast::Value<'static, String>) -> Value {
    match value {
        ast::Value::Boolean(b) => Value::Boolean(*b),
        ast::Value::Enum(name) => Value::Enum(name.clone()),
        ast::Value::Float(f) if f.fract() == 0.0 && f.is_finite() => {
            Value::Float(format!("{f:.1}"))
        },
        ast::Value::Float(f) => Value::Float(f.to_string()),
        ast::Value::Int(n) => Value::Int(n.as_i64().map(|n| n.to_string()).unwrap_or_default()),
        ast::Value::List(items) => Value::List(items.iter().map(value_from_ast).collect()),
        ast::Value::Null => Value::Null,
        ast::Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), value_from_ast(value)))
                .collect(),
        ),
        ast::Value::String(s) => Value::String(s.clone()),
        ast::Value::Variable(name) => Value::Variable(name.clone()),
    }
}

pub(crate) fn arguments_from_ast(
    arguments: &[(String, ast::Value<'static, String>)],
) -> Vec<Argument> {
    arguments
        .iter()
        .map(|(name, value)| Argument::new(name.clone(), value_from_ast(value)))
        .collect()
}

pub(crate) fn directives_from_ast(
    directives: &[ast::Directive<'static, String>],
) -> Vec<Directive> {
    directives
        .iter()
        .map(|directive| {
            Directive::new(directive.name.clone(), arguments_from_ast(&directive.arguments))
        })
        .collect()
}
