use crate::document::parse_type_string;
use crate::document::sorted_arguments;
use crate::document::Argument;
use crate::document::Directive;
use crate::document::Document;
use crate::document::OperationVariable;
use crate::document::Selection;
use crate::document::Value;
use crate::hash::short_hash;
use crate::merge::MergeError;
use std::collections::BTreeSet;
use std::collections::HashMap;

/// Reads `@arguments(name: {type: "T", default: v})` off a fragment
/// definition.
pub(crate) fn declared_arguments(
    document: &Document,
) -> Result<Vec<OperationVariable>, MergeError> {
    let Some(directive) = document.directive("arguments") else {
        return Ok(vec![]);
    };
    let mut declared = Vec::with_capacity(directive.arguments().len());
    for argument in directive.arguments() {
        let invalid = || MergeError::InvalidFragmentArgument {
            document: document.name().to_string(),
            argument: argument.name().to_string(),
        };
        let annotation = argument
            .value()
            .object_field("type")
            .and_then(Value::as_str)
            .ok_or_else(invalid)?;
        let (type_name, type_modifiers) = parse_type_string(annotation).ok_or_else(invalid)?;
        let default = argument.value().object_field("default").cloned();
        declared.push(OperationVariable::new(
            argument.name(),
            type_name,
            type_modifiers,
            default,
        ));
    }
    Ok(declared)
}

/// Binds a spread's `@with` arguments, falling back to declared defaults.
/// Arguments with neither are left out.
pub(crate) fn bind(declared: &[OperationVariable], with: Option<&Directive>) -> Vec<Argument> {
    let mut bound: Vec<Argument> = declared
        .iter()
        .filter_map(|variable| {
            let value = with
                .and_then(|with| with.argument(variable.name()))
                .or(variable.default_value())?;
            Some(Argument::new(variable.name(), value.clone()))
        })
        .collect();
    bound.sort_by(|a, b| a.name().cmp(b.name()));
    bound
}

/// `F_<hash>`, where the hash covers the sorted `name: value` list.
pub(crate) fn variant_name(fragment: &str, bound: &[Argument]) -> String {
    let signature: Vec<String> = sorted_arguments(bound)
        .into_iter()
        .map(|arg| format!("{}: {}", arg.name(), arg.value()))
        .collect();
    format!("{fragment}_{}", short_hash(&signature.join(", ")))
}

/// Replaces fragment-argument variables with their bound values. Arguments
/// that still name an unbound fragment argument are removed.
pub(crate) fn substitute_selections(
    selections: &mut [Selection],
    bindings: &HashMap<String, Value>,
    unbound: &BTreeSet<String>,
) {
    for selection in selections {
        match selection {
            Selection::Field(field) => {
                substitute_arguments(&mut field.arguments, bindings, unbound);
                substitute_directives(&mut field.directives, bindings, unbound);
                substitute_selections(&mut field.selections, bindings, unbound);
            },
            Selection::InlineFragment(inline) => {
                substitute_directives(&mut inline.directives, bindings, unbound);
                substitute_selections(&mut inline.selections, bindings, unbound);
            },
            Selection::FragmentSpread(spread) => {
                substitute_directives(&mut spread.directives, bindings, unbound);
                if let Some(variant) = &mut spread.variant {
                    substitute_arguments(&mut variant.arguments, bindings, unbound);
                    variant.name = variant_name(&spread.fragment_name, &variant.arguments);
                }
            },
        }
    }
}

fn substitute_directives(
    directives: &mut [Directive],
    bindings: &HashMap<String, Value>,
    unbound: &BTreeSet<String>,
) {
    for directive in directives {
        substitute_arguments(&mut directive.arguments, bindings, unbound);
    }
}

fn substitute_arguments(
    arguments: &mut Vec<Argument>,
    bindings: &HashMap<String, Value>,
    unbound: &BTreeSet<String>,
) {
    arguments.retain(|arg| {
        arg.value()
            .as_variable()
            .is_none_or(|name| !unbound.contains(name))
    });
    for argument in arguments {
        if let Some(value) = &argument.value {
            argument.value = Some(value.substitute(bindings));
        }
    }
}
