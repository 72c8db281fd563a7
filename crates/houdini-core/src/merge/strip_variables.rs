use crate::document::Directive;
use crate::document::Document;
use crate::document::Selection;
use crate::schema::SchemaIndex;
use std::collections::BTreeSet;

/// Declared variables whose every use sits inside an internal directive.
///
/// Unused variables are not stripped; they still print.
pub(crate) fn strip_variables(schema: &SchemaIndex, document: &Document) -> Vec<String> {
    let mut usage = VariableUsage::default();
    for directive in document.directives() {
        usage.visit_directive(schema, directive);
    }
    for variable in document.variables() {
        for directive in variable.directives() {
            usage.visit_directive(schema, directive);
        }
    }
    usage.visit_selections(schema, document.selections());

    document
        .variables()
        .iter()
        .map(|variable| variable.name().to_string())
        .filter(|name| usage.internal.contains(name) && !usage.printed.contains(name))
        .collect()
}

#[derive(Default)]
struct VariableUsage {
    internal: BTreeSet<String>,
    printed: BTreeSet<String>,
}
impl VariableUsage {
    fn visit_directive(&mut self, schema: &SchemaIndex, directive: &Directive) {
        let target = if schema.is_internal_directive(directive.name()) {
            &mut self.internal
        } else {
            &mut self.printed
        };
        for argument in directive.arguments() {
            argument.value().collect_variables(target);
        }
    }

    fn visit_selections(&mut self, schema: &SchemaIndex, selections: &[Selection]) {
        for selection in selections {
            if let Selection::Field(field) = selection {
                for argument in field.arguments() {
                    argument.value().collect_variables(&mut self.printed);
                }
            }
            for directive in selection.directives() {
                self.visit_directive(schema, directive);
            }
            self.visit_selections(schema, selection.selections());
        }
    }
}
