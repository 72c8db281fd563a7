use crate::document::sorted_arguments;
use crate::document::wrap_type;
use crate::document::Argument;
use crate::document::Directive;
use crate::document::Document;
use crate::document::DocumentKind;
use crate::document::OperationVariable;
use crate::document::Selection;
use crate::merge::MergedSet;
use crate::schema::SchemaIndex;

const INDENT: &str = "    ";

/// Prints merged documents as canonical GraphQL text.
///
/// Internal directives and selections that only exist because a fragment
/// was inlined are left out. Runtime scalars print as the scalar they are
/// sent as.
#[derive(Clone, Copy, Debug)]
pub struct Printer<'a> {
    schema: &'a SchemaIndex,
}
impl<'a> Printer<'a> {
    pub fn new(schema: &'a SchemaIndex) -> Self {
        Self { schema }
    }

    /// The document alone, without a trailing newline.
    pub fn print(&self, document: &Document) -> String {
        let mut out = String::new();
        match document.kind() {
            DocumentKind::Fragment => {
                out.push_str(&format!(
                    "fragment {} on {}",
                    document.name(),
                    document.type_condition().unwrap_or(self.schema.query_type()),
                ));
            },
            kind => {
                out.push_str(kind.as_str());
                out.push(' ');
                out.push_str(document.name());
                self.write_variables(&mut out, document);
            },
        }
        self.write_directives(&mut out, document.directives());
        self.write_selection_set(&mut out, document.selections(), 0);
        out
    }

    /// The text an artifact is hashed over: the document followed by every
    /// fragment it reaches, in name order, separated by blank lines.
    pub fn print_set(&self, set: &MergedSet) -> String {
        let mut printed = vec![self.print(set.document().document())];
        printed.extend(set.fragments().values().map(|fragment| self.print(fragment)));
        printed.join("\n\n")
    }

    fn write_variables(&self, out: &mut String, document: &Document) {
        let variables: Vec<&OperationVariable> = document
            .variables()
            .iter()
            .filter(|variable| {
                !document
                    .strip_variables()
                    .iter()
                    .any(|stripped| stripped == variable.name())
            })
            .collect();
        if variables.is_empty() {
            return;
        }
        out.push('(');
        for (index, variable) in variables.into_iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            let type_name = self
                .schema
                .runtime_scalar(variable.type_name())
                .unwrap_or(variable.type_name());
            out.push('$');
            out.push_str(variable.name());
            out.push_str(": ");
            out.push_str(&wrap_type(type_name, variable.type_modifiers()));
            if let Some(default) = variable.default_value() {
                out.push_str(&format!(" = {default}"));
            }
            self.write_directives(out, variable.directives());
        }
        out.push(')');
    }

    fn write_directives(&self, out: &mut String, directives: &[Directive]) {
        for directive in directives {
            if self.schema.is_internal_directive(directive.name()) {
                continue;
            }
            out.push_str(" @");
            out.push_str(directive.name());
            write_arguments(out, directive.arguments());
        }
    }

    fn write_selection_set(&self, out: &mut String, selections: &[Selection], depth: usize) {
        let printed: Vec<&Selection> = selections
            .iter()
            .filter(|selection| !selection.inlined())
            .collect();
        if printed.is_empty() {
            return;
        }
        out.push_str(" {\n");
        for selection in printed {
            self.write_selection(out, selection, depth + 1);
        }
        out.push_str(&INDENT.repeat(depth));
        out.push('}');
    }

    fn write_selection(&self, out: &mut String, selection: &Selection, depth: usize) {
        out.push_str(&INDENT.repeat(depth));
        match selection {
            Selection::Field(field) => {
                if let Some(alias) = field.alias() {
                    out.push_str(alias);
                    out.push_str(": ");
                }
                out.push_str(field.field_name());
                write_arguments(out, field.arguments());
                self.write_directives(out, field.directives());
                self.write_selection_set(out, field.selections(), depth);
            },
            Selection::InlineFragment(inline) => {
                out.push_str("...");
                if let Some(type_condition) = inline.type_condition() {
                    out.push_str(" on ");
                    out.push_str(type_condition);
                }
                self.write_directives(out, inline.directives());
                self.write_selection_set(out, inline.selections(), depth);
            },
            Selection::FragmentSpread(spread) => {
                out.push_str("...");
                out.push_str(spread.printed_name());
                self.write_directives(out, spread.directives());
            },
        }
        out.push('\n');
    }
}

fn write_arguments(out: &mut String, arguments: &[Argument]) {
    if arguments.is_empty() {
        return;
    }
    let printed: Vec<String> = sorted_arguments(arguments)
        .into_iter()
        .map(|arg| format!("{}: {}", arg.name(), arg.value()))
        .collect();
    out.push('(');
    out.push_str(&printed.join(", "));
    out.push(')');
}
