use crate::document::directive::find_directive;
use crate::document::Directive;
use crate::document::DocumentKind;
use crate::document::OperationVariable;
use crate::document::Selection;
use std::collections::BTreeSet;

/// A named operation or fragment, reconstructed from the store.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub(crate) directives: Vec<Directive>,
    pub(crate) id: i64,
    pub(crate) kind: DocumentKind,
    pub(crate) name: String,
    pub(crate) referenced_fragments: Vec<String>,
    pub(crate) selections: Vec<Selection>,
    pub(crate) strip_variables: Vec<String>,
    pub(crate) type_condition: Option<String>,
    pub(crate) variables: Vec<OperationVariable>,
}
impl Document {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        kind: DocumentKind,
        type_condition: Option<String>,
    ) -> Self {
        Self {
            directives: vec![],
            id,
            kind,
            name: name.into(),
            referenced_fragments: vec![],
            selections: vec![],
            strip_variables: vec![],
            type_condition,
            variables: vec![],
        }
    }

    pub fn directive(&self, name: &str) -> Option<&Directive> {
        find_directive(&self.directives, name)
    }

    pub fn directives(&self) -> &[Directive] {
        self.directives.as_slice()
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Names of the fragments spread directly by this document, sorted.
    pub fn referenced_fragments(&self) -> &[String] {
        self.referenced_fragments.as_slice()
    }

    pub fn selections(&self) -> &[Selection] {
        self.selections.as_slice()
    }

    /// Variables that are only used by internal directives and are left
    /// out of the printed variable list.
    pub fn strip_variables(&self) -> &[String] {
        self.strip_variables.as_slice()
    }

    pub fn type_condition(&self) -> Option<&str> {
        self.type_condition.as_deref()
    }

    pub fn variable(&self, name: &str) -> Option<&OperationVariable> {
        self.variables.iter().find(|var| var.name() == name)
    }

    pub fn variables(&self) -> &[OperationVariable] {
        self.variables.as_slice()
    }

    /// Recomputes `referenced_fragments` from the spreads in the tree.
    pub(crate) fn refresh_referenced_fragments(&mut self) {
        let mut names = BTreeSet::new();
        collect_spread_names(&self.selections, &mut names);
        self.referenced_fragments = names.into_iter().collect();
    }
}

fn collect_spread_names(selections: &[Selection], names: &mut BTreeSet<String>) {
    for selection in selections {
        if let Selection::FragmentSpread(spread) = selection {
            names.insert(spread.fragment_name().to_string());
        }
        collect_spread_names(selection.selections(), names);
    }
}
