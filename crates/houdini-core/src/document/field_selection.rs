use crate::document::directive::find_directive;
use crate::document::Argument;
use crate::document::Directive;
use crate::document::Selection;
use crate::document::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct FieldSelection {
    pub(crate) alias: Option<String>,
    pub(crate) arguments: Vec<Argument>,
    pub(crate) directives: Vec<Directive>,
    pub(crate) field_name: String,
    pub(crate) inlined: bool,
    pub(crate) selections: Vec<Selection>,
    pub(crate) visible: bool,
}
impl FieldSelection {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            alias: None,
            arguments: vec![],
            directives: vec![],
            field_name: field_name.into(),
            inlined: false,
            selections: vec![],
            visible: true,
        }
    }

    /// A field added by the merger (keys, `__typename`, connection
    /// plumbing) rather than authored in a document.
    pub(crate) fn injected(field_name: impl Into<String>) -> Self {
        Self {
            visible: false,
            ..Self::new(field_name)
        }
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments
            .iter()
            .find(|arg| arg.name() == name)
            .map(|arg| arg.value())
    }

    pub fn arguments(&self) -> &[Argument] {
        self.arguments.as_slice()
    }

    pub fn directive(&self, name: &str) -> Option<&Directive> {
        find_directive(&self.directives, name)
    }

    pub fn directives(&self) -> &[Directive] {
        self.directives.as_slice()
    }

    pub fn field_name(&self) -> &str {
        self.field_name.as_str()
    }

    /// True when the field only exists here because a fragment's contents
    /// were inlined. Such fields are printed inside the fragment instead.
    pub fn inlined(&self) -> bool {
        self.inlined
    }

    /**
     * If an alias was specified for this selection, return the alias.
     * Otherwise return the name of the field.
     */
    pub fn response_key(&self) -> &str {
        self.alias().unwrap_or(self.field_name.as_str())
    }

    pub fn selections(&self) -> &[Selection] {
        self.selections.as_slice()
    }

    /// False when the field only reaches this selection set through a
    /// masked fragment or key injection.
    pub fn visible(&self) -> bool {
        self.visible
    }
}
