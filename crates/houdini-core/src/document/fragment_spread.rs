use crate::document::directive::find_directive;
use crate::document::Argument;
use crate::document::Directive;

/// A fragment spread bound to concrete argument values through `@with` or
/// `@arguments` defaults. Printed as `...<name>`.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentVariant {
    pub(crate) arguments: Vec<Argument>,
    pub(crate) name: String,
}
impl FragmentVariant {
    pub fn arguments(&self) -> &[Argument] {
        self.arguments.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub(crate) component_field: Option<String>,
    pub(crate) directives: Vec<Directive>,
    pub(crate) fragment_name: String,
    pub(crate) inlined: bool,
    pub(crate) nested: bool,
    pub(crate) variant: Option<FragmentVariant>,
    pub(crate) visible: bool,
}
impl FragmentSpread {
    pub fn new(fragment_name: impl Into<String>) -> Self {
        Self {
            component_field: None,
            directives: vec![],
            fragment_name: fragment_name.into(),
            inlined: false,
            nested: false,
            variant: None,
            visible: true,
        }
    }

    /// Set when the spread stands in for a component field of this name.
    pub fn component_field(&self) -> Option<&str> {
        self.component_field.as_deref()
    }

    pub fn directive(&self, name: &str) -> Option<&Directive> {
        find_directive(&self.directives, name)
    }

    pub fn directives(&self) -> &[Directive] {
        self.directives.as_slice()
    }

    pub fn fragment_name(&self) -> &str {
        self.fragment_name.as_str()
    }

    pub fn inlined(&self) -> bool {
        self.inlined
    }

    /// True for spreads that were not authored in this selection set but
    /// reached it through another fragment's contents.
    pub fn nested(&self) -> bool {
        self.nested
    }

    /// The name this spread prints as.
    pub fn printed_name(&self) -> &str {
        match &self.variant {
            Some(variant) => variant.name(),
            None => self.fragment_name.as_str(),
        }
    }

    pub fn variant(&self) -> Option<&FragmentVariant> {
        self.variant.as_ref()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }
}
