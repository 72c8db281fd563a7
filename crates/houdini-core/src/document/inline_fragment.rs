use crate::document::Directive;
use crate::document::Selection;

#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub(crate) directives: Vec<Directive>,
    pub(crate) inlined: bool,
    pub(crate) selections: Vec<Selection>,
    pub(crate) type_condition: Option<String>,
    pub(crate) visible: bool,
}
impl InlineFragment {
    pub fn new(type_condition: Option<String>, selections: Vec<Selection>) -> Self {
        Self {
            directives: vec![],
            inlined: false,
            selections,
            type_condition,
            visible: true,
        }
    }

    pub fn directives(&self) -> &[Directive] {
        self.directives.as_slice()
    }

    pub fn inlined(&self) -> bool {
        self.inlined
    }

    pub fn selections(&self) -> &[Selection] {
        self.selections.as_slice()
    }

    pub fn type_condition(&self) -> Option<&str> {
        self.type_condition.as_deref()
    }

    pub fn visible(&self) -> bool {
        self.visible
    }
}
