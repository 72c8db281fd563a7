use crate::document::Directive;
use crate::document::FieldSelection;
use crate::document::FragmentSpread;
use crate::document::InlineFragment;

/// The `selections.kind` column.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SelectionKind {
    Field,
    Fragment,
    InlineFragment,
}
impl SelectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionKind::Field => "field",
            SelectionKind::Fragment => "fragment",
            SelectionKind::InlineFragment => "inline_fragment",
        }
    }

    pub fn parse(kind: &str) -> Option<Self> {
        Some(match kind {
            "field" => SelectionKind::Field,
            "fragment" => SelectionKind::Fragment,
            "inline_fragment" => SelectionKind::InlineFragment,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(FieldSelection),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}
impl Selection {
    pub fn directives(&self) -> &[Directive] {
        match self {
            Selection::Field(field) => field.directives(),
            Selection::FragmentSpread(spread) => spread.directives(),
            Selection::InlineFragment(inline) => inline.directives(),
        }
    }

    /// See [`FieldSelection::inlined`].
    pub fn inlined(&self) -> bool {
        match self {
            Selection::Field(field) => field.inlined,
            Selection::FragmentSpread(spread) => spread.inlined,
            Selection::InlineFragment(inline) => inline.inlined,
        }
    }

    pub fn kind(&self) -> SelectionKind {
        match self {
            Selection::Field(_) => SelectionKind::Field,
            Selection::FragmentSpread(_) => SelectionKind::Fragment,
            Selection::InlineFragment(_) => SelectionKind::InlineFragment,
        }
    }

    pub fn selections(&self) -> &[Selection] {
        match self {
            Selection::Field(field) => field.selections(),
            Selection::FragmentSpread(_) => &[],
            Selection::InlineFragment(inline) => inline.selections(),
        }
    }

    pub(crate) fn set_visible_deep(&mut self, visible: bool) {
        let children = match self {
            Selection::Field(field) => {
                field.visible = visible;
                &mut field.selections
            },
            Selection::FragmentSpread(spread) => {
                spread.visible = visible;
                return;
            },
            Selection::InlineFragment(inline) => {
                inline.visible = visible;
                &mut inline.selections
            },
        };
        for child in children {
            child.set_visible_deep(visible);
        }
    }

    pub(crate) fn mark_inlined_deep(&mut self) {
        let children = match self {
            Selection::Field(field) => {
                field.inlined = true;
                &mut field.selections
            },
            Selection::FragmentSpread(spread) => {
                spread.inlined = true;
                return;
            },
            Selection::InlineFragment(inline) => {
                inline.inlined = true;
                &mut inline.selections
            },
        };
        for child in children {
            child.mark_inlined_deep();
        }
    }

    /// Marks every spread in this subtree as having arrived through
    /// another fragment.
    pub(crate) fn mark_spreads_nested(&mut self) {
        match self {
            Selection::Field(field) => {
                for child in &mut field.selections {
                    child.mark_spreads_nested();
                }
            },
            Selection::FragmentSpread(spread) => spread.nested = true,
            Selection::InlineFragment(inline) => {
                for child in &mut inline.selections {
                    child.mark_spreads_nested();
                }
            },
        }
    }

    /// Calls `f` for every directive in this subtree, depth-first.
    pub(crate) fn visit_directives<'a>(&'a self, f: &mut impl FnMut(&'a Directive)) {
        for directive in self.directives() {
            f(directive);
        }
        for child in self.selections() {
            child.visit_directives(f);
        }
    }
}
