use crate::document::merge_directives;
use crate::document::FieldSelection;
use crate::document::InlineFragment;
use crate::document::Selection;
use crate::merge::selection_set::merge_field;
use crate::schema::SchemaIndex;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// The per-type view of a selection set that branches on an abstract type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AbstractSelection {
    /// Branch type → every field a record of that type receives: the
    /// common fields, fields of each branch on a supertype, and the
    /// branch's own fields.
    pub fields: BTreeMap<String, Vec<Selection>>,
    /// Concrete type without a branch of its own → the branch it is read
    /// through.
    pub type_map: BTreeMap<String, String>,
}

/// Splits a merged selection set into per-type field lists. `None` when
/// the set does not branch on any type other than `parent_type`.
pub fn abstract_selection(
    schema: &SchemaIndex,
    parent_type: &str,
    selections: &[Selection],
) -> Option<AbstractSelection> {
    let branches: Vec<&InlineFragment> = selections
        .iter()
        .filter_map(|selection| match selection {
            Selection::InlineFragment(inline) => Some(inline),
            _ => None,
        })
        .filter(|inline| {
            inline
                .type_condition()
                .is_some_and(|condition| condition != parent_type)
        })
        .collect();
    if branches.is_empty() {
        return None;
    }
    let common = common_selections(parent_type, selections);

    let mut conditions = BTreeSet::new();
    for branch in &branches {
        branch_conditions(branch, &mut conditions);
    }
    conditions.remove(parent_type);

    let mut fields = BTreeMap::new();
    for target in &conditions {
        let mut contributions = common.clone();
        for branch in &branches {
            collect_covering(schema, target, branch, &mut contributions);
        }
        fields.insert(target.clone(), merge_selection_lists(contributions));
    }

    let mut concrete_types = schema.possible_concrete_types(parent_type);
    for condition in &conditions {
        concrete_types.extend(schema.possible_concrete_types(condition));
    }
    let mut type_map = BTreeMap::new();
    for concrete in concrete_types {
        if conditions.contains(&concrete) {
            continue;
        }
        let nearest = conditions
            .iter()
            .filter(|condition| schema.is_abstract(condition))
            .map(|condition| (schema.possible_concrete_types(condition), condition))
            .filter(|(members, _)| members.contains(&concrete))
            .min_by(|(a, a_name), (b, b_name)| a.len().cmp(&b.len()).then(a_name.cmp(b_name)))
            .map(|(_, condition)| condition.clone());
        if let Some(nearest) = nearest {
            type_map.insert(concrete, nearest);
        }
    }

    Some(AbstractSelection { fields, type_map })
}

/// The type conditions of `branch` and of every branch nested in it.
fn branch_conditions(branch: &InlineFragment, out: &mut BTreeSet<String>) {
    if let Some(condition) = branch.type_condition() {
        out.insert(condition.to_string());
    }
    for selection in branch.selections() {
        if let Selection::InlineFragment(nested) = selection {
            branch_conditions(nested, out);
        }
    }
}

/// Adds the fields of `branch` (and of branches nested in it) whose type
/// condition covers `target`.
fn collect_covering(
    schema: &SchemaIndex,
    target: &str,
    branch: &InlineFragment,
    out: &mut Vec<Selection>,
) {
    let covers = branch
        .type_condition()
        .is_none_or(|condition| schema.is_supertype_of(condition, target));
    if !covers {
        return;
    }
    for selection in branch.selections() {
        match selection {
            Selection::Field(_) => out.push(selection.clone()),
            Selection::InlineFragment(nested) => collect_covering(schema, target, nested, out),
            Selection::FragmentSpread(_) => (),
        }
    }
}

/// Fields every record of `parent_type` receives: the set's own fields plus
/// those of inline fragments that do not narrow the type.
pub(crate) fn common_selections(parent_type: &str, selections: &[Selection]) -> Vec<Selection> {
    let mut common = vec![];
    let mut widened = false;
    for selection in selections {
        match selection {
            Selection::Field(_) => common.push(selection.clone()),
            Selection::InlineFragment(inline)
                if inline
                    .type_condition()
                    .is_none_or(|condition| condition == parent_type) =>
            {
                widened = true;
                common.extend(
                    inline
                        .selections()
                        .iter()
                        .filter(|child| matches!(child, Selection::Field(_)))
                        .cloned(),
                );
            },
            Selection::InlineFragment(_) | Selection::FragmentSpread(_) => (),
        }
    }
    if widened {
        common = merge_selection_lists(common);
    }
    common
}

/// Merges selections that were flattened separately: fields by response
/// key (recursively), branches by type condition, spreads by name. The
/// result is sorted.
pub(crate) fn merge_selection_lists(selections: Vec<Selection>) -> Vec<Selection> {
    let mut fields: IndexMap<String, FieldSelection> = IndexMap::new();
    let mut branches: IndexMap<String, InlineFragment> = IndexMap::new();
    let mut spreads = IndexMap::new();
    for selection in selections {
        match selection {
            Selection::Field(field) => match fields.get_mut(field.response_key()) {
                Some(existing) => merge_field(existing, field),
                None => {
                    fields.insert(field.response_key().to_string(), field);
                },
            },
            Selection::InlineFragment(inline) => {
                let key = inline.type_condition().unwrap_or_default().to_string();
                match branches.get_mut(&key) {
                    Some(existing) => {
                        existing.selections.extend(inline.selections);
                        merge_directives(&mut existing.directives, inline.directives);
                        existing.visible |= inline.visible;
                    },
                    None => {
                        branches.insert(key, inline);
                    },
                }
            },
            Selection::FragmentSpread(spread) => {
                spreads
                    .entry(spread.printed_name().to_string())
                    .or_insert(spread);
            },
        }
    }
    fields.sort_keys();
    branches.sort_keys();
    spreads.sort_keys();

    let mut merged = Vec::with_capacity(fields.len() + branches.len() + spreads.len());
    for (_, mut field) in fields {
        field.selections = merge_selection_lists(std::mem::take(&mut field.selections));
        merged.push(Selection::Field(field));
    }
    for (_, mut branch) in branches {
        branch.selections = merge_selection_lists(std::mem::take(&mut branch.selections));
        merged.push(Selection::InlineFragment(branch));
    }
    merged.extend(spreads.into_values().map(Selection::FragmentSpread));
    merged
}
