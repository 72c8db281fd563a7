use crate::document::arguments_equal;
use crate::document::merge_directives;
use crate::document::Document;
use crate::document::FieldSelection;
use crate::document::FragmentSpread;
use crate::document::FragmentVariant;
use crate::document::InlineFragment;
use crate::document::Selection;
use crate::merge::fragment_arguments;
use crate::merge::fragment_graph::normalize_cycle;
use crate::merge::merger::PreparedDocument;
use crate::merge::ComponentFields;
use crate::merge::MergeError;
use crate::merge::MergeOptions;
use crate::schema::SchemaIndex;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;

/// Where a selection set sits. Decides which bookkeeping fields get
/// injected into it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SetPosition {
    /// The selection set of an inline fragment that could not be hoisted.
    Branch,
    /// Below a field.
    Field,
    FragmentRoot,
    OperationRoot,
}

/// Flattens the selection sets of one document.
pub(crate) struct SelectionFlattener<'a> {
    pub(crate) component_fields: &'a ComponentFields,
    pub(crate) document: &'a str,
    pub(crate) expanding: Vec<String>,
    pub(crate) options: MergeOptions,
    pub(crate) prepared: &'a BTreeMap<String, Result<PreparedDocument, MergeError>>,
    pub(crate) schema: &'a SchemaIndex,
}
impl<'a> SelectionFlattener<'a> {
    pub(crate) fn flatten(
        &mut self,
        parent_type: &str,
        selections: Vec<Selection>,
        position: SetPosition,
    ) -> Result<Vec<Selection>, MergeError> {
        let mut expanded = Vec::with_capacity(selections.len());
        self.expand(parent_type, selections, &mut expanded)?;
        let mut grouped = self.group(expanded)?;
        self.inject_keys(parent_type, position, &mut grouped.fields);

        for field in grouped.fields.values_mut() {
            let definition = self.schema.field(parent_type, field.field_name()).ok_or_else(|| {
                MergeError::UnknownField {
                    document: self.document.to_string(),
                    field: field.field_name().to_string(),
                    parent_type: parent_type.to_string(),
                }
            })?;
            if self.schema.is_composite(definition.type_name()) {
                let field_type = definition.type_name().to_string();
                let children = std::mem::take(&mut field.selections);
                field.selections = self.flatten(&field_type, children, SetPosition::Field)?;
            }
        }
        for branch in grouped.branches.values_mut() {
            let condition = branch
                .type_condition()
                .unwrap_or(parent_type)
                .to_string();
            let children = std::mem::take(&mut branch.selections);
            branch.selections = self.flatten(&condition, children, SetPosition::Branch)?;
        }

        if self.options.sort_keys {
            grouped.fields.sort_keys();
            grouped.branches.sort_keys();
            grouped.spreads.sort_keys();
        }
        Ok(grouped.into_selections())
    }

    /// Replaces component fields with their spreads, dissolves hoistable
    /// inline fragments and inlines the contents of every spread.
    fn expand(
        &mut self,
        parent_type: &str,
        selections: Vec<Selection>,
        out: &mut Vec<Selection>,
    ) -> Result<(), MergeError> {
        for selection in selections {
            match selection {
                Selection::Field(field) => {
                    if self.schema.field(parent_type, field.field_name()).is_some() {
                        out.push(Selection::Field(field));
                        continue;
                    }
                    let Some(component) =
                        self.component_fields
                            .lookup(self.schema, parent_type, field.field_name())
                    else {
                        return Err(MergeError::UnknownField {
                            document: self.document.to_string(),
                            field: field.field_name().to_string(),
                            parent_type: parent_type.to_string(),
                        });
                    };
                    let mut spread = FragmentSpread::new(component.fragment());
                    spread.component_field = Some(component.field().to_string());
                    spread.directives = field.directives;
                    spread.inlined = field.inlined;
                    spread.visible = field.visible;
                    self.expand_spread(parent_type, spread, out)?;
                },
                Selection::InlineFragment(inline) => {
                    if let Some(condition) = inline.type_condition() {
                        if !self.schema.has_type(condition) {
                            return Err(MergeError::UnknownType {
                                document: self.document.to_string(),
                                type_name: condition.to_string(),
                            });
                        }
                    }
                    let covers_parent = inline
                        .type_condition()
                        .is_none_or(|condition| {
                            self.schema.is_supertype_of(condition, parent_type)
                        });
                    let only_internal = inline
                        .directives()
                        .iter()
                        .all(|directive| self.schema.is_internal_directive(directive.name()));
                    if covers_parent && only_internal {
                        self.expand(parent_type, inline.selections, out)?;
                    } else {
                        out.push(Selection::InlineFragment(inline));
                    }
                },
                Selection::FragmentSpread(spread) => self.expand_spread(parent_type, spread, out)?,
            }
        }
        Ok(())
    }

    fn expand_spread(
        &mut self,
        parent_type: &str,
        mut spread: FragmentSpread,
        out: &mut Vec<Selection>,
    ) -> Result<(), MergeError> {
        let name = spread.fragment_name().to_string();
        if let Some(start) = self.expanding.iter().position(|entry| *entry == name) {
            let mut cycle = self.expanding[start..].to_vec();
            cycle.push(name);
            return Err(MergeError::FragmentCycle {
                document: self.document.to_string(),
                cycle_path: normalize_cycle(&cycle),
            });
        }
        let fragment = self.fragment(&name)?;

        let bound = fragment_arguments::bind(fragment.variables(), spread.directive("with"));
        if !bound.is_empty() && spread.variant.is_none() {
            spread.variant = Some(FragmentVariant {
                name: fragment_arguments::variant_name(&name, &bound),
                arguments: bound.clone(),
            });
        }
        let bindings: HashMap<_, _> = bound
            .iter()
            .map(|arg| (arg.name().to_string(), arg.value().clone()))
            .collect();
        let unbound: BTreeSet<String> = fragment
            .variables()
            .iter()
            .map(|variable| variable.name().to_string())
            .filter(|name| !bindings.contains_key(name))
            .collect();

        let masked = if spread.directive("mask_enable").is_some() {
            true
        } else if spread.directive("mask_disable").is_some() {
            false
        } else {
            self.options.default_fragment_masking
        };
        let hidden = masked || !spread.visible();

        let mut content = fragment.selections.clone();
        fragment_arguments::substitute_selections(&mut content, &bindings, &unbound);
        for selection in &mut content {
            selection.mark_spreads_nested();
            selection.mark_inlined_deep();
            if hidden {
                selection.set_visible_deep(false);
            }
        }

        let condition = fragment
            .type_condition()
            .unwrap_or(parent_type)
            .to_string();
        if !self.schema.has_type(&condition) {
            return Err(MergeError::UnknownType {
                document: self.document.to_string(),
                type_name: condition,
            });
        }

        self.expanding.push(name);
        let expanded = if self.schema.is_supertype_of(&condition, parent_type) {
            self.expand(parent_type, content, out)
        } else {
            let mut inner = Vec::with_capacity(content.len());
            self.expand(&condition, content, &mut inner).map(|()| {
                let mut inline = InlineFragment::new(Some(condition), inner);
                inline.inlined = true;
                inline.visible = !hidden;
                out.push(Selection::InlineFragment(inline));
            })
        };
        self.expanding.pop();
        expanded?;

        if !spread.nested() || spread.component_field().is_some() {
            out.push(Selection::FragmentSpread(spread));
        }
        Ok(())
    }

    fn fragment(&self, name: &str) -> Result<&'a Document, MergeError> {
        match self.prepared.get(name) {
            Some(Ok(prepared)) if prepared.document.kind().is_operation() => {
                Err(MergeError::UnknownFragment {
                    document: self.document.to_string(),
                    fragment: name.to_string(),
                })
            },
            Some(Ok(prepared)) => Ok(&prepared.document),
            Some(Err(err)) => Err(err.clone()),
            None => Err(MergeError::UnknownFragment {
                document: self.document.to_string(),
                fragment: name.to_string(),
            }),
        }
    }

    fn group(&self, selections: Vec<Selection>) -> Result<GroupedSelections, MergeError> {
        let mut grouped = GroupedSelections::default();
        for selection in selections {
            match selection {
                Selection::Field(field) => {
                    let key = field.response_key().to_string();
                    let Some(existing) = grouped.fields.get_mut(&key) else {
                        grouped.fields.insert(key, field);
                        continue;
                    };
                    if existing.field_name() != field.field_name()
                        || !arguments_equal(existing.arguments(), field.arguments())
                    {
                        return Err(MergeError::ConflictingSelections {
                            document: self.document.to_string(),
                            response_key: key,
                        });
                    }
                    merge_field(existing, field);
                },
                Selection::InlineFragment(inline) => {
                    let key = branch_key(&inline);
                    match grouped.branches.get_mut(&key) {
                        Some(existing) => {
                            existing.selections.extend(inline.selections);
                            merge_directives(&mut existing.directives, inline.directives);
                            existing.inlined &= inline.inlined;
                            existing.visible |= inline.visible;
                        },
                        None => {
                            grouped.branches.insert(key, inline);
                        },
                    }
                },
                Selection::FragmentSpread(spread) => {
                    let key = spread.printed_name().to_string();
                    match grouped.spreads.get_mut(&key) {
                        Some(existing) => {
                            merge_directives(&mut existing.directives, spread.directives);
                            if existing.component_field.is_none() {
                                existing.component_field = spread.component_field;
                            }
                            existing.inlined &= spread.inlined;
                            existing.nested &= spread.nested;
                            existing.visible |= spread.visible;
                        },
                        None => {
                            grouped.spreads.insert(key, spread);
                        },
                    }
                },
            }
        }
        Ok(grouped)
    }

    fn inject_keys(
        &self,
        parent_type: &str,
        position: SetPosition,
        fields: &mut IndexMap<String, FieldSelection>,
    ) {
        if !self.schema.is_composite(parent_type) {
            return;
        }
        if matches!(position, SetPosition::Field | SetPosition::FragmentRoot)
            && !fields.contains_key("__typename")
        {
            fields.insert(
                "__typename".to_string(),
                FieldSelection::injected("__typename"),
            );
        }
        if position == SetPosition::OperationRoot {
            return;
        }
        for key in self.schema.keys_for(parent_type) {
            if !fields.contains_key(&key) {
                fields.insert(key.clone(), FieldSelection::injected(key));
            }
        }
    }
}

/// Folds `incoming` into `existing`. Both select the same field with the
/// same arguments.
pub(crate) fn merge_field(existing: &mut FieldSelection, incoming: FieldSelection) {
    existing.selections.extend(incoming.selections);
    merge_directives(&mut existing.directives, incoming.directives);
    existing.inlined &= incoming.inlined;
    existing.visible |= incoming.visible;
}

fn branch_key(inline: &InlineFragment) -> String {
    let mut key = inline.type_condition().unwrap_or_default().to_string();
    for directive in inline.directives() {
        key.push(' ');
        key.push_str(&directive.signature());
    }
    key
}

#[derive(Default)]
struct GroupedSelections {
    branches: IndexMap<String, InlineFragment>,
    fields: IndexMap<String, FieldSelection>,
    spreads: IndexMap<String, FragmentSpread>,
}
impl GroupedSelections {
    fn into_selections(self) -> Vec<Selection> {
        let mut selections =
            Vec::with_capacity(self.fields.len() + self.branches.len() + self.spreads.len());
        selections.extend(self.fields.into_values().map(Selection::Field));
        selections.extend(self.branches.into_values().map(Selection::InlineFragment));
        selections.extend(self.spreads.into_values().map(Selection::FragmentSpread));
        selections
    }
}
