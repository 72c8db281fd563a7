use crate::collect::value_table::ValueTable;
use crate::collect::CollectError;
use crate::document::Argument;
use crate::document::Directive;
use crate::document::Document;
use crate::document::DocumentKind;
use crate::document::FieldSelection;
use crate::document::FragmentSpread;
use crate::document::InlineFragment;
use crate::document::OperationVariable;
use crate::document::Selection;
use crate::document::SelectionKind;
use rusqlite::Row;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct ArgumentRow {
    name: String,
    value: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct DirectiveRow {
    #[serde(default)]
    arguments: Vec<ArgumentRow>,
    name: String,
}

#[derive(Debug)]
struct SelectionNode {
    alias: Option<String>,
    arguments: Vec<Argument>,
    children: Vec<usize>,
    directives: Vec<Directive>,
    field_name: String,
    kind: SelectionKind,
}

/// Accumulates the rows of one collector batch.
///
/// Selections live in a flat arena and reference their children by index.
/// Values are not known while rows stream in: arguments keep only their
/// value id until [`BatchBuilder::finish`] back-patches them from a
/// [`ValueTable`].
#[derive(Debug, Default)]
pub(crate) struct BatchBuilder {
    documents: BTreeMap<i64, Document>,
    node_index: HashMap<(i64, i64), usize>,
    nodes: Vec<SelectionNode>,
    roots: HashMap<i64, Vec<usize>>,
    value_ids: BTreeSet<i64>,
}
impl BatchBuilder {
    pub(crate) fn add_document_row(&mut self, row: &Row<'_>) -> Result<(), CollectError> {
        let id: i64 = row.get(0)?;
        let name: String = row.get(1)?;
        let kind: String = row.get(2)?;
        let type_condition: Option<String> = row.get(3)?;
        let kind = DocumentKind::parse(&kind).ok_or_else(|| {
            CollectError::UnknownDocumentKind {
                document_id: id,
                kind: kind.clone(),
            }
        })?;
        self.documents
            .insert(id, Document::new(id, name, kind, type_condition));
        Ok(())
    }

    pub(crate) fn add_selection_row(&mut self, row: &Row<'_>) -> Result<(), CollectError> {
        let document_id: i64 = row.get(0)?;
        let selection_id: i64 = row.get(1)?;
        let parent_id: Option<i64> = row.get(2)?;
        let field_name: String = row.get(3)?;
        let alias: Option<String> = row.get(4)?;
        let kind: String = row.get(5)?;
        let arguments: String = row.get(6)?;
        let directives: String = row.get(7)?;

        let kind = SelectionKind::parse(&kind).ok_or_else(|| {
            CollectError::UnknownSelectionKind {
                selection_id,
                kind: kind.clone(),
            }
        })?;
        let owner = || format!("selection {selection_id}");
        let arguments = self.arguments(decode(&arguments, "arguments", owner)?);
        let directives = self.directives(decode(&directives, "directives", owner)?);

        let index = self.nodes.len();
        self.nodes.push(SelectionNode {
            alias: alias.filter(|alias| *alias != field_name),
            arguments,
            children: vec![],
            directives,
            field_name,
            kind,
        });
        self.node_index.insert((document_id, selection_id), index);

        match parent_id {
            None => self.roots.entry(document_id).or_default().push(index),
            Some(parent_id) => {
                let parent_index = *self
                    .node_index
                    .get(&(document_id, parent_id))
                    .ok_or(CollectError::MissingParentSelection {
                        document_id,
                        parent_id,
                        selection_id,
                    })?;
                self.nodes[parent_index].children.push(index);
            },
        }
        Ok(())
    }

    pub(crate) fn add_variable_row(&mut self, row: &Row<'_>) -> Result<(), CollectError> {
        let document_id: i64 = row.get(0)?;
        let name: String = row.get(1)?;
        let type_name: String = row.get(2)?;
        let type_modifiers: String = row.get(3)?;
        let default_value_id: Option<i64> = row.get(4)?;
        let directives: String = row.get(5)?;

        let directives = self.directives(decode(&directives, "directives", || {
            format!("variable ${name} of document {document_id}")
        })?);
        if let Some(id) = default_value_id {
            self.value_ids.insert(id);
        }
        let mut variable = OperationVariable::new(name, type_name, type_modifiers, None);
        variable.default_value_id = default_value_id;
        variable.directives = directives;
        if let Some(document) = self.documents.get_mut(&document_id) {
            document.variables.push(variable);
        }
        Ok(())
    }

    pub(crate) fn add_document_directive_row(
        &mut self,
        row: &Row<'_>,
    ) -> Result<(), CollectError> {
        let document_id: i64 = row.get(0)?;
        let name: String = row.get(1)?;
        let arguments: String = row.get(2)?;

        let arguments = self.arguments(decode(&arguments, "arguments", || {
            format!("directive @{name} of document {document_id}")
        })?);
        if let Some(document) = self.documents.get_mut(&document_id) {
            document.directives.push(Directive::new(name, arguments));
        }
        Ok(())
    }

    pub(crate) fn value_ids(&self) -> &BTreeSet<i64> {
        &self.value_ids
    }

    /// Materializes every document of the batch, resolving argument and
    /// default values from `values`.
    pub(crate) fn finish(mut self, values: &ValueTable) -> Result<Vec<Document>, CollectError> {
        let documents = std::mem::take(&mut self.documents);
        let mut finished = Vec::with_capacity(documents.len());
        for (document_id, mut document) in documents {
            resolve_directives(&mut document.directives, values)?;
            for variable in &mut document.variables {
                if let Some(id) = variable.default_value_id {
                    variable.default_value = Some(values.resolve(id)?);
                }
                resolve_directives(&mut variable.directives, values)?;
            }
            let roots = self.roots.get(&document_id).map(Vec::as_slice).unwrap_or(&[]);
            document.selections = roots
                .iter()
                .map(|index| self.materialize(*index, values))
                .collect::<Result<_, _>>()?;
            document.refresh_referenced_fragments();
            finished.push(document);
        }
        Ok(finished)
    }

    fn materialize(&self, index: usize, values: &ValueTable) -> Result<Selection, CollectError> {
        let node = &self.nodes[index];
        let mut arguments = node.arguments.clone();
        resolve_arguments(&mut arguments, values)?;
        let mut directives = node.directives.clone();
        resolve_directives(&mut directives, values)?;
        let selections = node
            .children
            .iter()
            .map(|child| self.materialize(*child, values))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match node.kind {
            SelectionKind::Field => Selection::Field(FieldSelection {
                alias: node.alias.clone(),
                arguments,
                directives,
                selections,
                ..FieldSelection::new(node.field_name.clone())
            }),
            SelectionKind::InlineFragment => {
                let type_condition = Some(node.field_name.clone()).filter(|name| !name.is_empty());
                let mut inline = InlineFragment::new(type_condition, selections);
                inline.directives = directives;
                Selection::InlineFragment(inline)
            },
            SelectionKind::Fragment => {
                let mut spread = FragmentSpread::new(node.field_name.clone());
                spread.directives = directives;
                Selection::FragmentSpread(spread)
            },
        })
    }

    fn arguments(&mut self, rows: Vec<ArgumentRow>) -> Vec<Argument> {
        rows.into_iter()
            .map(|row| {
                if let Some(id) = row.value {
                    self.value_ids.insert(id);
                }
                Argument::unresolved(row.name, row.value)
            })
            .collect()
    }

    fn directives(&mut self, rows: Vec<DirectiveRow>) -> Vec<Directive> {
        rows.into_iter()
            .map(|row| {
                let arguments = self.arguments(row.arguments);
                Directive::new(row.name, arguments)
            })
            .collect()
    }
}

fn decode<T: DeserializeOwned>(
    json: &str,
    column: &'static str,
    owner: impl FnOnce() -> String,
) -> Result<T, CollectError> {
    serde_json::from_str(json).map_err(|source| CollectError::Encoding {
        column,
        owner: owner(),
        source,
    })
}

fn resolve_arguments(arguments: &mut [Argument], values: &ValueTable) -> Result<(), CollectError> {
    for argument in arguments {
        if let Some(id) = argument.value_id {
            argument.value = Some(values.resolve(id)?);
        }
    }
    Ok(())
}

fn resolve_directives(
    directives: &mut [Directive],
    values: &ValueTable,
) -> Result<(), CollectError> {
    for directive in directives {
        resolve_arguments(&mut directive.arguments, values)?;
    }
    Ok(())
}
