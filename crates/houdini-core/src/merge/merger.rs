use crate::document::Document;
use crate::document::DocumentKind;
use crate::document::FragmentSpread;
use crate::document::Selection;
use crate::document::Value;
use crate::merge::fragment_arguments;
use crate::merge::fragment_graph::FragmentGraph;
use crate::merge::pagination::apply_pagination;
use crate::merge::selection_set::SelectionFlattener;
use crate::merge::selection_set::SetPosition;
use crate::merge::strip_variables::strip_variables;
use crate::merge::ComponentFields;
use crate::merge::MergeError;
use crate::merge::MergeOptions;
use crate::merge::MergedDocument;
use crate::merge::MergedSet;
use crate::merge::Pagination;
use crate::schema::SchemaIndex;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, MergeError>;

/// A collected document after the rewrites that apply wherever it is used:
/// fragment arguments declared as variables, and pagination.
#[derive(Clone, Debug)]
pub(crate) struct PreparedDocument {
    pub(crate) document: Document,
    pub(crate) pagination: Option<Pagination>,
}

/// Flattens collected documents. The collected map is never mutated; every
/// merge works on a deep copy.
///
/// A `Merger` is `Sync` and is shared by every emitter worker.
#[derive(Debug)]
pub struct Merger<'a> {
    component_fields: ComponentFields,
    documents: &'a BTreeMap<String, Document>,
    options: MergeOptions,
    prepared: BTreeMap<String, Result<PreparedDocument>>,
    schema: &'a SchemaIndex,
}
impl<'a> Merger<'a> {
    pub fn new(
        schema: &'a SchemaIndex,
        documents: &'a BTreeMap<String, Document>,
        options: MergeOptions,
    ) -> Self {
        let prepared = documents
            .iter()
            .map(|(name, document)| (name.clone(), prepare(schema, document)))
            .collect();
        Self {
            component_fields: ComponentFields::from_documents(documents.values()),
            documents,
            options,
            prepared,
            schema,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }

    pub fn component_fields(&self) -> &ComponentFields {
        &self.component_fields
    }

    pub fn options(&self) -> MergeOptions {
        self.options
    }

    pub fn schema(&self) -> &SchemaIndex {
        self.schema
    }

    /// Flattens the document called `name`.
    pub fn merge(&self, name: &str) -> Result<MergedDocument> {
        let prepared = match self.prepared.get(name) {
            Some(Ok(prepared)) => prepared,
            Some(Err(err)) => return Err(err.clone()),
            None => {
                return Err(MergeError::UnknownDocument {
                    document: name.to_string(),
                })
            },
        };
        if let Some(cycle_path) = FragmentGraph::new(self.documents).find_cycle(&prepared.document)
        {
            return Err(MergeError::FragmentCycle {
                document: name.to_string(),
                cycle_path,
            });
        }

        let mut document = prepared.document.clone();
        let (root_type, position, expanding) = match document.kind() {
            DocumentKind::Fragment => (
                document
                    .type_condition()
                    .unwrap_or(self.schema.query_type())
                    .to_string(),
                SetPosition::FragmentRoot,
                vec![name.to_string()],
            ),
            kind => (
                self.schema.root_type(kind).to_string(),
                SetPosition::OperationRoot,
                vec![],
            ),
        };
        if !self.schema.has_type(&root_type) {
            return Err(MergeError::UnknownType {
                document: name.to_string(),
                type_name: root_type,
            });
        }

        let mut flattener = SelectionFlattener {
            component_fields: &self.component_fields,
            document: name,
            expanding,
            options: self.options,
            prepared: &self.prepared,
            schema: self.schema,
        };
        let selections = std::mem::take(&mut document.selections);
        document.selections = flattener.flatten(&root_type, selections, position)?;
        document.strip_variables = strip_variables(self.schema, &document);
        document.refresh_referenced_fragments();

        tracing::trace!(
            "merged `{name}` into {} root selections",
            document.selections().len(),
        );
        Ok(MergedDocument {
            document,
            pagination: prepared.pagination.clone(),
        })
    }

    /// Flattens the fragment a spread names, bound to the spread's
    /// arguments and renamed to its printed name.
    pub fn merge_variant(&self, spread: &FragmentSpread) -> Result<Document> {
        let mut document = self.merge(spread.fragment_name())?.into_document();
        let Some(variant) = spread.variant() else {
            return Ok(document);
        };
        let bindings: HashMap<String, Value> = variant
            .arguments()
            .iter()
            .map(|arg| (arg.name().to_string(), arg.value().clone()))
            .collect();
        let unbound: BTreeSet<String> = document
            .variables()
            .iter()
            .map(|variable| variable.name().to_string())
            .filter(|name| !bindings.contains_key(name))
            .collect();
        fragment_arguments::substitute_selections(&mut document.selections, &bindings, &unbound);
        document.name = variant.name().to_string();
        document.variables.clear();
        document.strip_variables.clear();
        document.refresh_referenced_fragments();
        Ok(document)
    }

    /// Merges `name` together with every fragment it reaches through a
    /// printed spread, transitively.
    pub fn merge_with_fragments(&self, name: &str) -> Result<MergedSet> {
        let document = self.merge(name)?;
        let mut fragments = BTreeMap::new();
        let mut pending = vec![];
        collect_printed_spreads(document.document().selections(), &mut pending);
        while let Some(spread) = pending.pop() {
            if fragments.contains_key(spread.printed_name()) {
                continue;
            }
            let fragment = self.merge_variant(&spread)?;
            collect_printed_spreads(fragment.selections(), &mut pending);
            fragments.insert(spread.printed_name().to_string(), fragment);
        }
        Ok(MergedSet {
            document,
            fragments,
        })
    }
}

fn prepare(schema: &SchemaIndex, document: &Document) -> Result<PreparedDocument> {
    let mut document = document.clone();
    if document.kind() == DocumentKind::Fragment {
        let declared = fragment_arguments::declared_arguments(&document)?;
        if !declared.is_empty() {
            document.variables = declared;
        }
    }
    let pagination = apply_pagination(schema, &mut document)?;
    Ok(PreparedDocument {
        document,
        pagination,
    })
}

/// Spreads that print in `selections`. Spreads that only arrived through
/// another fragment print inside that fragment instead.
fn collect_printed_spreads(selections: &[Selection], out: &mut Vec<FragmentSpread>) {
    for selection in selections {
        match selection {
            Selection::FragmentSpread(spread) if !spread.inlined() => out.push(spread.clone()),
            Selection::FragmentSpread(_) => (),
            Selection::Field(_) | Selection::InlineFragment(_) => {
                if !selection.inlined() {
                    collect_printed_spreads(selection.selections(), out);
                }
            },
        }
    }
}
