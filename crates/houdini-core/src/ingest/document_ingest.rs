use crate::document::Document;
use crate::document::DocumentKind;
use crate::document::FieldSelection;
use crate::document::FragmentSpread;
use crate::document::InlineFragment;
use crate::document::OperationVariable;
use crate::document::Selection;
use crate::ingest::ast_conversion::arguments_from_ast;
use crate::ingest::ast_conversion::directives_from_ast;
use crate::ingest::ast_conversion::type_parts;
use crate::ingest::ast_conversion::value_from_ast;
use crate::ingest::document_writer::DocumentWriter;
use crate::ingest::list_fragments::list_fragments;
use crate::ingest::Ingest;
use crate::ingest::IngestError;
use crate::schema::SchemaIndex;
use crate::store::Context;
use graphql_parser::query as ast;
use inherent::inherent;
use rusqlite::Connection;
use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug)]
struct RawDocument {
    content: String,
    file_path: PathBuf,
}

/// Loads executable documents into `raw_documents`, `documents` and the
/// selection, variable, directive and value tables.
///
/// Every named list also gets its `_insert`, `_remove` and `_toggle`
/// fragments, written without a raw document.
#[derive(Debug)]
pub struct DocumentIngest<'a> {
    documents: Vec<(Option<usize>, Document)>,
    names: BTreeSet<String>,
    raw_documents: Vec<RawDocument>,
    schema: &'a SchemaIndex,
    str_load_counter: u16,
    task: Option<String>,
}
impl<'a> DocumentIngest<'a> {
    pub fn new(schema: &'a SchemaIndex) -> Self {
        Self {
            documents: vec![],
            names: BTreeSet::new(),
            raw_documents: vec![],
            schema,
            str_load_counter: 0,
            task: None,
        }
    }

    /// Tags every raw document with `task` so a generate run can select
    /// them.
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    pub fn load_str(mut self, file_path: Option<PathBuf>, content: &str) -> Result<Self> {
        let file_path = match file_path {
            Some(file_path) => file_path,
            None => {
                let ctr = self.str_load_counter;
                self.str_load_counter += 1;
                PathBuf::from(format!("str://{ctr}"))
            },
        };
        let ast_doc = ast::parse_query::<String>(content)
            .map_err(|err| IngestError::ParseError {
                file: file_path.clone(),
                err: err.to_string(),
            })?
            .into_static();
        self.raw_documents.push(RawDocument {
            content: content.to_string(),
            file_path: file_path.clone(),
        });
        for def in ast_doc.definitions {
            self.visit_definition(file_path.as_path(), def)?;
        }
        Ok(self)
    }

    fn add_document(&mut self, raw: Option<usize>, document: Document) -> Result<()> {
        if !self.names.insert(document.name().to_string()) {
            return Err(IngestError::DuplicateDocument {
                name: document.name().to_string(),
            });
        }
        self.documents.push((raw, document));
        Ok(())
    }
}

#[inherent]
impl Ingest for DocumentIngest<'_> {
    type AstDefinition = ast::Definition<'static, String>;

    pub fn visit_definition(
        &mut self,
        file_path: &Path,
        def: ast::Definition<'static, String>,
    ) -> Result<()> {
        let document = match def {
            ast::Definition::Fragment(fragment) => {
                let ast::TypeCondition::On(type_condition) = fragment.type_condition;
                let mut document = Document::new(
                    0,
                    fragment.name,
                    DocumentKind::Fragment,
                    Some(type_condition),
                );
                document.directives = directives_from_ast(&fragment.directives);
                document.selections = selections_from_ast(&fragment.selection_set);
                document
            },
            ast::Definition::Operation(operation) => {
                let (kind, name, variables, directives, selection_set) = match operation {
                    ast::OperationDefinition::Query(query) => (
                        DocumentKind::Query,
                        query.name,
                        query.variable_definitions,
                        query.directives,
                        query.selection_set,
                    ),
                    ast::OperationDefinition::Mutation(mutation) => (
                        DocumentKind::Mutation,
                        mutation.name,
                        mutation.variable_definitions,
                        mutation.directives,
                        mutation.selection_set,
                    ),
                    ast::OperationDefinition::Subscription(subscription) => (
                        DocumentKind::Subscription,
                        subscription.name,
                        subscription.variable_definitions,
                        subscription.directives,
                        subscription.selection_set,
                    ),
                    ast::OperationDefinition::SelectionSet(selection_set) => {
                        (DocumentKind::Query, None, vec![], vec![], selection_set)
                    },
                };
                let Some(name) = name else {
                    return Err(IngestError::AnonymousOperation {
                        file: file_path.to_path_buf(),
                    });
                };
                let mut document = Document::new(0, name, kind, None);
                document.directives = directives_from_ast(&directives);
                document.variables = variables
                    .iter()
                    .map(|variable| {
                        let (type_name, type_modifiers) = type_parts(&variable.var_type);
                        OperationVariable::new(
                            variable.name.clone(),
                            type_name,
                            type_modifiers,
                            variable.default_value.as_ref().map(value_from_ast),
                        )
                    })
                    .collect();
                document.selections = selections_from_ast(&selection_set);
                document
            },
        };
        let raw = self.raw_documents.len().checked_sub(1);
        self.add_document(raw, document)
    }

    pub fn write(mut self, ctx: &Context, conn: &Connection) -> Result<usize> {
        let generated: Vec<Document> = self
            .documents
            .iter()
            .flat_map(|(_, document)| list_fragments(self.schema, document))
            .collect();
        for fragment in generated {
            self.add_document(None, fragment)?;
        }

        ctx.check()?;
        let tx = conn.unchecked_transaction()?;
        let mut raw_ids = Vec::with_capacity(self.raw_documents.len());
        for raw in &self.raw_documents {
            tx.prepare_cached(
                "INSERT INTO raw_documents (filepath, content, current_task) VALUES (?1, ?2, ?3)",
            )?
            .execute(rusqlite::params![
                raw.file_path.to_string_lossy().into_owned(),
                raw.content,
                self.task,
            ])?;
            raw_ids.push(tx.last_insert_rowid());
        }
        for (raw, document) in &self.documents {
            ctx.check()?;
            let raw_id = raw.and_then(|index| raw_ids.get(index).copied());
            DocumentWriter::write(&tx, raw_id, document)?;
            tracing::trace!("ingested document `{}`", document.name());
        }
        tx.commit()?;

        tracing::debug!(
            "ingested {} documents from {} sources",
            self.documents.len(),
            self.raw_documents.len(),
        );
        Ok(self.documents.len())
    }
}

fn selections_from_ast(set: &ast::SelectionSet<'static, String>) -> Vec<Selection> {
    set.items
        .iter()
        .map(|item| match item {
            ast::Selection::Field(field) => Selection::Field(FieldSelection {
                alias: field.alias.clone(),
                arguments: arguments_from_ast(&field.arguments),
                directives: directives_from_ast(&field.directives),
                selections: selections_from_ast(&field.selection_set),
                ..FieldSelection::new(field.name.clone())
            }),
            ast::Selection::FragmentSpread(spread) => {
                let mut fragment_spread = FragmentSpread::new(spread.fragment_name.clone());
                fragment_spread.directives = directives_from_ast(&spread.directives);
                Selection::FragmentSpread(fragment_spread)
            },
            ast::Selection::InlineFragment(inline) => {
                let type_condition = inline
                    .type_condition
                    .as_ref()
                    .map(|ast::TypeCondition::On(name)| name.clone());
                let mut fragment =
                    InlineFragment::new(type_condition, selections_from_ast(&inline.selection_set));
                fragment.directives = directives_from_ast(&inline.directives);
                Selection::InlineFragment(fragment)
            },
        })
        .collect()
}
