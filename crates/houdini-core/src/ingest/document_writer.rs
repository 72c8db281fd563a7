use crate::document::Argument;
use crate::document::Directive;
use crate::document::Document;
use crate::document::Selection;
use crate::document::Value;
use crate::ingest::IngestError;
use rusqlite::Connection;

type Result<T> = std::result::Result<T, IngestError>;

/// Writes [`Document`] trees into the normalized document tables, the
/// inverse of what the collector reads.
pub(crate) struct DocumentWriter<'conn> {
    conn: &'conn Connection,
    document_id: i64,
}
impl<'conn> DocumentWriter<'conn> {
    pub(crate) fn write(
        conn: &'conn Connection,
        raw_document: Option<i64>,
        document: &Document,
    ) -> Result<i64> {
        conn.prepare_cached(
            "INSERT INTO documents (name, raw_document, kind, type_condition)
             VALUES (?1, ?2, ?3, ?4)",
        )?
        .execute(rusqlite::params![
            document.name(),
            raw_document,
            document.kind().as_str(),
            document.type_condition(),
        ])?;
        let writer = DocumentWriter {
            conn,
            document_id: conn.last_insert_rowid(),
        };

        for variable in document.variables() {
            let default_value = variable
                .default_value()
                .map(|value| writer.value(value))
                .transpose()?;
            conn.prepare_cached(
                "INSERT INTO document_variables
                    (document, name, type, type_modifiers, default_value)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?
            .execute(rusqlite::params![
                writer.document_id,
                variable.name(),
                variable.type_name(),
                variable.type_modifiers(),
                default_value,
            ])?;
            let variable_id = conn.last_insert_rowid();
            for directive in variable.directives() {
                writer.directive(
                    "INSERT INTO document_variable_directives (parent, directive) VALUES (?1, ?2)",
                    "INSERT INTO document_variable_directive_arguments (parent, name, value)
                     VALUES (?1, ?2, ?3)",
                    variable_id,
                    directive,
                )?;
            }
        }
        for directive in document.directives() {
            writer.directive(
                "INSERT INTO document_directives (document, directive) VALUES (?1, ?2)",
                "INSERT INTO document_directive_arguments (parent, name, value)
                 VALUES (?1, ?2, ?3)",
                writer.document_id,
                directive,
            )?;
        }
        for (path_index, selection) in document.selections().iter().enumerate() {
            writer.selection(None, path_index, selection)?;
        }
        Ok(writer.document_id)
    }

    fn selection(
        &self,
        parent: Option<i64>,
        path_index: usize,
        selection: &Selection,
    ) -> Result<()> {
        let (field_name, alias, arguments): (&str, Option<&str>, &[Argument]) = match selection {
            Selection::Field(field) => (field.field_name(), field.alias(), field.arguments()),
            Selection::InlineFragment(inline) => {
                (inline.type_condition().unwrap_or_default(), None, &[])
            },
            Selection::FragmentSpread(spread) => (spread.fragment_name(), None, &[]),
        };
        self.conn
            .prepare_cached("INSERT INTO selections (field_name, alias, kind) VALUES (?1, ?2, ?3)")?
            .execute(rusqlite::params![field_name, alias, selection.kind().as_str()])?;
        let selection_id = self.conn.last_insert_rowid();
        self.conn
            .prepare_cached(
                "INSERT INTO selection_refs (parent_id, child_id, document, path_index)
                 VALUES (?1, ?2, ?3, ?4)",
            )?
            .execute(rusqlite::params![parent, selection_id, self.document_id, path_index as i64])?;

        for argument in arguments {
            let value = self.value(argument.value())?;
            self.conn
                .prepare_cached(
                    "INSERT INTO selection_arguments (selection_id, name, value, document)
                     VALUES (?1, ?2, ?3, ?4)",
                )?
                .execute(rusqlite::params![
                    selection_id,
                    argument.name(),
                    value,
                    self.document_id,
                ])?;
        }
        for directive in selection.directives() {
            self.conn
                .prepare_cached(
                    "INSERT INTO selection_directives (selection_id, directive, document)
                     VALUES (?1, ?2, ?3)",
                )?
                .execute(rusqlite::params![selection_id, directive.name(), self.document_id])?;
            let directive_id = self.conn.last_insert_rowid();
            for argument in directive.arguments() {
                let value = self.value(argument.value())?;
                self.conn
                    .prepare_cached(
                        "INSERT INTO selection_directive_arguments (parent, name, value, document)
                         VALUES (?1, ?2, ?3, ?4)",
                    )?
                    .execute(rusqlite::params![
                        directive_id,
                        argument.name(),
                        value,
                        self.document_id,
                    ])?;
            }
        }
        for (path_index, child) in selection.selections().iter().enumerate() {
            self.selection(Some(selection_id), path_index, child)?;
        }
        Ok(())
    }

    fn directive(
        &self,
        insert_directive: &str,
        insert_argument: &str,
        parent: i64,
        directive: &Directive,
    ) -> Result<()> {
        self.conn
            .prepare_cached(insert_directive)?
            .execute(rusqlite::params![parent, directive.name()])?;
        let directive_id = self.conn.last_insert_rowid();
        for argument in directive.arguments() {
            let value = self.value(argument.value())?;
            self.conn
                .prepare_cached(insert_argument)?
                .execute(rusqlite::params![directive_id, argument.name(), value])?;
        }
        Ok(())
    }

    /// Writes a value tree, parent first, and returns the id of its root.
    fn value(&self, value: &Value) -> Result<i64> {
        self.conn
            .prepare_cached(
                "INSERT INTO argument_values (kind, raw, document) VALUES (?1, ?2, ?3)",
            )?
            .execute(rusqlite::params![
                value.kind().as_str(),
                value.raw(),
                self.document_id,
            ])?;
        let id = self.conn.last_insert_rowid();
        let children: Vec<(Option<&str>, &Value)> = match value {
            Value::List(items) => items.iter().map(|item| (None, item)).collect(),
            Value::Object(fields) => fields
                .iter()
                .map(|(name, value)| (Some(name.as_str()), value))
                .collect(),
            _ => vec![],
        };
        for (name, child) in children {
            let child_id = self.value(child)?;
            self.conn
                .prepare_cached(
                    "INSERT INTO argument_value_children (name, parent, value, document)
                     VALUES (?1, ?2, ?3, ?4)",
                )?
                .execute(rusqlite::params![name, id, child_id, self.document_id])?;
        }
        Ok(id)
    }
}
