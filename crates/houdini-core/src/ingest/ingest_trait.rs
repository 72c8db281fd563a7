use crate::ingest::IngestError;
use crate::store::Context;
use rusqlite::Connection;
use std::path::Path;

type Result<T> = std::result::Result<T, IngestError>;

/// Turns parsed GraphQL definitions into store rows.
///
/// Definitions are visited one at a time while sources load; nothing is
/// written until [`Ingest::write`], which runs in a single transaction.
pub trait Ingest: Sized {
    type AstDefinition;

    fn visit_definition(&mut self, file_path: &Path, def: Self::AstDefinition) -> Result<()>;

    /// Writes every visited definition and returns how many top-level rows
    /// (types or documents) were stored.
    fn write(self, ctx: &Context, conn: &Connection) -> Result<usize>;
}
