mod ast_conversion;
mod document_ingest;
mod document_writer;
mod ingest_error;
mod ingest_trait;
mod internal_directives;
mod list_fragments;
mod schema_ingest;

pub use document_ingest::DocumentIngest;
pub use ingest_error::IngestError;
pub use ingest_trait::Ingest;
pub use schema_ingest::SchemaIngest;
