mod batch_builder;
mod collect_error;
mod collected_documents;
mod collector;
mod queries;
mod value_table;

pub use collect_error::CollectError;
pub use collected_documents::CollectedDocuments;
pub use collector::Collector;
