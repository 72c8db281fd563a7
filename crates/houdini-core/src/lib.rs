pub mod artifact;
pub mod collect;
pub mod config;
pub mod document;
mod error_kind;
pub mod fs;
pub mod generate;
mod hash;
pub mod ingest;
pub mod merge;
pub mod print;
pub mod schema;
pub mod store;
mod worker_pool;

pub use error_kind::ErrorKind;
pub use generate::GenerateError;
pub use generate::GenerateErrors;
pub use generate::GenerateSummary;
pub use generate::Generator;
pub use hash::sha256_hex;
pub use store::Context;
pub use store::Store;
pub use worker_pool::default_workers;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;
