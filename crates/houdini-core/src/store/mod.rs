mod context;
mod pooled_connection;
#[allow(clippy::module_inception)]
mod store;
mod store_error;

pub use context::Context;
pub use pooled_connection::PooledConnection;
pub use store::Store;
pub use store_error::StoreError;
