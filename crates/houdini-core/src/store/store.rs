use crate::config::ProjectConfig;
use crate::store::Context;
use crate::store::PooledConnection;
use crate::store::StoreError;
use rusqlite::Connection;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Condvar;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Duration;

const BOOTSTRAP_SQL: &str = include_str!("schema.sql");

/// How long a waiting [`Store::take`] sleeps before re-checking its
/// [`Context`] for cancellation.
const TAKE_POLL_INTERVAL: Duration = Duration::from_millis(50);

const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// A fixed-size pool of SQLite connections to one database file.
///
/// Every worker takes exactly one connection for its whole run; the
/// [`PooledConnection`] guard puts it back when dropped, including while
/// unwinding from an error.
#[derive(Debug)]
pub struct Store {
    available: Condvar,
    idle: Mutex<Vec<Connection>>,
    path: PathBuf,
    size: usize,
}
impl Store {
    pub fn open(path: impl AsRef<Path>, pool_size: usize) -> Result<Self, StoreError> {
        if pool_size == 0 {
            return Err(StoreError::EmptyPool);
        }
        let path = path.as_ref().to_path_buf();
        let mut connections = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            connections.push(open_connection(&path)?);
        }
        tracing::debug!(
            "opened store at {} with {pool_size} connection(s)",
            path.display(),
        );
        Ok(Self {
            available: Condvar::new(),
            idle: Mutex::new(connections),
            path,
            size: pool_size,
        })
    }

    /// Creates every table the pipeline reads on an empty database.
    pub fn bootstrap(&self, ctx: &Context) -> Result<(), StoreError> {
        let conn = self.take(ctx)?;
        conn.execute_batch(BOOTSTRAP_SQL)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    pub fn project_config(&self, ctx: &Context) -> Result<ProjectConfig, StoreError> {
        let conn = self.take(ctx)?;
        ProjectConfig::load(&conn)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Blocks until a connection is idle or `ctx` is cancelled.
    pub fn take(&self, ctx: &Context) -> Result<PooledConnection<'_>, StoreError> {
        let mut idle = self.idle.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            ctx.check()?;
            if let Some(conn) = idle.pop() {
                return Ok(PooledConnection::new(self, conn));
            }
            let (guard, _) = self
                .available
                .wait_timeout(idle, TAKE_POLL_INTERVAL)
                .unwrap_or_else(PoisonError::into_inner);
            idle = guard;
        }
    }

    pub(crate) fn put(&self, conn: Connection) {
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(conn);
        self.available.notify_one();
    }
}

fn open_connection(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(path).map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
    Ok(conn)
}
