use crate::store::Context;
use crate::store::Store;
use crate::store::StoreError;
use rusqlite::Connection;
use rusqlite::Params;
use rusqlite::Row;
use rusqlite::Statement;
use std::ops::Deref;

/// A connection borrowed from a [`Store`]. Returned to the pool on drop.
#[derive(Debug)]
pub struct PooledConnection<'store> {
    conn: Option<Connection>,
    store: &'store Store,
}
impl<'store> PooledConnection<'store> {
    pub(crate) fn new(store: &'store Store, conn: Connection) -> Self {
        Self {
            conn: Some(conn),
            store,
        }
    }

    pub fn prepare(&self, sql: &str) -> Result<Statement<'_>, StoreError> {
        Ok(self.deref().prepare(sql)?)
    }

    /// Runs a prepared statement for its side effects.
    pub fn exec_statement<P: Params>(
        &self,
        ctx: &Context,
        stmt: &mut Statement<'_>,
        params: P,
    ) -> Result<usize, StoreError> {
        ctx.check()?;
        Ok(stmt.execute(params)?)
    }

    /// Streams every row of a prepared statement into `on_row`, checking
    /// `ctx` between rows.
    pub fn step_statement<P, E, F>(
        &self,
        ctx: &Context,
        stmt: &mut Statement<'_>,
        params: P,
        mut on_row: F,
    ) -> Result<(), E>
    where
        P: Params,
        E: From<StoreError>,
        F: FnMut(&Row<'_>) -> Result<(), E>,
    {
        ctx.check()?;
        let mut rows = stmt.query(params).map_err(StoreError::from)?;
        while let Some(row) = rows.next().map_err(StoreError::from)? {
            ctx.check()?;
            on_row(row)?;
        }
        Ok(())
    }

    /// Prepares `sql`, streams its rows into `on_row`, and finalizes the
    /// statement before returning.
    pub fn step_query<P, E, F>(
        &self,
        ctx: &Context,
        sql: &str,
        params: P,
        on_row: F,
    ) -> Result<(), E>
    where
        P: Params,
        E: From<StoreError>,
        F: FnMut(&Row<'_>) -> Result<(), E>,
    {
        let mut stmt = self.prepare(sql)?;
        self.step_statement(ctx, &mut stmt, params, on_row)
    }
}
impl Deref for PooledConnection<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        match &self.conn {
            Some(conn) => conn,
            None => unreachable!("a pooled connection is only released on drop"),
        }
    }
}
impl Drop for PooledConnection<'_> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.store.put(conn);
        }
    }
}
