//! Connection trait.

use crate::api::statement::{PreparedStatement, Statement};
use crate::error::DbResult;

/// An open connection to a database.
///
/// Produced by a [`Driver`](crate::api::Driver) and consumed either directly
/// or through a pool-issued [`PooledConnection`](crate::pool::PooledConnection)
/// handle, which forwards every operation here except `close`.
pub trait Connection {
    type Stmt: Statement;
    type Prepared: PreparedStatement;

    /// Close the connection, releasing driver-side resources.
    fn close(&mut self) -> DbResult<()>;

    /// Whether the connection has been closed.
    fn is_closed(&self) -> bool;

    /// Commit the current transaction.
    fn commit(&mut self) -> DbResult<()>;

    /// Roll back the current transaction.
    fn rollback(&mut self) -> DbResult<()>;

    /// Whether statements commit implicitly after execution.
    fn auto_commit(&self) -> DbResult<bool>;

    fn set_auto_commit(&mut self, auto_commit: bool) -> DbResult<()>;

    /// The catalog (database) this connection currently targets, if any.
    fn catalog(&self) -> DbResult<Option<String>>;

    fn set_catalog(&mut self, catalog: &str) -> DbResult<()>;

    /// Create a statement for direct SQL execution.
    fn create_statement(&mut self) -> DbResult<Self::Stmt>;

    /// Prepare a parameterized query for later execution.
    fn prepare_statement(&mut self, query: &str) -> DbResult<Self::Prepared>;
}
