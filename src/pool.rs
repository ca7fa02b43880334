//! Connection pooling data source.
//!
//! The pool hands out [`PooledConnection`] handles and recycles the raw
//! connections behind them. Callers never receive a raw connection directly,
//! so every close funnels back through the pool's accounting.
//!
//! Each raw connection gets a numeric id when the driver first produces it
//! and keeps that id for its pooled lifetime. The id is the identity used by
//! the active/free bookkeeping, which keeps membership checks O(1) without
//! comparing connection objects.

use crate::api::connection::Connection;
use crate::api::driver::Driver;
use crate::config::PoolConfig;
use crate::datasource::DataSource;
use crate::error::{DbError, DbResult};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Counts of pooled connections, for introspection and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Connections currently lent out.
    pub active: usize,
    /// Connections parked for reuse.
    pub idle: usize,
}

/// Active/free bookkeeping. Every pooled connection id is in exactly one of
/// the two collections; the raw connection object itself lives in `free`
/// while parked and inside the issued handle while lent out.
struct PoolState<C> {
    active: HashSet<u64>,
    free: Vec<(u64, C)>,
    next_id: u64,
}

impl<C> PoolState<C> {
    fn new() -> Self {
        Self {
            active: HashSet::new(),
            free: Vec::new(),
            next_id: 0,
        }
    }

    /// Take the most recently freed connection, marking it active.
    fn checkout(&mut self) -> Option<(u64, C)> {
        let (id, conn) = self.free.pop()?;
        self.active.insert(id);
        Some((id, conn))
    }

    /// Assign an id to a freshly created connection and mark it active.
    fn register(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.active.insert(id);
        id
    }

    /// Move a connection from active back to free.
    ///
    /// Fails when `id` is not currently active, which indicates a double
    /// release or a connection that did not come from this pool. Neither
    /// collection is touched on failure.
    fn release(&mut self, id: u64, conn: C) -> DbResult<()> {
        if !self.active.remove(&id) {
            return Err(DbError::connection_not_in_pool(id));
        }
        self.free.push((id, conn));
        Ok(())
    }

    fn stats(&self) -> PoolStats {
        PoolStats {
            active: self.active.len(),
            idle: self.free.len(),
        }
    }
}

/// A pooling data source.
///
/// `get_connection` reuses the most recently freed raw connection when one is
/// parked, and otherwise asks the wrapped [`DataSource`] to create one. Raw
/// connections are never closed by the pool; once created they cycle between
/// the free list and issued handles for the pool's lifetime.
///
/// The size and expiry knobs on [`PoolConfig`] are accepted but not yet
/// enforced; see the `config` module docs.
pub struct ConnectionPool<D: Driver> {
    source: DataSource<D>,
    config: PoolConfig,
    shared: Arc<Mutex<PoolState<D::Conn>>>,
}

impl<D: Driver> ConnectionPool<D> {
    /// Create a pool over the given data source.
    pub fn new(source: DataSource<D>, config: PoolConfig) -> DbResult<Self> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            shared: Arc::new(Mutex::new(PoolState::new())),
        })
    }

    /// Acquire a connection handle.
    ///
    /// On a pool hit this returns immediately; on a miss it blocks for as
    /// long as the driver takes to establish a connection. A failed creation
    /// propagates the driver's error and records nothing as active.
    pub fn get_connection(&self) -> DbResult<PooledConnection<D::Conn>> {
        let reused = self.shared.lock().checkout();

        let (id, conn) = match reused {
            Some((id, conn)) => {
                debug!(connection_id = id, "Reusing pooled connection");
                (id, conn)
            }
            None => {
                // Driver call happens outside the lock so a slow connect
                // cannot block releases from other handles.
                let conn = self.source.get_connection()?;
                let id = self.shared.lock().register();
                debug!(connection_id = id, "Created new pooled connection");
                (id, conn)
            }
        };

        Ok(PooledConnection {
            id,
            conn: Some(conn),
            closed: false,
            shared: Arc::clone(&self.shared),
        })
    }

    /// Current active/idle counts.
    pub fn stats(&self) -> PoolStats {
        self.shared.lock().stats()
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }
}

impl<D: Driver + Clone> Clone for ConnectionPool<D> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            config: self.config.clone(),
            shared: Arc::clone(&self.shared),
        }
    }
}

/// A pool-issued connection handle.
///
/// Forwards every [`Connection`] operation to the raw connection it wraps,
/// except `close`: closing the handle returns the raw connection to the pool
/// instead of closing it. Closing the same handle twice is a programmer
/// error and panics; dropping an open handle releases it back to the pool.
pub struct PooledConnection<C: Connection> {
    id: u64,
    conn: Option<C>,
    closed: bool,
    shared: Arc<Mutex<PoolState<C>>>,
}

impl<C: Connection> PooledConnection<C> {
    /// The pool-assigned id of the underlying raw connection.
    pub fn id(&self) -> u64 {
        self.id
    }

    fn raw(&self) -> DbResult<&C> {
        self.conn.as_ref().ok_or(DbError::HandleClosed)
    }

    fn raw_mut(&mut self) -> DbResult<&mut C> {
        self.conn.as_mut().ok_or(DbError::HandleClosed)
    }

    fn release(&mut self) -> DbResult<()> {
        // conn is present whenever the handle is still open
        let conn = self.conn.take().ok_or(DbError::HandleClosed)?;
        self.shared.lock().release(self.id, conn)
    }
}

impl<C: Connection> Connection for PooledConnection<C> {
    type Stmt = C::Stmt;
    type Prepared = C::Prepared;

    /// Return the raw connection to the pool. The raw connection is not
    /// closed and stays usable for the next `get_connection` call.
    ///
    /// # Panics
    ///
    /// Panics when called on an already-closed handle. Each handle may be
    /// closed at most once.
    fn close(&mut self) -> DbResult<()> {
        assert!(!self.closed, "connection handle closed twice");
        self.closed = true;
        self.release()?;
        debug!(connection_id = self.id, "Returned connection to pool");
        Ok(())
    }

    /// Whether this handle has been closed. Reports the handle's own state;
    /// the raw connection underneath is never closed by the pool.
    fn is_closed(&self) -> bool {
        self.closed
    }

    fn commit(&mut self) -> DbResult<()> {
        self.raw_mut()?.commit()
    }

    fn rollback(&mut self) -> DbResult<()> {
        self.raw_mut()?.rollback()
    }

    fn auto_commit(&self) -> DbResult<bool> {
        self.raw()?.auto_commit()
    }

    fn set_auto_commit(&mut self, auto_commit: bool) -> DbResult<()> {
        self.raw_mut()?.set_auto_commit(auto_commit)
    }

    fn catalog(&self) -> DbResult<Option<String>> {
        self.raw()?.catalog()
    }

    fn set_catalog(&mut self, catalog: &str) -> DbResult<()> {
        self.raw_mut()?.set_catalog(catalog)
    }

    fn create_statement(&mut self) -> DbResult<Self::Stmt> {
        self.raw_mut()?.create_statement()
    }

    fn prepare_statement(&mut self, query: &str) -> DbResult<Self::Prepared> {
        self.raw_mut()?.prepare_statement(query)
    }
}

impl<C: Connection> Drop for PooledConnection<C> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        match self.release() {
            Ok(()) => warn!(
                connection_id = self.id,
                "Connection handle released via Drop - consider calling close()"
            ),
            Err(e) => error!(
                connection_id = self.id,
                error = %e,
                "Failed to release connection on drop"
            ),
        }
    }
}
