//! End-to-end tests for the pooled access layer.
//!
//! Runs the whole stack over a toy in-memory driver: driver -> data source ->
//! pool -> connection handle -> statement -> result set. The driver keeps a
//! single `(id, name)` table per raw connection, which makes pool reuse
//! observable: data written in one session is only visible in the next if the
//! pool handed back the same raw connection.

use dblink::{
    Connection, ConnectionPool, DataSource, DbError, DbResult, Driver, PoolConfig,
    PreparedStatement, ResultSet, SqlType, Statement, UpdateResult, Value,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::rc::Rc;

type Table = Rc<RefCell<Vec<(i64, Option<String>)>>>;

/// Install a tracing subscriber so pool debug/warn output shows up under
/// `--nocapture`. Later calls are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Clone)]
struct MemoryDriver {
    connects: Rc<Cell<u32>>,
}

impl MemoryDriver {
    fn new() -> Self {
        Self {
            connects: Rc::new(Cell::new(0)),
        }
    }
}

impl Driver for MemoryDriver {
    type Conn = MemoryConnection;

    fn connect(
        &self,
        _url: &str,
        _params: &HashMap<String, String>,
    ) -> DbResult<MemoryConnection> {
        self.connects.set(self.connects.get() + 1);
        Ok(MemoryConnection {
            table: Rc::new(RefCell::new(vec![
                (1, Some("alice".to_string())),
                (2, Some("bob".to_string())),
            ])),
            closed: false,
        })
    }
}

struct MemoryConnection {
    table: Table,
    closed: bool,
}

impl Connection for MemoryConnection {
    type Stmt = MemoryStatement;
    type Prepared = MemoryPrepared;

    fn close(&mut self) -> DbResult<()> {
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn commit(&mut self) -> DbResult<()> {
        Ok(())
    }

    fn rollback(&mut self) -> DbResult<()> {
        Ok(())
    }

    fn auto_commit(&self) -> DbResult<bool> {
        Ok(true)
    }

    fn set_auto_commit(&mut self, _auto_commit: bool) -> DbResult<()> {
        Ok(())
    }

    fn catalog(&self) -> DbResult<Option<String>> {
        Ok(Some("memory".to_string()))
    }

    fn set_catalog(&mut self, _catalog: &str) -> DbResult<()> {
        Ok(())
    }

    fn create_statement(&mut self) -> DbResult<MemoryStatement> {
        Ok(MemoryStatement {
            table: Rc::clone(&self.table),
        })
    }

    fn prepare_statement(&mut self, _query: &str) -> DbResult<MemoryPrepared> {
        Ok(MemoryPrepared {
            table: Rc::clone(&self.table),
            params: Vec::new(),
        })
    }
}

struct MemoryStatement {
    table: Table,
}

fn select_all(table: &Table) -> MemoryRows {
    MemoryRows {
        rows: table.borrow().clone(),
        cursor: None,
        last_was_null: false,
    }
}

impl Statement for MemoryStatement {
    type Rows = MemoryRows;

    fn execute_query(&mut self, _sql: &str) -> DbResult<MemoryRows> {
        Ok(select_all(&self.table))
    }

    fn execute_update(&mut self, sql: &str) -> DbResult<UpdateResult> {
        // Toy dialect: only DELETE is supported directly, inserts go
        // through the prepared path.
        if sql.starts_with("DELETE") {
            let removed = self.table.borrow().len() as u64;
            self.table.borrow_mut().clear();
            return Ok(UpdateResult::new(removed));
        }
        Err(DbError::driver(
            format!("unsupported statement: {}", sql),
            "Use a prepared statement for inserts",
        ))
    }
}

struct MemoryPrepared {
    table: Table,
    params: Vec<Value>,
}

impl PreparedStatement for MemoryPrepared {
    type Rows = MemoryRows;

    fn execute_query(&mut self) -> DbResult<MemoryRows> {
        Ok(select_all(&self.table))
    }

    /// Inserts the bound `(id, name)` pair.
    fn execute_update(&mut self) -> DbResult<UpdateResult> {
        let id = match self.params.first() {
            Some(Value::BigInt(id)) => *id,
            _ => {
                return Err(DbError::driver(
                    "parameter 0 must be a BIGINT id",
                    "Bind the id with set_i64",
                ));
            }
        };
        let name = match self.params.get(1) {
            Some(Value::Text(name)) => Some(name.clone()),
            Some(Value::Null) | None => None,
            _ => {
                return Err(DbError::driver(
                    "parameter 1 must be TEXT or NULL",
                    "Bind the name with set_string or set_null",
                ));
            }
        };
        self.table.borrow_mut().push((id, name));
        Ok(UpdateResult::with_insert_id(1, id as u64))
    }

    fn set_value(&mut self, index: usize, value: Value) -> DbResult<()> {
        if self.params.len() <= index {
            self.params.resize(index + 1, Value::Null);
        }
        self.params[index] = value;
        Ok(())
    }

    fn set_null(&mut self, index: usize, _sql_type: SqlType) -> DbResult<()> {
        self.set_value(index, Value::Null)
    }
}

struct MemoryRows {
    rows: Vec<(i64, Option<String>)>,
    cursor: Option<usize>,
    last_was_null: bool,
}

impl MemoryRows {
    fn current(&self) -> DbResult<&(i64, Option<String>)> {
        let idx = self
            .cursor
            .ok_or_else(|| DbError::driver("no current row", "Call first() before reading"))?;
        Ok(&self.rows[idx])
    }
}

impl ResultSet for MemoryRows {
    fn first(&mut self) -> DbResult<bool> {
        if self.rows.is_empty() {
            return Ok(false);
        }
        self.cursor = Some(0);
        Ok(true)
    }

    fn next(&mut self) -> DbResult<bool> {
        match self.cursor {
            Some(i) if i + 1 < self.rows.len() => {
                self.cursor = Some(i + 1);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn find_column(&self, name: &str) -> DbResult<usize> {
        match name {
            "id" => Ok(0),
            "name" => Ok(1),
            other => Err(DbError::column_not_found(other)),
        }
    }

    fn was_null(&self) -> DbResult<bool> {
        Ok(self.last_was_null)
    }

    fn get_i64(&mut self, index: usize) -> DbResult<i64> {
        if index != 0 {
            return Err(DbError::driver(
                "id is the only integer column",
                "Read column 0",
            ));
        }
        let (id, _) = *self.current()?;
        self.last_was_null = false;
        Ok(id)
    }

    fn get_string(&mut self, index: usize) -> DbResult<String> {
        if index != 1 {
            return Err(DbError::driver(
                "name is the only text column",
                "Read column 1",
            ));
        }
        let (_, name) = self.current()?.clone();
        self.last_was_null = name.is_none();
        Ok(name.unwrap_or_default())
    }

    fn get_value(&mut self, index: usize) -> DbResult<Value> {
        match index {
            0 => self.get_i64(0).map(Value::BigInt),
            1 => {
                let (_, name) = self.current()?.clone();
                self.last_was_null = name.is_none();
                Ok(name.map(Value::Text).unwrap_or(Value::Null))
            }
            _ => Err(DbError::driver("no such column", "Columns are 0 and 1")),
        }
    }
}

fn new_pool(driver: MemoryDriver) -> ConnectionPool<MemoryDriver> {
    init_tracing();
    let source = DataSource::new(driver, "memory://localhost/test", HashMap::new()).unwrap();
    ConnectionPool::new(source, PoolConfig::default()).unwrap()
}

#[test]
fn test_query_roundtrip_through_pool() {
    let pool = new_pool(MemoryDriver::new());
    let mut conn = pool.get_connection().unwrap();

    let mut stmt = conn.create_statement().unwrap();
    let mut rows = stmt.execute_query("SELECT id, name").unwrap();

    let mut seen = Vec::new();
    rows.for_each_row(|r| {
        let id = r.get_i64_named("id")?;
        let name = r.get_string_named("name")?;
        seen.push((id, name));
        Ok(ControlFlow::Continue(()))
    })
    .unwrap();

    assert_eq!(
        seen,
        vec![(1, "alice".to_string()), (2, "bob".to_string())]
    );

    conn.close().unwrap();
    assert_eq!(pool.stats().idle, 1);
}

#[test]
fn test_prepared_insert_with_null_binding() {
    let pool = new_pool(MemoryDriver::new());
    let mut conn = pool.get_connection().unwrap();

    let mut insert = conn.prepare_statement("INSERT INTO t (id, name)").unwrap();
    insert.set_i64(0, 3).unwrap();
    insert.set_null(1, SqlType::Text).unwrap();
    let result = insert.execute_update().unwrap();
    assert_eq!(result.rows_affected, 1);
    assert_eq!(result.last_insert_id, Some(3));

    let mut stmt = conn.create_statement().unwrap();
    let mut rows = stmt.execute_query("SELECT id, name").unwrap();

    // Walk all rows and count SQL NULL names; only the inserted row has one
    let mut null_names = 0;
    rows.for_each_row(|r| {
        let _ = r.get_value_named("name")?;
        if r.was_null()? {
            null_names += 1;
        }
        Ok(ControlFlow::Continue(()))
    })
    .unwrap();
    assert_eq!(null_names, 1);

    conn.close().unwrap();
}

#[test]
fn test_reused_connection_sees_earlier_writes() {
    let driver = MemoryDriver::new();
    let pool = new_pool(driver.clone());

    // Session one inserts a row and returns the connection to the pool
    let mut conn = pool.get_connection().unwrap();
    let mut insert = conn.prepare_statement("INSERT INTO t (id, name)").unwrap();
    insert.set_i64(0, 7).unwrap();
    insert.set_string(1, "carol").unwrap();
    insert.execute_update().unwrap();
    conn.close().unwrap();

    // Session two reuses the same raw connection, so the row is visible
    let mut conn = pool.get_connection().unwrap();
    let mut stmt = conn.create_statement().unwrap();
    let mut rows = stmt.execute_query("SELECT id, name").unwrap();
    let mut count = 0;
    rows.for_each_row(|_| {
        count += 1;
        Ok(ControlFlow::Continue(()))
    })
    .unwrap();
    assert_eq!(count, 3);
    assert_eq!(driver.connects.get(), 1);
    conn.close().unwrap();
}

#[test]
fn test_empty_result_set_after_delete() {
    let pool = new_pool(MemoryDriver::new());
    let mut conn = pool.get_connection().unwrap();

    let mut stmt = conn.create_statement().unwrap();
    let deleted = stmt.execute_update("DELETE FROM t").unwrap();
    assert_eq!(deleted.rows_affected, 2);

    let mut rows = stmt.execute_query("SELECT id, name").unwrap();
    let mut calls = 0;
    rows.for_each_row(|_| {
        calls += 1;
        Ok(ControlFlow::Continue(()))
    })
    .unwrap();
    assert_eq!(calls, 0);

    conn.close().unwrap();
}

#[test]
fn test_handle_survives_driver_side_errors() {
    let pool = new_pool(MemoryDriver::new());
    let mut conn = pool.get_connection().unwrap();

    let mut stmt = conn.create_statement().unwrap();
    let err = stmt.execute_update("UPDATE t SET name = 'x'").unwrap_err();
    assert!(matches!(err, DbError::Driver { .. }));
    assert!(err.suggestion().is_some());

    // The handle and pool are unaffected by a failed statement
    assert!(!conn.is_closed());
    conn.close().unwrap();
    assert_eq!(pool.stats().idle, 1);
}
