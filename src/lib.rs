//! Driver-agnostic database access layer.
//!
//! This library provides a uniform interface for connecting to relational
//! databases, issuing queries, binding parameters, and iterating result
//! rows, backed by a connection-pooling data source. Concrete drivers plug
//! in by implementing the capability traits in [`api`]; the pool in [`pool`]
//! is generic over any such driver.

pub mod api;
pub mod config;
pub mod datasource;
pub mod error;
pub mod pool;
pub mod value;

pub use api::{Connection, Driver, PreparedStatement, ResultSet, Statement, UpdateResult};
pub use config::PoolConfig;
pub use datasource::DataSource;
pub use error::{DbError, DbResult};
pub use pool::{ConnectionPool, PoolStats, PooledConnection};
pub use value::{SqlType, Value};
