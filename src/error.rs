//! Error types for the database access layer.
//!
//! This module defines all error types using `thiserror` for ergonomic error
//! handling. Driver-origin failures are carried opaquely; pool and handle
//! misuse get their own variants so callers can tell a broken driver apart
//! from their own bookkeeping bugs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// A failure originating inside a driver, during connection establishment
    /// or SQL execution. Opaque to this crate and propagated unchanged.
    #[error("Driver error: {message}")]
    Driver { message: String, suggestion: String },

    /// A raw connection was handed back that the pool does not currently
    /// count as active. Indicates a double release or a connection that did
    /// not originate from this pool.
    #[error("Connection not found in pool (id: {id})")]
    ConnectionNotInPool { id: u64 },

    /// An operation was attempted on a pooled connection handle after it was
    /// closed.
    #[error("Connection handle is closed")]
    HandleClosed,

    /// A default `ResultSet`/`PreparedStatement` method the concrete driver
    /// has not overridden. Signals an incomplete driver.
    #[error("Operation not supported by this driver: {operation}")]
    Unsupported { operation: &'static str },

    /// `find_column` was asked for a column the result set does not have.
    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl DbError {
    /// Create a driver error with a helpful suggestion.
    pub fn driver(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a connection-not-in-pool error.
    pub fn connection_not_in_pool(id: u64) -> Self {
        Self::ConnectionNotInPool { id }
    }

    /// Create an unsupported-operation error.
    pub fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }

    /// Create a column-not-found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Driver { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }

    /// True when the error indicates misuse of the pool or a handle rather
    /// than a failure inside a driver.
    pub fn is_misuse(&self) -> bool {
        matches!(self, Self::ConnectionNotInPool { .. } | Self::HandleClosed)
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;
