//! Driver trait.

use crate::api::connection::Connection;
use crate::error::DbResult;
use std::collections::HashMap;

/// A database driver: knows how to open a raw connection to one specific
/// RDBMS given a URL and a parameter mapping.
///
/// Drivers are external collaborators. Any failure raised by `connect` is
/// treated as opaque by the rest of this crate and propagated unchanged.
pub trait Driver {
    type Conn: Connection;

    /// Open a raw connection to the database at `url`.
    fn connect(&self, url: &str, params: &HashMap<String, String>) -> DbResult<Self::Conn>;
}
