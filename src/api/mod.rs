//! Capability traits implemented by concrete drivers.
//!
//! Each entity in the access layer is a trait: a driver opens connections,
//! a connection produces statements, a statement produces result sets. The
//! pool and its handles are generic over any type implementing these traits,
//! so they never depend on a particular database.

pub mod connection;
pub mod driver;
pub mod result_set;
pub mod statement;

pub use connection::Connection;
pub use driver::Driver;
pub use result_set::ResultSet;
pub use statement::{PreparedStatement, Statement, UpdateResult};
