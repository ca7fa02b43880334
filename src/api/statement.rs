//! Statement traits and execution results.

use crate::api::result_set::ResultSet;
use crate::error::DbResult;
use crate::value::{SqlType, Value};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Outcome of a data-modifying statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateResult {
    /// Number of rows affected.
    pub rows_affected: u64,
    /// Identifier generated for an inserted row, when the driver reports one.
    pub last_insert_id: Option<u64>,
}

impl UpdateResult {
    pub fn new(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            last_insert_id: None,
        }
    }

    pub fn with_insert_id(rows_affected: u64, last_insert_id: u64) -> Self {
        Self {
            rows_affected,
            last_insert_id: Some(last_insert_id),
        }
    }
}

/// A statement for direct SQL execution.
pub trait Statement {
    type Rows: ResultSet;

    /// Execute a query and return its result set.
    fn execute_query(&mut self, sql: &str) -> DbResult<Self::Rows>;

    /// Execute a data-modifying statement.
    fn execute_update(&mut self, sql: &str) -> DbResult<UpdateResult>;
}

/// A prepared, parameterized statement.
///
/// The typed setters are defined generically in terms of [`set_value`]; a
/// driver only has to implement `set_value` and `set_null` to accept every
/// scalar type. Binding an explicitly typed NULL goes through `set_null`
/// because a bare [`Value::Null`] carries no SQL type.
///
/// [`set_value`]: PreparedStatement::set_value
pub trait PreparedStatement {
    type Rows: ResultSet;

    fn execute_query(&mut self) -> DbResult<Self::Rows>;

    fn execute_update(&mut self) -> DbResult<UpdateResult>;

    /// Bind `value` to the 0-based parameter slot `index`.
    fn set_value(&mut self, index: usize, value: Value) -> DbResult<()>;

    /// Bind a NULL of the given SQL type.
    fn set_null(&mut self, index: usize, sql_type: SqlType) -> DbResult<()>;

    fn set_bool(&mut self, index: usize, v: bool) -> DbResult<()> {
        self.set_value(index, Value::Bool(v))
    }

    fn set_i8(&mut self, index: usize, v: i8) -> DbResult<()> {
        self.set_value(index, Value::TinyInt(v))
    }

    fn set_i16(&mut self, index: usize, v: i16) -> DbResult<()> {
        self.set_value(index, Value::SmallInt(v))
    }

    fn set_i32(&mut self, index: usize, v: i32) -> DbResult<()> {
        self.set_value(index, Value::Int(v))
    }

    fn set_i64(&mut self, index: usize, v: i64) -> DbResult<()> {
        self.set_value(index, Value::BigInt(v))
    }

    fn set_u8(&mut self, index: usize, v: u8) -> DbResult<()> {
        self.set_value(index, Value::UTinyInt(v))
    }

    fn set_u16(&mut self, index: usize, v: u16) -> DbResult<()> {
        self.set_value(index, Value::USmallInt(v))
    }

    fn set_u32(&mut self, index: usize, v: u32) -> DbResult<()> {
        self.set_value(index, Value::UInt(v))
    }

    fn set_u64(&mut self, index: usize, v: u64) -> DbResult<()> {
        self.set_value(index, Value::UBigInt(v))
    }

    fn set_f32(&mut self, index: usize, v: f32) -> DbResult<()> {
        self.set_value(index, Value::Float(v))
    }

    fn set_f64(&mut self, index: usize, v: f64) -> DbResult<()> {
        self.set_value(index, Value::Double(v))
    }

    fn set_string(&mut self, index: usize, v: impl Into<String>) -> DbResult<()>
    where
        Self: Sized,
    {
        self.set_value(index, Value::Text(v.into()))
    }

    fn set_bytes(&mut self, index: usize, v: Vec<u8>) -> DbResult<()> {
        self.set_value(index, Value::Bytes(v))
    }

    fn set_date(&mut self, index: usize, v: NaiveDate) -> DbResult<()> {
        self.set_value(index, Value::Date(v))
    }

    fn set_time(&mut self, index: usize, v: NaiveTime) -> DbResult<()> {
        self.set_value(index, Value::Time(v))
    }

    fn set_datetime(&mut self, index: usize, v: NaiveDateTime) -> DbResult<()> {
        self.set_value(index, Value::DateTime(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::result_set::ResultSet;

    struct RecordingStatement {
        bound: Vec<(usize, Value)>,
        nulls: Vec<(usize, SqlType)>,
    }

    struct NoRows;
    impl ResultSet for NoRows {}

    impl PreparedStatement for RecordingStatement {
        type Rows = NoRows;

        fn execute_query(&mut self) -> DbResult<NoRows> {
            Ok(NoRows)
        }

        fn execute_update(&mut self) -> DbResult<UpdateResult> {
            Ok(UpdateResult::new(0))
        }

        fn set_value(&mut self, index: usize, value: Value) -> DbResult<()> {
            self.bound.push((index, value));
            Ok(())
        }

        fn set_null(&mut self, index: usize, sql_type: SqlType) -> DbResult<()> {
            self.nulls.push((index, sql_type));
            Ok(())
        }
    }

    #[test]
    fn test_typed_setters_delegate_to_set_value() {
        let mut stmt = RecordingStatement {
            bound: vec![],
            nulls: vec![],
        };
        stmt.set_bool(0, true).unwrap();
        stmt.set_i64(1, -9).unwrap();
        stmt.set_u16(2, 7).unwrap();
        stmt.set_string(3, "abc").unwrap();
        stmt.set_null(4, SqlType::Text).unwrap();

        assert_eq!(stmt.bound[0], (0, Value::Bool(true)));
        assert_eq!(stmt.bound[1], (1, Value::BigInt(-9)));
        assert_eq!(stmt.bound[2], (2, Value::USmallInt(7)));
        assert_eq!(stmt.bound[3], (3, Value::Text("abc".into())));
        assert_eq!(stmt.nulls, vec![(4, SqlType::Text)]);
    }

    #[test]
    fn test_update_result_constructors() {
        assert_eq!(UpdateResult::new(3).last_insert_id, None);
        assert_eq!(
            UpdateResult::with_insert_id(1, 42).last_insert_id,
            Some(42)
        );
    }
}
