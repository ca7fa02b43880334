//! Result set trait and row iteration.
//!
//! Every data-access method defaults to an `Unsupported` error so that an
//! incomplete driver fails loudly on first use instead of handing back a
//! default value. Concrete drivers override the methods they actually
//! support; the name-keyed accessors come for free once `find_column` and
//! the index-keyed accessors exist.

use crate::error::{DbError, DbResult};
use crate::value::Value;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::ops::ControlFlow;

/// A result set produced by executing a query.
///
/// The cursor starts positioned before the first row; `first` moves it to the
/// first row and `next` advances it. Both report whether a row is available.
pub trait ResultSet {
    /// Position the cursor on the first row. Returns false for an empty set.
    fn first(&mut self) -> DbResult<bool> {
        Err(DbError::unsupported("ResultSet::first"))
    }

    /// Advance to the next row. Returns false when no rows remain.
    fn next(&mut self) -> DbResult<bool> {
        Err(DbError::unsupported("ResultSet::next"))
    }

    /// Resolve a column name to its 0-based index.
    fn find_column(&self, name: &str) -> DbResult<usize> {
        let _ = name;
        Err(DbError::unsupported("ResultSet::find_column"))
    }

    /// Whether the most recently fetched value was SQL NULL.
    fn was_null(&self) -> DbResult<bool> {
        Err(DbError::unsupported("ResultSet::was_null"))
    }

    fn get_bool(&mut self, index: usize) -> DbResult<bool> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_bool"))
    }

    fn get_i8(&mut self, index: usize) -> DbResult<i8> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_i8"))
    }

    fn get_i16(&mut self, index: usize) -> DbResult<i16> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_i16"))
    }

    fn get_i32(&mut self, index: usize) -> DbResult<i32> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_i32"))
    }

    fn get_i64(&mut self, index: usize) -> DbResult<i64> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_i64"))
    }

    fn get_u8(&mut self, index: usize) -> DbResult<u8> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_u8"))
    }

    fn get_u16(&mut self, index: usize) -> DbResult<u16> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_u16"))
    }

    fn get_u32(&mut self, index: usize) -> DbResult<u32> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_u32"))
    }

    fn get_u64(&mut self, index: usize) -> DbResult<u64> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_u64"))
    }

    fn get_f32(&mut self, index: usize) -> DbResult<f32> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_f32"))
    }

    fn get_f64(&mut self, index: usize) -> DbResult<f64> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_f64"))
    }

    fn get_string(&mut self, index: usize) -> DbResult<String> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_string"))
    }

    fn get_bytes(&mut self, index: usize) -> DbResult<Vec<u8>> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_bytes"))
    }

    fn get_date(&mut self, index: usize) -> DbResult<NaiveDate> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_date"))
    }

    fn get_time(&mut self, index: usize) -> DbResult<NaiveTime> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_time"))
    }

    fn get_datetime(&mut self, index: usize) -> DbResult<NaiveDateTime> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_datetime"))
    }

    /// Fetch a column as the generic variant type.
    fn get_value(&mut self, index: usize) -> DbResult<Value> {
        let _ = index;
        Err(DbError::unsupported("ResultSet::get_value"))
    }

    fn get_bool_named(&mut self, name: &str) -> DbResult<bool> {
        let index = self.find_column(name)?;
        self.get_bool(index)
    }

    fn get_i8_named(&mut self, name: &str) -> DbResult<i8> {
        let index = self.find_column(name)?;
        self.get_i8(index)
    }

    fn get_i16_named(&mut self, name: &str) -> DbResult<i16> {
        let index = self.find_column(name)?;
        self.get_i16(index)
    }

    fn get_i32_named(&mut self, name: &str) -> DbResult<i32> {
        let index = self.find_column(name)?;
        self.get_i32(index)
    }

    fn get_i64_named(&mut self, name: &str) -> DbResult<i64> {
        let index = self.find_column(name)?;
        self.get_i64(index)
    }

    fn get_u8_named(&mut self, name: &str) -> DbResult<u8> {
        let index = self.find_column(name)?;
        self.get_u8(index)
    }

    fn get_u16_named(&mut self, name: &str) -> DbResult<u16> {
        let index = self.find_column(name)?;
        self.get_u16(index)
    }

    fn get_u32_named(&mut self, name: &str) -> DbResult<u32> {
        let index = self.find_column(name)?;
        self.get_u32(index)
    }

    fn get_u64_named(&mut self, name: &str) -> DbResult<u64> {
        let index = self.find_column(name)?;
        self.get_u64(index)
    }

    fn get_f32_named(&mut self, name: &str) -> DbResult<f32> {
        let index = self.find_column(name)?;
        self.get_f32(index)
    }

    fn get_f64_named(&mut self, name: &str) -> DbResult<f64> {
        let index = self.find_column(name)?;
        self.get_f64(index)
    }

    fn get_string_named(&mut self, name: &str) -> DbResult<String> {
        let index = self.find_column(name)?;
        self.get_string(index)
    }

    fn get_bytes_named(&mut self, name: &str) -> DbResult<Vec<u8>> {
        let index = self.find_column(name)?;
        self.get_bytes(index)
    }

    fn get_date_named(&mut self, name: &str) -> DbResult<NaiveDate> {
        let index = self.find_column(name)?;
        self.get_date(index)
    }

    fn get_time_named(&mut self, name: &str) -> DbResult<NaiveTime> {
        let index = self.find_column(name)?;
        self.get_time(index)
    }

    fn get_datetime_named(&mut self, name: &str) -> DbResult<NaiveDateTime> {
        let index = self.find_column(name)?;
        self.get_datetime(index)
    }

    fn get_value_named(&mut self, name: &str) -> DbResult<Value> {
        let index = self.find_column(name)?;
        self.get_value(index)
    }

    /// Walk the result set, invoking `f` once per row.
    ///
    /// An empty result set invokes `f` zero times. Iteration stops when `f`
    /// returns [`ControlFlow::Break`] or when the rows run out. The walk is
    /// lazy and single-pass; re-walking requires calling `first` again,
    /// which only works if the driver supports repositioning.
    fn for_each_row<F>(&mut self, mut f: F) -> DbResult<()>
    where
        Self: Sized,
        F: FnMut(&mut Self) -> DbResult<ControlFlow<()>>,
    {
        if !self.first()? {
            return Ok(());
        }
        loop {
            if f(self)?.is_break() {
                return Ok(());
            }
            if !self.next()? {
                return Ok(());
            }
        }
    }
}
