//! Database-agnostic value types.
//!
//! `Value` is the generic variant type carried across the driver boundary:
//! prepared statement parameters go in as `Value`s and untyped column reads
//! come back as `Value`s. `SqlType` names the SQL type of a slot without a
//! value, which is needed to bind an explicitly typed NULL.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value as JsonValue;

/// SQL scalar types understood by the access layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlType {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    UTinyInt,
    USmallInt,
    UInt,
    UBigInt,
    Float,
    Double,
    Text,
    Binary,
    Date,
    Time,
    DateTime,
}

/// A single database value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    TinyInt(i8),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    UTinyInt(u8),
    USmallInt(u16),
    UInt(u32),
    UBigInt(u64),
    Float(f32),
    Double(f64),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Check whether this value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The SQL type of this value, or `None` for an untyped NULL.
    pub fn sql_type(&self) -> Option<SqlType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(SqlType::Boolean),
            Value::TinyInt(_) => Some(SqlType::TinyInt),
            Value::SmallInt(_) => Some(SqlType::SmallInt),
            Value::Int(_) => Some(SqlType::Int),
            Value::BigInt(_) => Some(SqlType::BigInt),
            Value::UTinyInt(_) => Some(SqlType::UTinyInt),
            Value::USmallInt(_) => Some(SqlType::USmallInt),
            Value::UInt(_) => Some(SqlType::UInt),
            Value::UBigInt(_) => Some(SqlType::UBigInt),
            Value::Float(_) => Some(SqlType::Float),
            Value::Double(_) => Some(SqlType::Double),
            Value::Text(_) => Some(SqlType::Text),
            Value::Bytes(_) => Some(SqlType::Binary),
            Value::Date(_) => Some(SqlType::Date),
            Value::Time(_) => Some(SqlType::Time),
            Value::DateTime(_) => Some(SqlType::DateTime),
        }
    }

    /// Convert to a JSON value.
    ///
    /// Binary data is decoded as UTF-8 text when `decode_binary` is true and
    /// the bytes are valid UTF-8; otherwise it is base64 encoded. Date and
    /// time values render in ISO 8601.
    pub fn to_json(&self, decode_binary: bool) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(v) => JsonValue::Bool(*v),
            Value::TinyInt(v) => JsonValue::Number((*v).into()),
            Value::SmallInt(v) => JsonValue::Number((*v).into()),
            Value::Int(v) => JsonValue::Number((*v).into()),
            Value::BigInt(v) => JsonValue::Number((*v).into()),
            Value::UTinyInt(v) => JsonValue::Number((*v).into()),
            Value::USmallInt(v) => JsonValue::Number((*v).into()),
            Value::UInt(v) => JsonValue::Number((*v).into()),
            Value::UBigInt(v) => JsonValue::Number((*v).into()),
            Value::Float(v) => float_to_json(*v as f64),
            Value::Double(v) => float_to_json(*v),
            Value::Text(v) => JsonValue::String(v.clone()),
            Value::Bytes(v) => encode_binary_value(v, decode_binary),
            Value::Date(v) => JsonValue::String(v.to_string()),
            Value::Time(v) => JsonValue::String(v.to_string()),
            Value::DateTime(v) => JsonValue::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
        }
    }
}

fn float_to_json(v: f64) -> JsonValue {
    serde_json::Number::from_f64(v)
        .map(JsonValue::Number)
        .unwrap_or_else(|| JsonValue::String(v.to_string()))
}

/// Encode binary data as a JSON string.
///
/// If `decode_binary` is true, attempts to decode as UTF-8 text first.
/// Falls back to base64 encoding if not valid UTF-8 or if `decode_binary`
/// is false.
pub fn encode_binary_value(bytes: &[u8], decode_binary: bool) -> JsonValue {
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    if decode_binary {
        match std::str::from_utf8(bytes) {
            Ok(s) => JsonValue::String(s.to_string()),
            Err(_) => JsonValue::String(STANDARD.encode(bytes)),
        }
    } else {
        JsonValue::String(STANDARD.encode(bytes))
    }
}
