// ABOUTME: Row value sum type over the SQLite storage classes
// ABOUTME: Bridges source values into MySQL bind parameters without coercion

use rusqlite::types::Value as SqliteValue;

/// A single cell value, one variant per SQLite storage class.
///
/// Rows travel through the pipeline as `Vec<Value>` in column order, so
/// binding into the destination's positional placeholders never guesses
/// at a type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<SqliteValue> for Value {
    fn from(value: SqliteValue) -> Self {
        match value {
            SqliteValue::Null => Value::Null,
            SqliteValue::Integer(i) => Value::Integer(i),
            SqliteValue::Real(f) => Value::Real(f),
            SqliteValue::Text(s) => Value::Text(s),
            SqliteValue::Blob(b) => Value::Blob(b),
        }
    }
}

impl From<Value> for mysql_async::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => mysql_async::Value::NULL,
            Value::Integer(i) => mysql_async::Value::Int(i),
            Value::Real(f) => mysql_async::Value::Double(f),
            Value::Text(s) => mysql_async::Value::Bytes(s.into_bytes()),
            Value::Blob(b) => mysql_async::Value::Bytes(b),
        }
    }
}

/// Read one source row into positional values matching the SELECT column order.
pub fn row_values(row: &rusqlite::Row<'_>, column_count: usize) -> rusqlite::Result<Vec<Value>> {
    (0..column_count)
        .map(|idx| row.get::<_, SqliteValue>(idx).map(Value::from))
        .collect()
}
