//! In-memory view of a table read from a collection

use crate::codec::{obj_to_string, string_to_obj, CodecError, Field};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Column injected into every row read from a collection.
pub const EXP_ID_COLUMN: &str = "exp_id";

/// One record: column name to value.
pub type Row = BTreeMap<String, Value>;

/// Rows of one named table across every experiment of a collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    name: String,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self { name: name.into(), rows }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Union of the columns of every row, sorted.
    pub fn columns(&self) -> Vec<&str> {
        let columns: BTreeSet<&str> =
            self.rows.iter().flat_map(|row| row.keys().map(String::as_str)).collect();
        columns.into_iter().collect()
    }

    /// First row whose `column` holds the string `value`.
    pub fn find(&self, column: &str, value: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.get(column).and_then(Value::as_str) == Some(value))
    }

    /// First row belonging to experiment `exp_id`.
    pub fn row_for(&self, exp_id: &str) -> Option<&Row> {
        self.find(EXP_ID_COLUMN, exp_id)
    }
}

/// Serialize a row for storage. Arrays and objects become object strings.
pub(crate) fn encode_row(row: &Row) -> Result<String, CodecError> {
    let mut stored = Map::new();
    for (column, value) in row {
        let value = match value {
            Value::Array(_) | Value::Object(_) => Value::String(obj_to_string(value)?),
            scalar => scalar.clone(),
        };
        stored.insert(column.clone(), value);
    }
    Ok(Value::Object(stored).to_string())
}

/// Inverse of [`encode_row`]. Strings that are not object strings stay strings.
pub(crate) fn decode_row(stored: &str) -> Result<Row, serde_json::Error> {
    let raw: BTreeMap<String, Value> = serde_json::from_str(stored)?;
    Ok(raw.into_iter().map(|(column, value)| (column, decode_value(value))).collect())
}

fn decode_value(value: Value) -> Value {
    match value {
        Value::String(s) if !s.is_empty() => match string_to_obj::<Value>(s) {
            Field::Object(decoded) => decoded,
            Field::Text(s) => Value::String(s),
            Field::Empty => Value::String(String::new()),
        },
        other => other,
    }
}
