//! Mutation construction
//!
//! Builds single-row mutations from a column map, serializing non-string
//! values to their canonical JSON text.

use serde_json::Value;

use super::{parse_column_key, ColumnMap};
use crate::error::{Result, StoreError};

/// One cell of a row mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub family: String,
    pub qualifier: String,
    pub value: String,
}

/// An insert/update mutation for a single row, accepted by the store's
/// write path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub row: String,
    pub cells: Vec<Cell>,
}

impl Mutation {
    /// Whether every column was skipped during construction
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Serialize a column value to its stored text form.
///
/// Strings pass through verbatim (they are NOT re-quoted); every other
/// value becomes its canonical JSON text, so numbers, booleans, arrays and
/// objects all survive a round trip through the store as text.
pub fn serialize_value(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => serde_json::to_string(other)
            .map_err(|e| StoreError::Serialization(e.to_string())),
    }
}

/// Whether a value counts as "empty" for deletion purposes.
///
/// Empty means `null`, `false`, or the empty string. The number `0` is
/// NOT empty and must survive a write with cleanup enabled.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Build the mutation for one row.
///
/// Columns whose serialized value is the empty string are skipped rather
/// than rejected: writing an empty value is a no-op, and physically
/// removing the cell is the reaper's job.
pub fn build_mutation(row: &str, columns: &ColumnMap, default_family: &str) -> Result<Mutation> {
    let mut cells = Vec::with_capacity(columns.len());

    for (key, value) in columns {
        let serialized = serialize_value(value)?;
        if serialized.is_empty() {
            tracing::trace!(row, column = %key, "skipping empty-valued column");
            continue;
        }

        let address = parse_column_key(key, default_family);
        cells.push(Cell {
            family: address.family,
            qualifier: address.qualifier,
            value: serialized,
        });
    }

    Ok(Mutation {
        row: row.to_string(),
        cells,
    })
}
