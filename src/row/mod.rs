//! Row Module
//!
//! Row and column addressing plus mutation construction.
//!
//! ## Addressing
//! Column keys are written as `family:qualifier` or as a bare `qualifier`,
//! in which case the configured default family applies. The split happens
//! at the FIRST colon; no escaping is supported, so a qualifier containing
//! a colon is only expressible with an explicit family prefix.

mod address;
mod mutation;

pub use address::{parse_column_key, ColumnAddress};
pub use mutation::{build_mutation, is_empty_value, serialize_value, Cell, Mutation};

use std::collections::BTreeMap;

/// Mapping from column key to an arbitrary serializable value, as supplied
/// by callers on the write path.
pub type ColumnMap = BTreeMap<String, serde_json::Value>;

/// A single row as returned by the read path.
///
/// Column names are fully qualified (`family:qualifier`) and cell values
/// carry the serialized text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Opaque row key
    pub key: String,

    /// Cells present in the row, keyed by qualified column name
    pub columns: BTreeMap<String, String>,
}

impl Row {
    /// Create a row with no cells
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            columns: BTreeMap::new(),
        }
    }

    /// Look up a cell by qualified column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    /// Whether the row carries no cells at all
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
