//! Filter compilation
//!
//! Translates declarative column-value filter specs into the conjunctive
//! filter list a scan attaches to its cursor.

use serde::{Deserialize, Serialize};

/// A declarative single-column filter as supplied by callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Column family holding the compared cell
    pub family: String,

    /// Qualifier of the compared cell
    pub qualifier: String,

    /// `"="` for equality, or a store-native operator name passed through
    /// verbatim
    #[serde(default = "default_comparator")]
    pub comparator: String,

    /// Value the comparator is seeded with
    pub value: String,

    /// Restrict the comparison to the latest cell version and drop rows
    /// missing the column. Setting this to `false` relaxes both.
    #[serde(default = "default_latest")]
    pub latest: bool,
}

fn default_comparator() -> String {
    "=".to_string()
}

fn default_latest() -> bool {
    true
}

impl FilterSpec {
    /// Equality filter on `family:qualifier`, latest version only
    pub fn equals(
        family: impl Into<String>,
        qualifier: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            family: family.into(),
            qualifier: qualifier.into(),
            comparator: default_comparator(),
            value: value.into(),
            latest: default_latest(),
        }
    }

    /// Relax the filter to apply across all versions and tolerate rows
    /// missing the column
    pub fn all_versions(mut self) -> Self {
        self.latest = false;
        self
    }
}

/// Comparison operator attached to a compiled filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareOp {
    /// Equality comparison (`"="` in the declarative form)
    Equal,

    /// A store-native operator name, forwarded untranslated
    Native(String),
}

/// One compiled single-column comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnValueFilter {
    pub family: String,
    pub qualifier: String,
    pub op: CompareOp,

    /// Substring-style comparator seed
    pub value: String,

    /// Drop rows that do not carry the column at all
    pub filter_if_missing: bool,

    /// Compare only the latest cell version
    pub latest_version_only: bool,
}

/// Conjunctive (`AND`) list of compiled filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterList {
    pub filters: Vec<ColumnValueFilter>,
}

/// Compile declarative specs into the filter list attached to a scan.
///
/// An empty spec list compiles to no attachment at all: the scan proceeds
/// unfiltered.
pub fn compile_filters(specs: &[FilterSpec]) -> Option<FilterList> {
    if specs.is_empty() {
        return None;
    }

    let filters = specs
        .iter()
        .map(|spec| ColumnValueFilter {
            family: spec.family.clone(),
            qualifier: spec.qualifier.clone(),
            op: match spec.comparator.as_str() {
                "=" => CompareOp::Equal,
                native => CompareOp::Native(native.to_string()),
            },
            value: spec.value.clone(),
            filter_if_missing: spec.latest,
            latest_version_only: spec.latest,
        })
        .collect();

    Some(FilterList { filters })
}
