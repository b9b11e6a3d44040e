//! In-memory transport
//!
//! A complete [`Transport`] implementation over nested ordered maps.
//! Serves as the reference backend for integration tests and local
//! development; every pooled "connection" shares the same underlying
//! tables, the way real connections share a cluster.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{Connector, ScanBounds, Scanner, Transport};
use crate::error::{Result, StoreError};
use crate::row::{ColumnAddress, Mutation, Row};
use crate::scan::{ColumnValueFilter, CompareOp, FilterList};

/// rowkey -> qualified column -> stored text
type Table = BTreeMap<String, BTreeMap<String, String>>;

/// In-memory wide-column store
#[derive(Default)]
pub struct MemTransport {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the row keys a scan visits, honoring bounds and direction
    fn select_keys(table: &Table, bounds: &ScanBounds) -> Vec<String> {
        // Misordered bounds scan nothing rather than panicking in range()
        if let (Some(start), Some(stop)) = (&bounds.start_row, &bounds.stop_row) {
            let misordered = if bounds.reversed {
                stop > start
            } else {
                start > stop
            };
            if misordered {
                return Vec::new();
            }
        }

        let range = if bounds.reversed {
            // Reversed scans walk from start_row downward, stop exclusive
            let upper = match &bounds.start_row {
                Some(key) => Bound::Included(key.clone()),
                None => Bound::Unbounded,
            };
            let lower = match &bounds.stop_row {
                Some(key) => Bound::Excluded(key.clone()),
                None => Bound::Unbounded,
            };
            (lower, upper)
        } else {
            let lower = match &bounds.start_row {
                Some(key) => Bound::Included(key.clone()),
                None => Bound::Unbounded,
            };
            let upper = match &bounds.stop_row {
                Some(key) => Bound::Excluded(key.clone()),
                None => Bound::Unbounded,
            };
            (lower, upper)
        };

        let mut keys: Vec<String> = table.range(range).map(|(k, _)| k.clone()).collect();
        if bounds.reversed {
            keys.reverse();
        }
        keys
    }

    /// Evaluate one compiled filter against a row's cells
    fn filter_matches(columns: &BTreeMap<String, String>, filter: &ColumnValueFilter) -> Result<bool> {
        let qualified = format!("{}:{}", filter.family, filter.qualifier);
        let cell = match columns.get(&qualified) {
            Some(value) => value,
            None => return Ok(!filter.filter_if_missing),
        };

        match &filter.op {
            // Substring comparator: the cell matches when it contains the seed
            CompareOp::Equal => Ok(cell.contains(&filter.value)),
            CompareOp::Native(name) => Err(StoreError::transport(format!(
                "mem transport does not evaluate native comparator {:?}",
                name
            ))),
        }
    }
}

#[async_trait]
impl Transport for MemTransport {
    async fn get(&self, table: &str, row: &str) -> Result<Option<Row>> {
        let tables = self.tables.read();
        let columns = tables
            .get(table)
            .and_then(|t| t.get(row))
            .filter(|columns| !columns.is_empty());

        Ok(columns.map(|columns| Row {
            key: row.to_string(),
            columns: columns.clone(),
        }))
    }

    async fn put(&self, table: &str, mutations: Vec<Mutation>) -> Result<()> {
        let mut tables = self.tables.write();
        let table = tables.entry(table.to_string()).or_default();

        for mutation in mutations {
            if mutation.cells.is_empty() {
                continue;
            }
            let row = table.entry(mutation.row).or_default();
            for cell in mutation.cells {
                row.insert(format!("{}:{}", cell.family, cell.qualifier), cell.value);
            }
        }
        Ok(())
    }

    async fn delete_columns(
        &self,
        table: &str,
        row: &str,
        columns: &[ColumnAddress],
    ) -> Result<()> {
        let mut tables = self.tables.write();
        let Some(table) = tables.get_mut(table) else {
            return Ok(());
        };
        let Some(cells) = table.get_mut(row) else {
            return Ok(());
        };

        for column in columns {
            cells.remove(&column.qualified());
        }
        if cells.is_empty() {
            table.remove(row);
        }
        Ok(())
    }

    async fn delete_row(&self, table: &str, row: &str) -> Result<()> {
        let mut tables = self.tables.write();
        if let Some(table) = tables.get_mut(table) {
            table.remove(row);
        }
        Ok(())
    }

    async fn scan(
        &self,
        table: &str,
        bounds: ScanBounds,
        filter: Option<FilterList>,
    ) -> Result<Box<dyn Scanner>> {
        let tables = self.tables.read();
        let Some(table) = tables.get(table) else {
            return Ok(Box::new(MemScanner { rows: Vec::new() }));
        };

        let mut rows = Vec::new();
        for key in Self::select_keys(table, &bounds) {
            let columns = &table[&key];
            let mut matches = true;
            if let Some(list) = &filter {
                for f in &list.filters {
                    if !Self::filter_matches(columns, f)? {
                        matches = false;
                        break;
                    }
                }
            }
            if matches {
                rows.push(Row {
                    key,
                    columns: columns.clone(),
                });
            }
        }

        // Cursor order: oldest-first so next_row pops from the front cheaply
        rows.reverse();
        Ok(Box::new(MemScanner { rows }))
    }
}

/// Cursor over a snapshot taken at scan-open time
struct MemScanner {
    /// Remaining rows, last element is the next to yield
    rows: Vec<Row>,
}

#[async_trait]
impl Scanner for MemScanner {
    async fn next_row(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.pop())
    }

    async fn close(&mut self) -> Result<()> {
        self.rows.clear();
        Ok(())
    }
}

/// Connector lending out handles to one shared in-memory store
#[derive(Clone)]
pub struct MemConnector {
    store: Arc<MemTransport>,
}

impl MemConnector {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemTransport::new()),
        }
    }

    /// Direct handle to the shared store, bypassing the pool
    pub fn store(&self) -> Arc<MemTransport> {
        Arc::clone(&self.store)
    }
}

impl Default for MemConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for MemConnector {
    async fn connect(&self) -> Result<Arc<dyn Transport>> {
        Ok(self.store() as Arc<dyn Transport>)
    }
}
