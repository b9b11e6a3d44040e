//! Client facade
//!
//! Row-level and batch-level operations over one live connection,
//! composing addressing, mutation building, filter compilation, scan
//! pagination, and empty-column reaping.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::future::try_join_all;

use crate::config::Config;
use crate::error::Result;
use crate::reaper::reap_empty_columns;
use crate::row::{build_mutation, parse_column_key, ColumnAddress, ColumnMap, Row};
use crate::scan::{compile_filters, ScanPaginator, ScanRequest, ScanResult};
use crate::transport::{ScanBounds, Transport};

/// Row-oriented client over a wide-column store connection.
///
/// Usually produced by [`ConnectionPool::acquire`](crate::ConnectionPool::acquire);
/// constructing one directly over a [`Transport`] is supported for
/// unpooled use.
pub struct StoreClient {
    transport: Arc<dyn Transport>,
    config: Config,
}

impl StoreClient {
    pub fn new(transport: Arc<dyn Transport>, config: Config) -> Self {
        Self { transport, config }
    }

    /// The client's configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetch a single row. A row with no data resolves to `None`.
    pub async fn get_row(&self, table: &str, row: &str) -> Result<Option<Row>> {
        self.transport.get(table, row).await
    }

    /// Fetch several rows concurrently, dropping the keys that returned
    /// no data.
    pub async fn get_rows(&self, table: &str, rows: &[&str]) -> Result<Vec<Row>> {
        let fetched = try_join_all(rows.iter().map(|row| self.transport.get(table, row))).await?;
        Ok(fetched.into_iter().flatten().collect())
    }

    /// Page through a scan, returning the rows and, for a truncated page,
    /// the continuation marker to resume from.
    pub async fn scan(&self, request: ScanRequest) -> Result<ScanResult> {
        let filter = compile_filters(&request.filters);
        let bounds = ScanBounds {
            start_row: request.start_row,
            stop_row: request.stop_row,
            reversed: request.reversed,
        };

        let mut scanner = self.transport.scan(&request.table, bounds, filter).await?;
        ScanPaginator::new(request.limit, request.exclude_marker)
            .drain(scanner.as_mut())
            .await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Write one row.
    ///
    /// With `remove_empty`, columns whose incoming value is empty are
    /// deleted from the store first, so clearing a field removes its cell
    /// instead of leaving an empty one behind. A mutation whose columns
    /// all serialized empty issues no write at all.
    pub async fn put_row(
        &self,
        table: &str,
        row: &str,
        columns: &ColumnMap,
        remove_empty: bool,
    ) -> Result<()> {
        reap_empty_columns(
            self.transport.as_ref(),
            table,
            [(row, columns)],
            &self.config.default_family,
            remove_empty,
        )
        .await?;

        let mutation = build_mutation(row, columns, &self.config.default_family)?;
        if mutation.is_empty() {
            tracing::trace!(table, row, "put carried no writable cells");
            return Ok(());
        }

        tracing::trace!(table, row, cells = mutation.cells.len(), "putting row");
        self.transport.put(table, vec![mutation]).await
    }

    /// Write a batch of rows, one mutation per row key.
    ///
    /// An empty batch short-circuits to success with no RPC call. The
    /// reap (when requested) covers every row of the batch before the
    /// write goes out.
    pub async fn put_rows(
        &self,
        table: &str,
        rows: &BTreeMap<String, ColumnMap>,
        remove_empty: bool,
    ) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        reap_empty_columns(
            self.transport.as_ref(),
            table,
            rows.iter().map(|(row, columns)| (row.as_str(), columns)),
            &self.config.default_family,
            remove_empty,
        )
        .await?;

        let mut mutations = Vec::with_capacity(rows.len());
        for (row, columns) in rows {
            let mutation = build_mutation(row, columns, &self.config.default_family)?;
            if !mutation.is_empty() {
                mutations.push(mutation);
            }
        }
        if mutations.is_empty() {
            tracing::trace!(table, "batch carried no writable cells");
            return Ok(());
        }

        tracing::trace!(table, rows = mutations.len(), "putting batch");
        self.transport.put(table, mutations).await
    }

    // =========================================================================
    // Deletes
    // =========================================================================

    /// Delete a whole row, or specific columns of it.
    ///
    /// `None` deletes the row. `Some(columns)` deletes exactly the named
    /// columns; an explicitly empty list deletes NOTHING and succeeds,
    /// never falling back to whole-row deletion.
    pub async fn delete(&self, table: &str, row: &str, columns: Option<&[&str]>) -> Result<()> {
        let Some(columns) = columns else {
            tracing::trace!(table, row, "deleting whole row");
            return self.transport.delete_row(table, row).await;
        };

        if columns.is_empty() {
            tracing::trace!(table, row, "empty column list, deleting nothing");
            return Ok(());
        }

        let addresses: Vec<ColumnAddress> = columns
            .iter()
            .map(|column| parse_column_key(column, &self.config.default_family))
            .collect();

        tracing::trace!(table, row, columns = addresses.len(), "deleting columns");
        self.transport.delete_columns(table, row, &addresses).await
    }
}
