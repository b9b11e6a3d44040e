//! Transport Module
//!
//! The seam between this access layer and the wide-column store's RPC
//! client. The wire protocol, filter evaluation, and cluster lookup all
//! live behind these traits; the crate only decides WHAT to send and how
//! to page through what comes back.
//!
//! [`mem`] provides an in-memory implementation used as the reference
//! backend and test double.

pub mod mem;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::row::{ColumnAddress, Mutation, Row};
use crate::scan::FilterList;

/// Row-range parameters handed to the store when opening a cursor.
///
/// Bounds follow store convention: `start_row` inclusive, `stop_row`
/// exclusive, with a reversed scan walking from `start_row` downward.
#[derive(Debug, Clone, Default)]
pub struct ScanBounds {
    pub start_row: Option<String>,
    pub stop_row: Option<String>,
    pub reversed: bool,
}

/// A live client connection to the store.
///
/// Implementations surface every RPC failure as
/// [`StoreError::Transport`](crate::StoreError::Transport); nothing here
/// retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch a single row; absent rows resolve to `None`
    async fn get(&self, table: &str, row: &str) -> Result<Option<Row>>;

    /// Apply one mutation per row, each row atomic on its own
    async fn put(&self, table: &str, mutations: Vec<Mutation>) -> Result<()>;

    /// Delete exactly the named columns from a row
    async fn delete_columns(
        &self,
        table: &str,
        row: &str,
        columns: &[ColumnAddress],
    ) -> Result<()>;

    /// Delete a whole row
    async fn delete_row(&self, table: &str, row: &str) -> Result<()>;

    /// Open a cursor over a row range with an optional filter attached
    async fn scan(
        &self,
        table: &str,
        bounds: ScanBounds,
        filter: Option<FilterList>,
    ) -> Result<Box<dyn Scanner>>;
}

/// An open scan cursor.
///
/// Callers fetch strictly sequentially and close the cursor on every exit
/// path; the paginator owns that discipline.
#[async_trait]
pub trait Scanner: Send {
    /// Fetch the next row, or `None` on exhaustion
    async fn next_row(&mut self) -> Result<Option<Row>>;

    /// Release the cursor's server-side resources
    async fn close(&mut self) -> Result<()>;
}

/// Establishes fresh connections on behalf of the pool
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn Transport>>;
}
