//! Scan pagination state machine
//!
//! Drives a cursor to exhaustion or to a page boundary, computing the
//! continuation marker for resumable scans.
//!
//! ## States
//! ```text
//! SCANNING ──fetch──▶ SCANNING
//!     │
//!     ├── transport error ──▶ FAILED  (cursor closed, error propagated)
//!     ├── exhaustion ───────▶ DONE    (rows, no marker)
//!     └── limit reached ────▶ DONE
//!           with marker discovery: one extra fetch supplies the
//!           continuation key; its row is NOT accumulated
//! ```

use crate::error::Result;
use crate::row::Row;
use crate::scan::ScanResult;
use crate::transport::Scanner;

/// Paginator lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    Done,
    Failed,
}

/// Accumulates one page of a cursor-based scan.
///
/// Fetches are strictly sequential: the next fetch is never issued before
/// the previous one resolves, preserving cursor consistency.
pub(crate) struct ScanPaginator {
    limit: Option<usize>,
    exclude_marker: bool,
    rows: Vec<Row>,
    marker: Option<String>,
    state: ScanState,
}

impl ScanPaginator {
    pub(crate) fn new(limit: Option<usize>, exclude_marker: bool) -> Self {
        Self {
            limit,
            exclude_marker,
            rows: Vec::new(),
            marker: None,
            state: ScanState::Scanning,
        }
    }

    /// Whether the accumulator has filled the requested page.
    ///
    /// A zero limit counts as "no limit": pagination only engages from
    /// one row upward.
    fn at_limit(&self) -> bool {
        match self.limit {
            Some(limit) if limit > 0 => self.rows.len() >= limit,
            _ => false,
        }
    }

    /// Drive the cursor until the page is complete.
    ///
    /// The cursor is closed on every exit path; a close failure on the
    /// success path is surfaced, while a close failure after a fetch
    /// error is dropped in favor of the original error.
    pub(crate) async fn drain(mut self, scanner: &mut dyn Scanner) -> Result<ScanResult> {
        while self.state == ScanState::Scanning {
            let fetched = match scanner.next_row().await {
                Ok(row) => row,
                Err(e) => {
                    self.state = ScanState::Failed;
                    let _ = scanner.close().await;
                    tracing::warn!(error = %e, "scan failed mid-page");
                    return Err(e);
                }
            };

            let row = match fetched {
                Some(row) => row,
                None => {
                    self.state = ScanState::Done;
                    continue;
                }
            };

            self.rows.push(row);
            if !self.at_limit() {
                continue;
            }

            if self.exclude_marker {
                self.state = ScanState::Done;
                continue;
            }

            // One extra fetch discovers the continuation key. The row it
            // returns only supplies the marker and is never accumulated.
            match scanner.next_row().await {
                Ok(next) => {
                    self.marker = next.map(|r| r.key);
                    self.state = ScanState::Done;
                }
                Err(e) => {
                    self.state = ScanState::Failed;
                    let _ = scanner.close().await;
                    tracing::warn!(error = %e, "marker discovery fetch failed");
                    return Err(e);
                }
            }
        }

        scanner.close().await?;
        tracing::trace!(
            rows = self.rows.len(),
            marker = self.marker.as_deref().unwrap_or(""),
            "scan page complete"
        );

        Ok(ScanResult {
            rows: self.rows,
            marker: self.marker,
        })
    }
}
