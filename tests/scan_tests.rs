//! Tests for scan pagination and filtering
//!
//! These tests verify:
//! - Marker discovery and resumption across page boundaries
//! - Limit-exact pages with `exclude_marker`
//! - Range bounds and reversed scans
//! - Compiled filter semantics, including the `latest` relaxation

use std::sync::Arc;

use serde_json::json;

use rowgate::scan::FilterSpec;
use rowgate::transport::mem::MemTransport;
use rowgate::{ColumnMap, Config, ScanRequest, StoreClient};

// =============================================================================
// Helper Functions
// =============================================================================

fn columns(value: serde_json::Value) -> ColumnMap {
    match value {
        serde_json::Value::Object(map) => map.into_iter().collect(),
        _ => panic!("expected a JSON object"),
    }
}

/// Client over a fresh store seeded with `count` rows `row-00 .. row-NN`
async fn seeded_client(count: usize) -> StoreClient {
    let client = StoreClient::new(Arc::new(MemTransport::new()), Config::default());
    for i in 0..count {
        client
            .put_row(
                "t",
                &format!("row-{:02}", i),
                &columns(json!({"cf:n": i})),
                false,
            )
            .await
            .unwrap();
    }
    client
}

fn keys(result: &rowgate::ScanResult) -> Vec<&str> {
    result.rows.iter().map(|r| r.key.as_str()).collect()
}

// =============================================================================
// Pagination
// =============================================================================

#[tokio::test]
async fn test_limited_scan_returns_the_next_rows_key_as_marker() {
    let client = seeded_client(10).await;

    let page = client
        .scan(ScanRequest::new("t").limit(3))
        .await
        .unwrap();

    assert_eq!(keys(&page), vec!["row-00", "row-01", "row-02"]);
    assert_eq!(page.marker.as_deref(), Some("row-03"));
}

#[tokio::test]
async fn test_resuming_from_marker_continues_without_overlap() {
    let client = seeded_client(10).await;

    let first = client.scan(ScanRequest::new("t").limit(3)).await.unwrap();
    let second = client
        .scan(
            ScanRequest::new("t")
                .start_row(first.marker.unwrap())
                .limit(3),
        )
        .await
        .unwrap();

    assert_eq!(keys(&second), vec!["row-03", "row-04", "row-05"]);
    assert_eq!(second.marker.as_deref(), Some("row-06"));
}

#[tokio::test]
async fn test_paging_to_exhaustion_visits_every_row_once() {
    let client = seeded_client(10).await;

    let mut seen = Vec::new();
    let mut start: Option<String> = None;
    loop {
        let mut request = ScanRequest::new("t").limit(4);
        if let Some(marker) = start.take() {
            request = request.start_row(marker);
        }
        let page = client.scan(request).await.unwrap();
        seen.extend(page.rows.iter().map(|r| r.key.clone()));

        match page.marker {
            Some(marker) => start = Some(marker),
            None => break,
        }
    }

    let expected: Vec<String> = (0..10).map(|i| format!("row-{:02}", i)).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_exclude_marker_returns_a_limit_exact_page() {
    let client = seeded_client(10).await;

    let page = client
        .scan(ScanRequest::new("t").limit(3).exclude_marker(true))
        .await
        .unwrap();

    assert_eq!(keys(&page).len(), 3);
    assert!(page.marker.is_none());
}

#[tokio::test]
async fn test_unlimited_scan_has_no_marker() {
    let client = seeded_client(10).await;

    let page = client.scan(ScanRequest::new("t")).await.unwrap();
    assert_eq!(page.rows.len(), 10);
    assert!(page.marker.is_none());
}

#[tokio::test]
async fn test_limit_matching_remaining_rows_exhausts_without_marker() {
    let client = seeded_client(3).await;

    let page = client.scan(ScanRequest::new("t").limit(3)).await.unwrap();
    assert_eq!(page.rows.len(), 3);
    assert!(page.marker.is_none());
}

// =============================================================================
// Bounds and Direction
// =============================================================================

#[tokio::test]
async fn test_scan_bounds_are_start_inclusive_stop_exclusive() {
    let client = seeded_client(6).await;

    let page = client
        .scan(ScanRequest::new("t").start_row("row-01").stop_row("row-04"))
        .await
        .unwrap();

    assert_eq!(keys(&page), vec!["row-01", "row-02", "row-03"]);
}

#[tokio::test]
async fn test_reversed_scan_walks_downward() {
    let client = seeded_client(6).await;

    let page = client
        .scan(
            ScanRequest::new("t")
                .start_row("row-04")
                .stop_row("row-01")
                .reversed(true),
        )
        .await
        .unwrap();

    assert_eq!(keys(&page), vec!["row-04", "row-03", "row-02"]);
}

#[tokio::test]
async fn test_reversed_scan_paginates_with_markers() {
    let client = seeded_client(6).await;

    let first = client
        .scan(ScanRequest::new("t").reversed(true).limit(2))
        .await
        .unwrap();
    assert_eq!(keys(&first), vec!["row-05", "row-04"]);
    assert_eq!(first.marker.as_deref(), Some("row-03"));

    let second = client
        .scan(
            ScanRequest::new("t")
                .start_row(first.marker.unwrap())
                .reversed(true)
                .limit(2),
        )
        .await
        .unwrap();
    assert_eq!(keys(&second), vec!["row-03", "row-02"]);
}

// =============================================================================
// Filters
// =============================================================================

async fn state_client() -> StoreClient {
    let client = StoreClient::new(Arc::new(MemTransport::new()), Config::default());
    client
        .put_row("t", "row-1", &columns(json!({"cf:state": "open"})), false)
        .await
        .unwrap();
    client
        .put_row("t", "row-2", &columns(json!({"cf:state": "closed"})), false)
        .await
        .unwrap();
    client
        .put_row("t", "row-3", &columns(json!({"cf:other": "x"})), false)
        .await
        .unwrap();
    client
}

#[tokio::test]
async fn test_equality_filter_keeps_matching_rows() {
    let client = state_client().await;

    let page = client
        .scan(ScanRequest::new("t").filter(FilterSpec::equals("cf", "state", "open")))
        .await
        .unwrap();

    assert_eq!(keys(&page), vec!["row-1"]);
}

#[tokio::test]
async fn test_default_filter_drops_rows_missing_the_column() {
    let client = state_client().await;

    let page = client
        .scan(ScanRequest::new("t").filter(FilterSpec::equals("cf", "state", "o")))
        .await
        .unwrap();

    // row-3 has no cf:state at all and is filtered out
    assert!(!keys(&page).contains(&"row-3"));
}

#[tokio::test]
async fn test_all_versions_filter_tolerates_missing_columns() {
    let client = state_client().await;

    let page = client
        .scan(
            ScanRequest::new("t")
                .filter(FilterSpec::equals("cf", "state", "open").all_versions()),
        )
        .await
        .unwrap();

    // row-1 matches, row-3 passes because the column is absent
    assert_eq!(keys(&page), vec!["row-1", "row-3"]);
}

#[tokio::test]
async fn test_conjunctive_filters_require_every_match() {
    let client = StoreClient::new(Arc::new(MemTransport::new()), Config::default());
    client
        .put_row(
            "t",
            "row-1",
            &columns(json!({"cf:state": "open", "cf:kind": "task"})),
            false,
        )
        .await
        .unwrap();
    client
        .put_row(
            "t",
            "row-2",
            &columns(json!({"cf:state": "open", "cf:kind": "note"})),
            false,
        )
        .await
        .unwrap();

    let page = client
        .scan(
            ScanRequest::new("t")
                .filter(FilterSpec::equals("cf", "state", "open"))
                .filter(FilterSpec::equals("cf", "kind", "task")),
        )
        .await
        .unwrap();

    assert_eq!(keys(&page), vec!["row-1"]);
}

#[tokio::test]
async fn test_filtered_scan_still_paginates() {
    let client = StoreClient::new(Arc::new(MemTransport::new()), Config::default());
    for i in 0..6 {
        client
            .put_row(
                "t",
                &format!("row-{}", i),
                &columns(json!({"cf:state": "open"})),
                false,
            )
            .await
            .unwrap();
    }

    let page = client
        .scan(
            ScanRequest::new("t")
                .filter(FilterSpec::equals("cf", "state", "open"))
                .limit(2),
        )
        .await
        .unwrap();

    assert_eq!(keys(&page), vec!["row-0", "row-1"]);
    assert_eq!(page.marker.as_deref(), Some("row-2"));
}
