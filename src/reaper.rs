//! Empty-column reaping
//!
//! Deletes columns whose incoming value is empty, so that a write which
//! clears a field physically removes the cell instead of storing an empty
//! one. Runs before the actual write; per-row deletions across a batch
//! proceed concurrently and the whole reap fails if any one of them fails.

use futures_util::future::try_join_all;

use crate::error::Result;
use crate::row::{is_empty_value, parse_column_key, ColumnAddress, ColumnMap};
use crate::transport::Transport;

/// Delete the empty-valued columns of every row in the batch.
///
/// With `enabled` false this resolves immediately without touching the
/// store. The number `0` never counts as empty; see
/// [`is_empty_value`](crate::row::is_empty_value) for the exact rule.
pub(crate) async fn reap_empty_columns<'a, I>(
    transport: &dyn Transport,
    table: &str,
    rows: I,
    default_family: &str,
    enabled: bool,
) -> Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a ColumnMap)>,
{
    if !enabled {
        return Ok(());
    }

    let mut deletions = Vec::new();
    for (row, columns) in rows {
        let empties: Vec<ColumnAddress> = columns
            .iter()
            .filter(|(_, value)| is_empty_value(value))
            .map(|(key, _)| parse_column_key(key, default_family))
            .collect();

        if empties.is_empty() {
            continue;
        }

        deletions.push(async move {
            tracing::trace!(row, columns = empties.len(), "reaping empty columns");
            transport.delete_columns(table, row, &empties).await
        });
    }

    if deletions.is_empty() {
        return Ok(());
    }

    try_join_all(deletions).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;
    use crate::row::{Cell, Mutation};
    use crate::transport::mem::MemTransport;

    fn columns(value: serde_json::Value) -> ColumnMap {
        match value {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => panic!("expected a JSON object"),
        }
    }

    async fn seed(store: &MemTransport, row: &str, cells: &[(&str, &str)]) {
        let mutation = Mutation {
            row: row.to_string(),
            cells: cells
                .iter()
                .map(|(q, v)| Cell {
                    family: "d".to_string(),
                    qualifier: q.to_string(),
                    value: v.to_string(),
                })
                .collect(),
        };
        store.put("t", vec![mutation]).await.unwrap();
    }

    #[tokio::test]
    async fn test_disabled_reap_is_a_no_op() {
        let store = MemTransport::new();
        seed(&store, "r1", &[("a", "1")]).await;

        let cols = columns(json!({"a": ""}));
        reap_empty_columns(&store, "t", [("r1", &cols)], "d", false)
            .await
            .unwrap();

        assert!(store.get("t", "r1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_reaps_only_empty_valued_columns() {
        let store = MemTransport::new();
        seed(&store, "r1", &[("a", "1"), ("b", "2"), ("c", "3")]).await;

        let cols = columns(json!({"a": "", "b": null, "c": "keep"}));
        reap_empty_columns(&store, "t", [("r1", &cols)], "d", true)
            .await
            .unwrap();

        let row = store.get("t", "r1").await.unwrap().unwrap();
        assert!(row.get("d:a").is_none());
        assert!(row.get("d:b").is_none());
        assert_eq!(row.get("d:c"), Some("3"));
    }

    #[tokio::test]
    async fn test_zero_valued_columns_survive() {
        let store = MemTransport::new();
        seed(&store, "r1", &[("count", "0")]).await;

        let cols = columns(json!({"count": 0}));
        reap_empty_columns(&store, "t", [("r1", &cols)], "d", true)
            .await
            .unwrap();

        let row = store.get("t", "r1").await.unwrap().unwrap();
        assert_eq!(row.get("d:count"), Some("0"));
    }

    #[tokio::test]
    async fn test_batch_reaps_every_row() {
        let store = MemTransport::new();
        seed(&store, "r1", &[("a", "1"), ("keep", "x")]).await;
        seed(&store, "r2", &[("b", "2"), ("keep", "x")]).await;

        let first = columns(json!({"a": false}));
        let second = columns(json!({"b": ""}));
        let batch: BTreeMap<String, ColumnMap> =
            [("r1".to_string(), first), ("r2".to_string(), second)]
                .into_iter()
                .collect();

        reap_empty_columns(
            &store,
            "t",
            batch.iter().map(|(k, v)| (k.as_str(), v)),
            "d",
            true,
        )
        .await
        .unwrap();

        assert!(store.get("t", "r1").await.unwrap().unwrap().get("d:a").is_none());
        assert!(store.get("t", "r2").await.unwrap().unwrap().get("d:b").is_none());
    }
}
