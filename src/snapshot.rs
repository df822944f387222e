// src/snapshot.rs
//! Offline snapshot of the newsroom endpoints into local JSON files.

use anyhow::{Context, Result};
use metrics::counter;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::api::client::{ApiClient, ApiRequest};
use crate::api::Resource;

/// Endpoints captured by a snapshot run, in fetch order.
pub const SNAPSHOT_TARGETS: [(Resource, &str); 4] = [
    (Resource::Signals, "signals.json"),
    (Resource::Reports, "reports.json"),
    (Resource::Summaries, "summaries.json"),
    (Resource::Agents, "agents.json"),
];

#[derive(Debug, Default)]
pub struct SnapshotReport {
    /// (file path, item count)
    pub saved: Vec<(PathBuf, usize)>,
    /// (endpoint, error)
    pub failed: Vec<(&'static str, String)>,
}

impl SnapshotReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Array length, object key count, or zero for anything else.
pub fn item_count(v: &Value) -> usize {
    match v {
        Value::Array(a) => a.len(),
        Value::Object(o) => o.len(),
        _ => 0,
    }
}

/// Fetch one endpoint and write its raw body, pretty-printed, to `out_dir/filename`.
pub async fn fetch_and_save(
    client: &ApiClient,
    resource: Resource,
    out_dir: &Path,
    filename: &str,
) -> Result<(PathBuf, usize)> {
    tracing::info!(target: "snapshot", url = %client.resolve_url(resource.path()), "[FETCH]");

    let data: Value = client
        .request(ApiRequest::get(resource.path()))
        .await
        .with_context(|| format!("failed fetch {}", resource.name()))?;

    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let path = out_dir.join(filename);
    let body = serde_json::to_string_pretty(&data)?;
    tokio::fs::write(&path, body)
        .await
        .with_context(|| format!("writing {}", path.display()))?;

    let count = item_count(&data);
    tracing::info!(target: "snapshot", file = filename, count, "[OK] {filename} saved ({count} items)");
    Ok((path, count))
}

/// Snapshot every target. A failing endpoint is logged and skipped; the others
/// still run.
pub async fn snapshot_api_data(client: &ApiClient, out_dir: &Path) -> SnapshotReport {
    let mut report = SnapshotReport::default();
    for (resource, filename) in SNAPSHOT_TARGETS {
        match fetch_and_save(client, resource, out_dir, filename).await {
            Ok(saved) => {
                counter!("snapshot_saved_total").increment(1);
                report.saved.push(saved);
            }
            Err(e) => {
                counter!("snapshot_failed_total").increment(1);
                tracing::error!(target: "snapshot", endpoint = resource.name(), error = ?e, "[ERROR]");
                report.failed.push((resource.name(), format!("{e:#}")));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_arrays_objects_and_scalars() {
        assert_eq!(item_count(&serde_json::json!([1, 2, 3])), 3);
        assert_eq!(item_count(&serde_json::json!({"a": 1, "b": 2})), 2);
        assert_eq!(item_count(&serde_json::json!(null)), 0);
        assert_eq!(item_count(&serde_json::json!("x")), 0);
    }

    #[test]
    fn targets_cover_every_resource_once() {
        let names: Vec<_> = SNAPSHOT_TARGETS.iter().map(|(r, _)| r.name()).collect();
        assert_eq!(names, vec!["signals", "reports", "summaries", "agents"]);
    }
}
