// src/metrics.rs
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feeds_fetch_total", "Adapter requests sent to the newsroom API.");
        describe_counter!(
            "feeds_fetch_errors_total",
            "Adapter requests that failed (status, network or body)."
        );
        describe_counter!(
            "feeds_cache_hits_total",
            "Feed lookups served from a fresh cache entry."
        );
        describe_counter!("snapshot_saved_total", "Endpoints written by the snapshot job.");
        describe_counter!(
            "snapshot_failed_total",
            "Endpoints skipped by the snapshot job after a failure."
        );
        describe_histogram!("feeds_fetch_ms", "Adapter request time in milliseconds.");
        describe_gauge!("feeds_cache_stale_secs", "Age after which cached feeds are refetched.");
    });
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder and publish the cache staleness window.
    pub fn init(stale_secs: u64) -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;

        ensure_metrics_described();
        gauge!("feeds_cache_stale_secs").set(stale_secs as f64);

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
