//! Snapshot the newsroom API into local JSON files for offline use.
//!
//! `API_BASE_URL` overrides the origin, `SNAPSHOT_DIR` the output directory.
//! Endpoints that fail are logged and skipped; only an unexpected failure exits non-zero.

use newsroom_feeds::{config::FeedsConfig, logging, snapshot, ApiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    logging::init_tracing("snapshot=info,warn");

    let cfg = FeedsConfig::load_default()?;
    let client = ApiClient::from_config(&cfg)?;

    let report = snapshot::snapshot_api_data(&client, &cfg.snapshot_dir).await;
    tracing::info!(
        target: "snapshot",
        saved = report.saved.len(),
        failed = report.failed.len(),
        dir = %cfg.snapshot_dir.display(),
        "snapshot done"
    );
    Ok(())
}
