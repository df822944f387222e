//! Feed service: binary entrypoint.
//! Boots the Axum HTTP server that serves normalized newsroom feeds to the UI.

use anyhow::Context;
use newsroom_feeds::{config::FeedsConfig, logging, metrics::Metrics};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    logging::init_tracing("newsroom_feeds=info,feeds=info,warn");

    let cfg = FeedsConfig::load_default().context("loading feeds config")?;
    let metrics = Metrics::init(cfg.stale_secs)?;

    let app = newsroom_feeds::app(&cfg)?.merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr)
        .await
        .with_context(|| format!("binding {}", cfg.bind_addr))?;
    tracing::info!(addr = %cfg.bind_addr, "feed service listening");

    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
