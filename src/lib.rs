// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod factor;
pub mod feed;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod newsroom;
pub mod pipeline;
pub mod server;
pub mod snapshot;
pub mod text;
pub mod themes;

// ---- Re-exports for stable public API ----
pub use crate::api::client::ApiClient;
pub use crate::api::{FeedFilter, NewsroomSource, Resource};
pub use crate::error::ApiError;
pub use crate::factor::{angle_to_theme, factor_to_theme, theme_to_factor, Factor};
pub use crate::model::{Agent, ContentItem, ItemId, Report, ReportSource};
pub use crate::server::router;
pub use crate::themes::{ThemeColor, ThemeId, THEMES};

use std::sync::Arc;

use config::FeedsConfig;
use newsroom::Newsroom;
use server::AppState;

/// Build the feed service router against the live newsroom API described by `cfg`.
pub fn app(cfg: &FeedsConfig) -> anyhow::Result<axum::Router> {
    let client = ApiClient::from_config(cfg)?;
    tracing::info!(
        base_url = client.base_url(),
        strategy = ?cfg.strategy,
        stale_secs = cfg.stale_secs,
        "newsroom client ready"
    );
    let newsroom = Newsroom::from_config(Arc::new(client), cfg);
    Ok(router(AppState::new(newsroom)))
}
