// src/api/signals.rs
use serde::Deserialize;

use super::client::ApiClient;
use super::{fetch_records, FeedFilter, Resource};
use crate::error::ApiError;
use crate::factor::factor_to_theme;
use crate::model::{ContentItem, ItemId};
use crate::text::{display_time, hostname};

/// Raw `/signals` element.
#[derive(Debug, Clone, Deserialize)]
pub struct SignalRecord {
    pub id: ItemId,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub factor: Option<String>,
    pub date: Option<String>,
    pub created_at: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
}

pub fn adapt_signal(r: SignalRecord) -> ContentItem {
    let time = display_time(r.date.as_deref(), r.created_at.as_deref());
    let mut item = ContentItem::new(
        r.id,
        factor_to_theme(r.factor.as_deref()),
        r.title.unwrap_or_default(),
        r.summary.unwrap_or_default(),
        time,
    );
    item.source = r
        .source
        .filter(|s| !s.trim().is_empty())
        .or_else(|| r.url.as_deref().and_then(hostname));
    item.source_url = r.url;
    item.poster_url = r.image_url;
    item
}

pub async fn fetch_signals(
    client: &ApiClient,
    filter: FeedFilter,
) -> Result<Vec<ContentItem>, ApiError> {
    let records: Vec<SignalRecord> = fetch_records(client, Resource::Signals, filter).await?;
    Ok(records.into_iter().map(adapt_signal).collect())
}
