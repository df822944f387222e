// src/api/summaries.rs
use serde::Deserialize;

use super::client::ApiClient;
use super::{fetch_records, FeedFilter, Resource};
use crate::error::ApiError;
use crate::factor::factor_to_theme;
use crate::model::{ContentItem, ItemId};
use crate::text::{display_time, hostname};

/// Raw `/summaries` element.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryRecord {
    pub id: ItemId,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub factor: Option<String>,
    pub date: Option<String>,
    pub created_at: Option<String>,
    #[serde(rename = "sourceUrl")]
    pub source_url: Option<String>,
    pub scope: Option<String>,
    #[serde(rename = "signal_count")]
    pub signals: Option<u32>,
    #[serde(rename = "source_count")]
    pub sources: Option<u32>,
    pub confidence: Option<f64>,
    pub image_url: Option<String>,
}

/// Confidence is displayed as a whole percentage.
fn confidence_percent(raw: f64) -> Option<u8> {
    if raw.is_finite() {
        Some(raw.round().clamp(0.0, 100.0) as u8)
    } else {
        None
    }
}

pub fn adapt_summary(r: SummaryRecord) -> ContentItem {
    let time = display_time(r.date.as_deref(), r.created_at.as_deref());
    let mut item = ContentItem::new(
        r.id,
        factor_to_theme(r.factor.as_deref()),
        r.title.unwrap_or_default(),
        r.summary.unwrap_or_default(),
        time,
    );
    // Source label: URL host first, then the scope label.
    item.source = r
        .source_url
        .as_deref()
        .and_then(hostname)
        .or_else(|| r.scope.clone());
    item.source_url = r.source_url;
    item.scope = r.scope;
    item.signals = r.signals;
    item.sources = r.sources;
    item.confidence = r.confidence.and_then(confidence_percent);
    item.poster_url = r.image_url;
    item
}

pub async fn fetch_summaries(
    client: &ApiClient,
    filter: FeedFilter,
) -> Result<Vec<ContentItem>, ApiError> {
    let records: Vec<SummaryRecord> = fetch_records(client, Resource::Summaries, filter).await?;
    Ok(records.into_iter().map(adapt_summary).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::ThemeId;
    use serde_json::json;

    fn record(v: serde_json::Value) -> SummaryRecord {
        serde_json::from_value(v).expect("summary record")
    }

    #[test]
    fn source_from_url_host_without_www() {
        let item = adapt_summary(record(json!({
            "id": 1,
            "title": "t",
            "sourceUrl": "https://www.example.com/x"
        })));
        assert_eq!(item.source.as_deref(), Some("example.com"));
        assert_eq!(item.scope, None);
    }

    #[test]
    fn invalid_url_falls_back_to_scope() {
        let item = adapt_summary(record(json!({
            "id": 2,
            "title": "t",
            "sourceUrl": "::not a url::",
            "scope": "wire"
        })));
        assert_eq!(item.source.as_deref(), Some("wire"));
    }

    #[test]
    fn no_url_and_no_scope_leaves_source_unset() {
        let item = adapt_summary(record(json!({ "id": 3 })));
        assert_eq!(item.source, None);
        assert_eq!(item.theme, ThemeId::Politics);
    }

    #[test]
    fn counts_and_confidence_are_carried() {
        let item = adapt_summary(record(json!({
            "id": 4,
            "factor": "Economic",
            "signal_count": 5,
            "confidence": 87.6,
            "date": "2025-02-01T10:15:00Z"
        })));
        assert_eq!(item.theme, ThemeId::Economy);
        assert_eq!(item.signals, Some(5));
        assert_eq!(item.confidence, Some(88));
        assert_eq!(item.time, "1 feb. 2025 10:15");
    }

    #[test]
    fn camel_and_snake_url_together_decode() {
        let item = adapt_summary(record(json!({
            "id": 5,
            "sourceUrl": "https://www.example.com/x",
            "source_url": "https://elsewhere.example/y",
            "signal_count": 2,
            "signalCount": 9
        })));
        assert_eq!(item.source.as_deref(), Some("example.com"));
        assert_eq!(item.signals, Some(2));
    }
}
