// src/api/reports.rs
use serde::Deserialize;

use super::client::ApiClient;
use super::{fetch_records, FeedFilter, Resource};
use crate::error::ApiError;
use crate::factor::factor_to_theme;
use crate::model::{ContentItem, ItemId, Report, ReportSource};
use crate::text::{display_time, estimate_reading_time, hostname, DEFAULT_WPM};

/// Raw `/reports` element.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRecord {
    pub id: ItemId,
    pub title: Option<String>,
    pub lede: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub factors: Option<Vec<String>>,
    pub perspective: Option<String>,
    pub author: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub date: Option<String>,
    pub created_at: Option<String>,
    pub image_url: Option<String>,
    pub sources: Option<Vec<ReportSource>>,
}

/// Lede (or summary) and body joined by one space.
fn reading_text(lede: Option<&str>, body: &str) -> String {
    [lede.unwrap_or_default(), body]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn source_label(src: &ReportSource) -> Option<String> {
    src.source
        .clone()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| hostname(&src.url))
}

pub fn adapt_report(r: ReportRecord) -> Report {
    let factors = r.factors.unwrap_or_default();
    let body = r.body.unwrap_or_default();
    let lede = r.lede.filter(|l| !l.is_empty());
    let created_at = r.created_at.clone().unwrap_or_default();
    let time = display_time(r.date.as_deref(), r.created_at.as_deref());

    let lede_or_summary = lede.clone().or_else(|| r.summary.clone());
    let minutes = estimate_reading_time(
        &reading_text(lede_or_summary.as_deref(), &body),
        DEFAULT_WPM,
    );

    let mut item = ContentItem::new(
        r.id,
        factor_to_theme(factors.first().map(String::as_str)),
        r.title.unwrap_or_default(),
        lede_or_summary.unwrap_or_default(),
        time,
    );
    item.poster_url = r.image_url;
    item.reading_time_minutes = Some(minutes);

    let sources = r.sources.unwrap_or_default();
    if let Some(primary) = sources.first() {
        item.source = source_label(primary);
        item.source_url = Some(primary.url.clone());
    }
    item.sources = Some(sources.len() as u32);
    item.source_list = Some(sources);

    Report {
        item,
        lede,
        body,
        created_at,
        author: r.author,
        kind: r.kind,
        factors,
        perspective: r.perspective,
    }
}

pub async fn fetch_reports(client: &ApiClient, filter: FeedFilter) -> Result<Vec<Report>, ApiError> {
    let records: Vec<ReportRecord> = fetch_records(client, Resource::Reports, filter).await?;
    Ok(records.into_iter().map(adapt_report).collect())
}
