// src/api/mod.rs
pub mod agents;
pub mod client;
pub mod reports;
pub mod signals;
pub mod summaries;

use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::factor::{theme_to_factor, Factor};
use crate::model::{Agent, ContentItem, Report};
use crate::themes::ThemeId;
use client::{ApiClient, ApiRequest};

/// Resources exposed by the newsroom API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Signals,
    Summaries,
    Reports,
    Agents,
}

impl Resource {
    pub fn name(self) -> &'static str {
        match self {
            Resource::Signals => "signals",
            Resource::Summaries => "summaries",
            Resource::Reports => "reports",
            Resource::Agents => "agents",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Resource::Signals => "/signals",
            Resource::Summaries => "/summaries",
            Resource::Reports => "/reports",
            Resource::Agents => "/agents",
        }
    }
}

/// Optional theme scope for an adapter call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedFilter {
    pub theme: Option<ThemeId>,
}

impl FeedFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn theme(theme: ThemeId) -> Self {
        Self { theme: Some(theme) }
    }

    /// Factor to send, if any. The wildcard and an absent theme both mean "no filter".
    pub fn factor(&self) -> Option<Factor> {
        self.theme.and_then(theme_to_factor)
    }
}

/// GET `resource`, attaching `factor=` only when the filter resolves to one,
/// and decode the body as an array of raw records.
pub(crate) async fn fetch_records<R: DeserializeOwned>(
    client: &ApiClient,
    resource: Resource,
    filter: FeedFilter,
) -> Result<Vec<R>, ApiError> {
    let t0 = std::time::Instant::now();
    let mut req = ApiRequest::get(resource.path());
    if let Some(factor) = filter.factor() {
        req = req.with_query("factor", factor.as_str());
    }

    counter!("feeds_fetch_total", "resource" => resource.name()).increment(1);
    let result = client.request::<Vec<R>>(req).await;
    histogram!("feeds_fetch_ms", "resource" => resource.name())
        .record(t0.elapsed().as_secs_f64() * 1_000.0);

    match &result {
        Ok(records) => tracing::debug!(
            target: "feeds",
            resource = resource.name(),
            factor = ?filter.factor(),
            count = records.len(),
            "fetched"
        ),
        Err(e) => {
            counter!("feeds_fetch_errors_total", "resource" => resource.name()).increment(1);
            tracing::warn!(target: "feeds", resource = resource.name(), error = %e, "fetch failed");
        }
    }
    result
}

/// Everything a page needs from the newsroom. Implemented by [`ApiClient`];
/// tests and offline tooling can provide their own.
#[async_trait]
pub trait NewsroomSource: Send + Sync {
    async fn signals(&self, filter: FeedFilter) -> Result<Vec<ContentItem>, ApiError>;
    async fn summaries(&self, filter: FeedFilter) -> Result<Vec<ContentItem>, ApiError>;
    async fn reports(&self, filter: FeedFilter) -> Result<Vec<Report>, ApiError>;
    async fn agents(&self, filter: FeedFilter) -> Result<Vec<Agent>, ApiError>;
    fn name(&self) -> &'static str;
}

#[async_trait]
impl NewsroomSource for ApiClient {
    async fn signals(&self, filter: FeedFilter) -> Result<Vec<ContentItem>, ApiError> {
        signals::fetch_signals(self, filter).await
    }

    async fn summaries(&self, filter: FeedFilter) -> Result<Vec<ContentItem>, ApiError> {
        summaries::fetch_summaries(self, filter).await
    }

    async fn reports(&self, filter: FeedFilter) -> Result<Vec<Report>, ApiError> {
        reports::fetch_reports(self, filter).await
    }

    async fn agents(&self, filter: FeedFilter) -> Result<Vec<Agent>, ApiError> {
        agents::fetch_agents(self, filter).await
    }

    fn name(&self) -> &'static str {
        "newsroom-api"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_filter_has_no_factor() {
        assert_eq!(FeedFilter::all().factor(), None);
        assert_eq!(FeedFilter::theme(ThemeId::All).factor(), None);
        assert_eq!(
            FeedFilter::theme(ThemeId::Tech).factor(),
            Some(Factor::Technological)
        );
    }
}
