// src/newsroom.rs
//! Page-level orchestration: pick the query for a page's state, go through the
//! query cache, and shape the result into a view.

use std::sync::Arc;
use std::time::Duration;

use crate::api::{FeedFilter, NewsroomSource, Resource};
use crate::cache::{Fetched, QueryCache, QueryKey};
use crate::config::FeedsConfig;
use crate::error::ApiError;
use crate::feed::{FeedState, FeedView, FilterStrategy, Page};
use crate::model::{Agent, ContentItem, Report};
use crate::pipeline::{build_pipeline, FeedSnapshot, PipelineStage};
use crate::themes::ThemeId;

pub struct Newsroom {
    source: Arc<dyn NewsroomSource>,
    strategy: FilterStrategy,
    card_summary_chars: usize,
    items: QueryCache<ContentItem>,
    reports: QueryCache<Report>,
    agents: QueryCache<Agent>,
}

/// Result of looking up a single report.
#[derive(Debug)]
pub enum ReportLookup {
    Found(Box<Report>),
    NotFound,
    Failed(String),
}

impl Newsroom {
    pub fn new(source: Arc<dyn NewsroomSource>, stale_after: Duration, strategy: FilterStrategy) -> Self {
        tracing::debug!(target: "feeds", source = source.name(), ?strategy, ?stale_after, "newsroom ready");
        Self {
            source,
            strategy,
            card_summary_chars: usize::MAX,
            items: QueryCache::new(stale_after),
            reports: QueryCache::new(stale_after),
            agents: QueryCache::new(stale_after),
        }
    }

    pub fn from_config(source: Arc<dyn NewsroomSource>, cfg: &FeedsConfig) -> Self {
        Self::new(source, Duration::from_secs(cfg.stale_secs), cfg.strategy)
            .with_card_summary_chars(cfg.card_summary_chars)
    }

    pub fn with_card_summary_chars(mut self, max: usize) -> Self {
        self.card_summary_chars = max;
        self
    }

    pub fn strategy(&self) -> FilterStrategy {
        self.strategy
    }

    async fn content(&self, resource: Resource, filter: FeedFilter) -> Fetched<ContentItem> {
        let key = QueryKey::new(resource, filter.factor());
        let source = &self.source;
        self.items
            .get_or_fetch(key, || async move {
                match resource {
                    Resource::Signals => source.signals(filter).await,
                    Resource::Summaries => source.summaries(filter).await,
                    Resource::Reports | Resource::Agents => {
                        Err(ApiError::NotContentFeed(resource.name()))
                    }
                }
            })
            .await
    }

    async fn report_list(&self, filter: FeedFilter) -> Fetched<Report> {
        let key = QueryKey::new(Resource::Reports, filter.factor());
        let source = &self.source;
        self.reports
            .get_or_fetch(key, || async move { source.reports(filter).await })
            .await
    }

    async fn agent_list(&self) -> Fetched<Agent> {
        let key = QueryKey::new(Resource::Agents, None);
        let source = &self.source;
        self.agents
            .get_or_fetch(key, || async move { source.agents(FeedFilter::all()).await })
            .await
    }

    /// Feed page for `theme`, using the configured strategy.
    pub async fn page(&self, page: Page, theme: ThemeId) -> FeedView {
        let mut state = FeedState::new(page, self.strategy);
        state.set_theme(theme);
        let filter = state.query();

        let (visible, error, stale) = match page {
            Page::Reports => {
                let fetched = self.report_list(filter).await;
                let cards: Vec<ContentItem> = state
                    .visible(fetched.data.as_slice())
                    .into_iter()
                    .map(|r| r.item)
                    .collect();
                (cards, fetched.error, fetched.stale)
            }
            Page::Signals | Page::Summaries => {
                let fetched = self.content(page.resource(), filter).await;
                (state.visible(fetched.data.as_slice()), fetched.error, fetched.stale)
            }
        };

        let cards = visible
            .iter()
            .map(|item| item.card(self.card_summary_chars))
            .collect();
        FeedView::build(&state, cards, error.as_deref(), stale)
    }

    /// Look a report up by id in the unfiltered report list.
    pub async fn report(&self, id: &str) -> ReportLookup {
        let fetched = self.report_list(FeedFilter::all()).await;
        match fetched.data.iter().find(|r| r.item.id.matches(id)) {
            Some(r) => ReportLookup::Found(Box::new(r.clone())),
            None => match fetched.error {
                Some(e) => ReportLookup::Failed(e),
                None => ReportLookup::NotFound,
            },
        }
    }

    /// Landing page: the four feeds load concurrently and independently.
    pub async fn pipeline(&self) -> Vec<PipelineStage> {
        let (agents, signals, summaries, reports) = tokio::join!(
            self.agent_list(),
            self.content(Resource::Signals, FeedFilter::all()),
            self.content(Resource::Summaries, FeedFilter::all()),
            self.report_list(FeedFilter::all()),
        );

        let loaded = |f: &Fetched<ContentItem>| f.error.is_none() || f.stale;
        let snapshot = FeedSnapshot {
            signals: loaded(&signals).then_some(signals.data.as_slice()),
            summaries: loaded(&summaries).then_some(summaries.data.as_slice()),
            reports: (reports.error.is_none() || reports.stale).then_some(reports.data.len()),
        };
        build_pipeline(&agents.data, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        signals: AtomicUsize,
        summaries: AtomicUsize,
    }

    fn one(id: i64) -> Vec<ContentItem> {
        vec![ContentItem::new(
            ItemId::Number(id),
            ThemeId::Tech,
            "t".into(),
            String::new(),
            String::new(),
        )]
    }

    #[async_trait]
    impl NewsroomSource for CountingSource {
        async fn signals(&self, _: FeedFilter) -> Result<Vec<ContentItem>, ApiError> {
            self.signals.fetch_add(1, Ordering::SeqCst);
            Ok(one(1))
        }
        async fn summaries(&self, _: FeedFilter) -> Result<Vec<ContentItem>, ApiError> {
            self.summaries.fetch_add(1, Ordering::SeqCst);
            Ok(one(2))
        }
        async fn reports(&self, _: FeedFilter) -> Result<Vec<Report>, ApiError> {
            Ok(Vec::new())
        }
        async fn agents(&self, _: FeedFilter) -> Result<Vec<Agent>, ApiError> {
            Ok(Vec::new())
        }
        fn name(&self) -> &'static str {
            "counting"
        }
    }

    #[tokio::test]
    async fn content_only_serves_card_feeds() {
        let src = Arc::new(CountingSource::default());
        let room = Newsroom::new(src.clone(), Duration::from_secs(60), FilterStrategy::Server);

        let got = room.content(Resource::Signals, FeedFilter::all()).await;
        assert_eq!(got.data[0].id, ItemId::Number(1));
        let got = room.content(Resource::Summaries, FeedFilter::all()).await;
        assert_eq!(got.data[0].id, ItemId::Number(2));

        for resource in [Resource::Reports, Resource::Agents] {
            let got = room.content(resource, FeedFilter::all()).await;
            assert!(got.data.is_empty(), "{resource:?}");
            assert_eq!(
                got.error.as_deref(),
                Some(format!("{} is not a content feed", resource.name()).as_str())
            );
        }
        assert_eq!(src.signals.load(Ordering::SeqCst), 1);
        assert_eq!(src.summaries.load(Ordering::SeqCst), 1);
    }
}
