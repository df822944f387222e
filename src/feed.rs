// src/feed.rs
//! Per-page filter state and the view model handed to the rendering layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::api::{FeedFilter, Resource};
use crate::model::{ContentItem, Themed};
use crate::themes::{ThemeColor, ThemeId, THEMES};

/// How a page combines the API's factor filter with its own theme filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterStrategy {
    /// Refetch scoped by `factor` whenever the active theme changes.
    #[default]
    Server,
    /// Fetch once unfiltered and narrow the list locally.
    Client,
}

/// Feed pages that list content cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Signals,
    Summaries,
    Reports,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Signals, Page::Summaries, Page::Reports];

    pub fn resource(self) -> Resource {
        match self {
            Page::Signals => Resource::Signals,
            Page::Summaries => Resource::Summaries,
            Page::Reports => Resource::Reports,
        }
    }

    /// Lowercase plural used in notices, e.g. "reports".
    pub fn label(self) -> &'static str {
        self.resource().name()
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Signals => "Signals",
            Page::Summaries => "Summaries",
            Page::Reports => "Reports",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Page::Signals => "Unprocessed news items automatically gathered from RSS feeds, newsletters, and other monitored sources. Signals represent the earliest layer of information before any verification or synthesis is applied.",
            Page::Summaries => "Synthesized briefings condensed from multiple signals by correspondent agents, with context, source coverage and a confidence estimate.",
            Page::Reports => "Full articles assembled by the editor agent from verified summaries, ready to read with their complete source trail.",
        }
    }

    pub fn error_notice(self) -> String {
        format!("Something went wrong while loading {}.", self.label())
    }

    pub fn empty_message(self) -> String {
        format!("No {} to show right now.", self.label())
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or_else(|| format!("unknown page '{s}'"))
    }
}

/// Items whose theme equals `theme`, in the order given. The wildcard keeps everything.
pub fn filter_by_theme<T: Themed + Clone>(items: &[T], theme: ThemeId) -> Vec<T> {
    if theme.is_wildcard() {
        return items.to_vec();
    }
    items.iter().filter(|it| it.theme() == theme).cloned().collect()
}

/// One page's filter state. Starts on the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedState {
    pub page: Page,
    pub active_theme: ThemeId,
    pub strategy: FilterStrategy,
}

impl FeedState {
    pub fn new(page: Page, strategy: FilterStrategy) -> Self {
        Self {
            page,
            active_theme: ThemeId::All,
            strategy,
        }
    }

    /// Returns true when the change requires a new adapter call.
    pub fn set_theme(&mut self, theme: ThemeId) -> bool {
        let changed = self.active_theme != theme;
        self.active_theme = theme;
        changed && self.strategy == FilterStrategy::Server
    }

    /// Filter to send with the adapter call for the current state.
    pub fn query(&self) -> FeedFilter {
        match self.strategy {
            FilterStrategy::Server => FeedFilter::theme(self.active_theme),
            FilterStrategy::Client => FeedFilter::all(),
        }
    }

    /// Visible subset of a fetched list.
    pub fn visible<T: Themed + Clone>(&self, fetched: &[T]) -> Vec<T> {
        match self.strategy {
            FilterStrategy::Server => fetched.to_vec(),
            FilterStrategy::Client => filter_by_theme(fetched, self.active_theme),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeChip {
    pub id: ThemeId,
    pub name: &'static str,
    pub color: ThemeColor,
    pub active: bool,
}

pub fn theme_chips(active: ThemeId) -> Vec<ThemeChip> {
    THEMES
        .iter()
        .map(|t| ThemeChip {
            id: t.id,
            name: t.name,
            color: t.color,
            active: t.id == active,
        })
        .collect()
}

/// What a feed page renders: header copy, filter chips, cards and notices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedView {
    pub page: Page,
    pub title: &'static str,
    pub description: &'static str,
    pub active_theme: ThemeId,
    pub filters: Vec<ThemeChip>,
    pub items: Vec<ContentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    pub stale: bool,
}

impl FeedView {
    /// `error` is the fetch failure, if any; it turns into the page's inline notice.
    pub fn build(state: &FeedState, items: Vec<ContentItem>, error: Option<&str>, stale: bool) -> Self {
        let notice = error.map(|_| state.page.error_notice());
        let empty_message = (notice.is_none() && items.is_empty()).then(|| state.page.empty_message());
        Self {
            page: state.page,
            title: state.page.title(),
            description: state.page.description(),
            active_theme: state.active_theme,
            filters: theme_chips(state.active_theme),
            items,
            notice,
            empty_message,
            stale,
        }
    }
}
