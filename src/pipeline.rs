// src/pipeline.rs
//! Landing-page pipeline: the ordered stages content passes through, with the
//! agents operating each stage attached by role.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::model::{Agent, AgentRole, ContentItem};
use crate::themes::ThemeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageId {
    Sources,
    Tipster,
    Signals,
    Correspondent,
    Summaries,
    Editor,
    Reports,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageMetric {
    pub value: usize,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentProfile {
    pub name: String,
    pub title: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Empty when the agent covers every theme.
    pub theme_focus: Vec<ThemeId>,
}

impl From<&Agent> for AgentProfile {
    fn from(a: &Agent) -> Self {
        Self {
            name: a.name.clone(),
            title: a.title.clone(),
            bio: a.bio.clone(),
            avatar_url: a.avatar_url.clone(),
            model_note: a.model_note(),
            prompt: a.prompt.clone(),
            theme_focus: a.theme_focus.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineStage {
    pub id: StageId,
    pub title: &'static str,
    pub summary: &'static str,
    pub show_themes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<StageMetric>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<AgentProfile>,
}

/// Feed data the landing page loaded; `None` where a fetch failed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedSnapshot<'a> {
    pub signals: Option<&'a [ContentItem]>,
    pub summaries: Option<&'a [ContentItem]>,
    pub reports: Option<usize>,
}

fn distinct_sources(signals: &[ContentItem]) -> usize {
    signals
        .iter()
        .filter_map(|s| s.source.as_deref())
        .collect::<BTreeSet<_>>()
        .len()
}

fn agents_for(agents: &[Agent], role: AgentRole) -> Vec<AgentProfile> {
    agents
        .iter()
        .filter(|a| a.role == role)
        .map(AgentProfile::from)
        .collect()
}

fn metric(value: Option<usize>, label: &'static str) -> Option<StageMetric> {
    value.map(|value| StageMetric { value, label })
}

pub fn build_pipeline(agents: &[Agent], feeds: FeedSnapshot<'_>) -> Vec<PipelineStage> {
    vec![
        PipelineStage {
            id: StageId::Sources,
            title: "Sources",
            summary: "RSS feeds and email newsletters ingested continuously.",
            show_themes: false,
            metric: metric(feeds.signals.map(distinct_sources), "active"),
            agents: vec![],
        },
        PipelineStage {
            id: StageId::Tipster,
            title: "Tipster agent",
            summary: "Filters, deduplicates, and tags new items by theme before they turn into signals.",
            show_themes: true,
            metric: None,
            agents: agents_for(agents, AgentRole::Tipster),
        },
        PipelineStage {
            id: StageId::Signals,
            title: "Signals",
            summary: "Raw news cards ready for tagging, triaged in chronological order.",
            show_themes: false,
            metric: metric(feeds.signals.map(<[ContentItem]>::len), "queued"),
            agents: vec![],
        },
        PipelineStage {
            id: StageId::Correspondent,
            title: "Correspondent agent",
            summary: "Adds context, verifies sources, and drafts lean abstracts with theme coverage.",
            show_themes: true,
            metric: None,
            agents: agents_for(agents, AgentRole::Correspondent),
        },
        PipelineStage {
            id: StageId::Summaries,
            title: "Summaries",
            summary: "Crisp abstracts ready for editorial review.",
            show_themes: false,
            metric: metric(feeds.summaries.map(<[ContentItem]>::len), "ready"),
            agents: vec![],
        },
        PipelineStage {
            id: StageId::Editor,
            title: "Editor agent",
            summary: "Synthesizes summaries, checks claims, and enforces the newsroom tone.",
            show_themes: false,
            metric: None,
            agents: agents_for(agents, AgentRole::Editor),
        },
        PipelineStage {
            id: StageId::Reports,
            title: "Reports",
            summary: "Publish-ready articles delivered to News and Research pages.",
            show_themes: false,
            metric: metric(feeds.reports, "live now"),
            agents: vec![],
        },
    ]
}
