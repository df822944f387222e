// src/model.rs
//! Normalized display records produced by the content adapters.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::themes::ThemeId;

/// Identifier as delivered by the API: numeric for most resources, string for some.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Number(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Text(s.to_string())
    }
}

impl ItemId {
    /// Matches a path segment against either representation.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            ItemId::Number(n) => raw.parse::<i64>().is_ok_and(|r| r == *n),
            ItemId::Text(s) => s == raw,
        }
    }
}

/// The unit every feed page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: ItemId,
    pub theme: ThemeId,
    pub title: String,
    pub summary: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signals: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_list: Option<Vec<ReportSource>>,
}

impl ContentItem {
    /// Bare item with the required fields; optional fields start unset.
    pub fn new(id: ItemId, theme: ThemeId, title: String, summary: String, time: String) -> Self {
        Self {
            id,
            theme,
            title,
            summary,
            time,
            poster_url: None,
            source: None,
            source_url: None,
            scope: None,
            signals: None,
            sources: None,
            confidence: None,
            reading_time_minutes: None,
            source_list: None,
        }
    }

    /// Copy with `summary` shortened for card views; the full text stays on `self`.
    pub fn card(&self, max_summary_chars: usize) -> ContentItem {
        ContentItem {
            summary: crate::text::truncate(&self.summary, max_summary_chars),
            ..self.clone()
        }
    }
}

/// One entry of a report's attached source list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSource {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Published article: the card fields plus everything the detail view needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(flatten)]
    pub item: ContentItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lede: Option<String>,
    pub body: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub factors: Vec<String>,
    #[serde(default)]
    pub perspective: Option<String>,
}

/// Pipeline stage an agent operates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentRole {
    Tipster,
    Correspondent,
    Editor,
    Other(String),
}

impl AgentRole {
    pub fn as_str(&self) -> &str {
        match self {
            AgentRole::Tipster => "tipster",
            AgentRole::Correspondent => "correspondent",
            AgentRole::Editor => "editor",
            AgentRole::Other(s) => s,
        }
    }

    pub fn capitalized(&self) -> String {
        let mut chars = self.as_str().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for AgentRole {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "tipster" => AgentRole::Tipster,
            "correspondent" => AgentRole::Correspondent,
            "editor" => AgentRole::Editor,
            _ => AgentRole::Other(s),
        }
    }
}

impl From<AgentRole> for String {
    fn from(role: AgentRole) -> Self {
        role.as_str().to_string()
    }
}

/// Persona operating one pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: ItemId,
    pub name: String,
    pub role: AgentRole,
    /// Role capitalized, prefixed by the theme name when the angle is recognized.
    pub title: String,
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<String>,
    /// Unset for agents without a recognized angle (they cover every theme).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_focus: Option<ThemeId>,
}

impl Agent {
    /// `Model: <model>`, with the provider in parentheses when known.
    pub fn model_note(&self) -> Option<String> {
        let model = self.model.as_deref()?;
        Some(match self.provider.as_deref() {
            Some(p) => format!("Model: {model} ({p})"),
            None => format!("Model: {model}"),
        })
    }
}

/// Anything that carries a theme and can be filtered client-side.
pub trait Themed {
    fn theme(&self) -> ThemeId;
}

impl Themed for ContentItem {
    fn theme(&self) -> ThemeId {
        self.theme
    }
}

impl Themed for Report {
    fn theme(&self) -> ThemeId {
        self.item.theme
    }
}
