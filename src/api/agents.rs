// src/api/agents.rs
use serde::Deserialize;

use super::client::ApiClient;
use super::{fetch_records, FeedFilter, Resource};
use crate::error::ApiError;
use crate::factor::angle_to_theme;
use crate::model::{Agent, AgentRole, ItemId};

/// Raw `/agents` element. Server-only fields such as `created_at` are not kept.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentRecord {
    pub id: ItemId,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub role: Option<String>,
    pub bio: Option<String>,
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub provider: Option<String>,
    pub avatar_url: Option<String>,
    pub angle: Option<String>,
}

pub fn agent_title(role: &AgentRole, angle: Option<&str>) -> String {
    match angle_to_theme(angle) {
        Some(theme) => format!("{} {}", theme.name(), role.capitalized()),
        None => role.capitalized(),
    }
}

pub fn adapt_agent(r: AgentRecord) -> Agent {
    let role = AgentRole::from(r.role.unwrap_or_default());
    let title = agent_title(&role, r.angle.as_deref());
    let theme_focus = angle_to_theme(r.angle.as_deref());
    Agent {
        id: r.id,
        name: r.name.unwrap_or_default(),
        role,
        title,
        bio: r.bio.unwrap_or_default(),
        prompt: r.prompt,
        model: r.model,
        provider: r.provider,
        avatar_url: r.avatar_url,
        angle: r.angle,
        theme_focus,
    }
}

pub async fn fetch_agents(client: &ApiClient, filter: FeedFilter) -> Result<Vec<Agent>, ApiError> {
    let records: Vec<AgentRecord> = fetch_records(client, Resource::Agents, filter).await?;
    Ok(records.into_iter().map(adapt_agent).collect())
}
