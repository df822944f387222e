// src/factor.rs
//! Translation between internal themes and the newsroom API's "factor" vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::themes::ThemeId;

/// Theme assigned to content whose factor is missing or unrecognized.
pub const FALLBACK_THEME: ThemeId = ThemeId::Politics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Political,
    Economic,
    Social,
    Technological,
    Environmental,
    Legal,
}

impl Factor {
    pub const ALL: [Factor; 6] = [
        Factor::Political,
        Factor::Economic,
        Factor::Social,
        Factor::Technological,
        Factor::Environmental,
        Factor::Legal,
    ];

    /// Canonical lowercase string sent as the `factor` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Factor::Political => "political",
            Factor::Economic => "economic",
            Factor::Social => "social",
            Factor::Technological => "technological",
            Factor::Environmental => "environmental",
            Factor::Legal => "legal",
        }
    }

    /// Exact match against the canonical strings.
    pub fn from_canonical(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    pub fn theme(self) -> ThemeId {
        match self {
            Factor::Political => ThemeId::Politics,
            Factor::Economic => ThemeId::Economy,
            Factor::Social => ThemeId::Social,
            Factor::Technological => ThemeId::Tech,
            Factor::Environmental => ThemeId::Ecology,
            Factor::Legal => ThemeId::Law,
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `None` for the wildcard: callers omit the query parameter entirely.
pub fn theme_to_factor(theme: ThemeId) -> Option<Factor> {
    match theme {
        ThemeId::All => None,
        ThemeId::Politics => Some(Factor::Political),
        ThemeId::Economy => Some(Factor::Economic),
        ThemeId::Social => Some(Factor::Social),
        ThemeId::Tech => Some(Factor::Technological),
        ThemeId::Ecology => Some(Factor::Environmental),
        ThemeId::Law => Some(Factor::Legal),
    }
}

/// Case-insensitive. Missing, empty or unknown factors map to [`FALLBACK_THEME`].
pub fn factor_to_theme(factor: Option<&str>) -> ThemeId {
    match factor {
        Some(f) if !f.is_empty() => Factor::from_canonical(&f.to_lowercase())
            .map(Factor::theme)
            .unwrap_or(FALLBACK_THEME),
        _ => FALLBACK_THEME,
    }
}

/// Strict variant for agent angles: only a canonical factor string yields a theme.
/// Anything else means the agent covers all themes.
pub fn angle_to_theme(angle: Option<&str>) -> Option<ThemeId> {
    let angle = angle?;
    Factor::from_canonical(angle).map(|_| factor_to_theme(Some(angle)))
}
