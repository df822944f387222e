// src/themes.rs
//! Theme taxonomy shared by filter chips, card badges and the factor mapper.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of theme identifiers. `All` is the wildcard and never appears on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    All,
    Politics,
    Economy,
    Social,
    Tech,
    Ecology,
    Law,
}

impl ThemeId {
    /// The six non-wildcard themes, in display order.
    pub const TOPICAL: [ThemeId; 6] = [
        ThemeId::Politics,
        ThemeId::Economy,
        ThemeId::Social,
        ThemeId::Tech,
        ThemeId::Ecology,
        ThemeId::Law,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeId::All => "all",
            ThemeId::Politics => "politics",
            ThemeId::Economy => "economy",
            ThemeId::Social => "social",
            ThemeId::Tech => "tech",
            ThemeId::Ecology => "ecology",
            ThemeId::Law => "law",
        }
    }

    pub fn is_wildcard(self) -> bool {
        self == ThemeId::All
    }

    pub fn option(self) -> &'static ThemeOption {
        // THEMES holds one row per variant, in declaration order.
        &THEMES[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.option().name
    }

    pub fn color(self) -> ThemeColor {
        self.option().color
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme '{}'", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for ThemeId {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        THEMES
            .iter()
            .find(|t| t.id.as_str() == s)
            .map(|t| t.id)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// Color tokens. `Gray` is reserved for items whose theme cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    Magenta,
    Red,
    Cyan,
    Blue,
    Violet,
    Green,
    Amber,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorVariant {
    Bg,
    Text,
    Light,
    Border,
}

impl ThemeColor {
    /// Utility classes used by the rendering layer for badges, dots and borders.
    pub fn class(self, variant: ColorVariant) -> &'static str {
        use ColorVariant::*;
        match (self, variant) {
            (ThemeColor::Red, Bg) => "bg-red-500",
            (ThemeColor::Red, Text) => "text-red-500",
            (ThemeColor::Red, Light) => "bg-red-50",
            (ThemeColor::Red, Border) => "border-red-200",
            (ThemeColor::Cyan, Bg) => "bg-cyan-600",
            (ThemeColor::Cyan, Text) => "text-cyan-600",
            (ThemeColor::Cyan, Light) => "bg-cyan-50",
            (ThemeColor::Cyan, Border) => "border-cyan-200",
            (ThemeColor::Blue, Bg) => "bg-blue-500",
            (ThemeColor::Blue, Text) => "text-blue-500",
            (ThemeColor::Blue, Light) => "bg-blue-50",
            (ThemeColor::Blue, Border) => "border-blue-200",
            (ThemeColor::Violet, Bg) => "bg-violet-500",
            (ThemeColor::Violet, Text) => "text-violet-500",
            (ThemeColor::Violet, Light) => "bg-violet-50",
            (ThemeColor::Violet, Border) => "border-violet-200",
            (ThemeColor::Green, Bg) => "bg-green-500",
            (ThemeColor::Green, Text) => "text-green-500",
            (ThemeColor::Green, Light) => "bg-green-50",
            (ThemeColor::Green, Border) => "border-green-200",
            (ThemeColor::Amber, Bg) => "bg-amber-500",
            (ThemeColor::Amber, Text) => "text-amber-500",
            (ThemeColor::Amber, Light) => "bg-amber-50",
            (ThemeColor::Amber, Border) => "border-amber-200",
            (ThemeColor::Gray, Bg) => "bg-gray-500",
            (ThemeColor::Gray, Text) => "text-gray-500",
            (ThemeColor::Gray, Light) => "bg-gray-50",
            (ThemeColor::Gray, Border) => "border-gray-200",
            (ThemeColor::Magenta, Bg) => "bg-fuchsia-500",
            (ThemeColor::Magenta, Text) => "text-fuchsia-500",
            (ThemeColor::Magenta, Light) => "bg-fuchsia-50",
            (ThemeColor::Magenta, Border) => "border-fuchsia-200",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeOption {
    pub id: ThemeId,
    pub name: &'static str,
    pub color: ThemeColor,
}

/// Ordered theme list, wildcard first.
pub const THEMES: [ThemeOption; 7] = [
    ThemeOption {
        id: ThemeId::All,
        name: "All",
        color: ThemeColor::Magenta,
    },
    ThemeOption {
        id: ThemeId::Politics,
        name: "Politics",
        color: ThemeColor::Red,
    },
    ThemeOption {
        id: ThemeId::Economy,
        name: "Economy",
        color: ThemeColor::Cyan,
    },
    ThemeOption {
        id: ThemeId::Social,
        name: "Society",
        color: ThemeColor::Blue,
    },
    ThemeOption {
        id: ThemeId::Tech,
        name: "Technology",
        color: ThemeColor::Violet,
    },
    ThemeOption {
        id: ThemeId::Ecology,
        name: "Climate",
        color: ThemeColor::Green,
    },
    ThemeOption {
        id: ThemeId::Law,
        name: "Legal",
        color: ThemeColor::Amber,
    },
];

/// Color for a raw theme identifier; unknown identifiers get the neutral gray token.
pub fn theme_color(id: &str) -> ThemeColor {
    id.parse::<ThemeId>()
        .map(ThemeId::color)
        .unwrap_or(ThemeColor::Gray)
}
