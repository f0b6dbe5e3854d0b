use serde::{Deserialize, Serialize};

use super::tool::{Keyed, ToolDocument, ToolKind};
use crate::ids::ItemId;

/// Card colors offered on the board, as `(name, hex)`.
pub const IDEA_COLORS: [(&str, &str); 5] = [
    ("Yellow", "#FFF9C4"),
    ("Pink", "#F8BBD9"),
    ("Blue", "#BBDEFB"),
    ("Green", "#C8E6C9"),
    ("Orange", "#FFE0B2"),
];

/// Color of a card stored without one.
pub const FALLBACK_IDEA_COLOR: &str = "#FFFFFF";

/// Bucket an idea is sorted into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum IdeaCategory {
    #[default]
    #[serde(alias = "general")]
    General,
    #[serde(rename = "Must Have")]
    MustHave,
    #[serde(rename = "Nice to Have")]
    NiceToHave,
    Future,
}

impl IdeaCategory {
    pub const ALL: [IdeaCategory; 4] = [
        Self::General,
        Self::MustHave,
        Self::NiceToHave,
        Self::Future,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::MustHave => "Must Have",
            Self::NiceToHave => "Nice to Have",
            Self::Future => "Future",
        }
    }

    /// Accepts display names and the lowercase/kebab spellings used on the
    /// command line (`must-have`, `nice to have`).
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "general" => Some(Self::General),
            "must have" => Some(Self::MustHave),
            "nice to have" => Some(Self::NiceToHave),
            "future" => Some(Self::Future),
            _ => None,
        }
    }
}

/// A sticky note on the ideas board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Idea {
    pub id: ItemId,
    pub text: String,
    #[serde(default)]
    pub category: IdeaCategory,
    #[serde(default = "fallback_color")]
    pub color: String,
    /// Only ever incremented.
    #[serde(default)]
    pub votes: u32,
}

impl Keyed for Idea {
    fn id(&self) -> &ItemId {
        &self.id
    }
}

/// The "Ideas Board" document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IdeasBoard {
    #[serde(default)]
    pub ideas: Vec<Idea>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdeaDraft {
    pub text: String,
    pub category: IdeaCategory,
    pub color: String,
}

impl Default for IdeaDraft {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: IdeaCategory::General,
            color: IDEA_COLORS[0].1.to_string(),
        }
    }
}

/// Which ideas to show. Filtering never touches the board itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdeaFilter {
    #[default]
    All,
    Category(IdeaCategory),
}

impl IdeaFilter {
    pub fn matches(&self, idea: &Idea) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => idea.category == *category,
        }
    }
}

impl ToolDocument for IdeasBoard {
    const KIND: ToolKind = ToolKind::IdeasBoard;
    type Draft = IdeaDraft;
}

fn fallback_color() -> String {
    FALLBACK_IDEA_COLOR.to_string()
}
