use serde::{Deserialize, Serialize};

use super::tool::{Keyed, ToolDocument, ToolKind};
use crate::ids::ItemId;

pub const DEFAULT_STORY_MAP_TITLE: &str = "User Journey";

/// Lane of a story map card. Each lane is one row of the map.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StoryKind {
    /// Big things the user does.
    Activity,
    /// Smaller steps in each activity.
    Task,
    /// Details and examples.
    Story,
}

impl StoryKind {
    pub const ALL: [StoryKind; 3] = [Self::Activity, Self::Task, Self::Story];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Task => "task",
            Self::Story => "story",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "activity" => Some(Self::Activity),
            "task" => Some(Self::Task),
            "story" => Some(Self::Story),
            _ => None,
        }
    }

    /// Row the lane occupies on the map.
    pub fn row(&self) -> u32 {
        match self {
            Self::Activity => 0,
            Self::Task => 1,
            Self::Story => 2,
        }
    }
}

/// A card on the story map.
///
/// `column` is the number of same-lane cards that existed when this one was
/// added; it is not renumbered when earlier cards are removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryItem {
    pub id: ItemId,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: StoryKind,
    #[serde(default)]
    pub column: u32,
    #[serde(default)]
    pub row: u32,
}

impl Keyed for StoryItem {
    fn id(&self) -> &ItemId {
        &self.id
    }
}

/// The "Story Map" document: the user journey laid out in lanes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryMap {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub items: Vec<StoryItem>,
}

impl Default for StoryMap {
    fn default() -> Self {
        Self {
            title: default_title(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoryMapDraft {
    pub text: String,
    /// The lane tab currently selected.
    pub kind: StoryKind,
}

impl Default for StoryMapDraft {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: StoryKind::Activity,
        }
    }
}

impl ToolDocument for StoryMap {
    const KIND: ToolKind = ToolKind::StoryMap;
    type Draft = StoryMapDraft;
}

fn default_title() -> String {
    DEFAULT_STORY_MAP_TITLE.to_string()
}
