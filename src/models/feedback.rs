use serde::{Deserialize, Serialize};

use super::tool::{Keyed, ToolDocument, ToolKind};
use crate::ids::ItemId;

/// "I Like, I Wish, What If" buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Like,
    Wish,
    #[serde(rename = "whatif")]
    WhatIf,
}

impl FeedbackKind {
    pub const ALL: [FeedbackKind; 3] = [Self::Like, Self::Wish, Self::WhatIf];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Wish => "wish",
            Self::WhatIf => "whatif",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "like" => Some(Self::Like),
            "wish" => Some(Self::Wish),
            "whatif" | "what-if" => Some(Self::WhatIf),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Like => "I Like...",
            Self::Wish => "I Wish...",
            Self::WhatIf => "What If...",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackItem {
    pub id: ItemId,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
}

impl Keyed for FeedbackItem {
    fn id(&self) -> &ItemId {
        &self.id
    }
}

/// The "I Like, I Wish, What If" document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    #[serde(default)]
    pub items: Vec<FeedbackItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackDraft {
    pub text: String,
    pub kind: FeedbackKind,
}

impl Default for FeedbackDraft {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: FeedbackKind::Like,
        }
    }
}

impl ToolDocument for Feedback {
    const KIND: ToolKind = ToolKind::Feedback;
    type Draft = FeedbackDraft;
}
