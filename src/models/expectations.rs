use serde::{Deserialize, Serialize};

use super::tool::{Keyed, ToolDocument, ToolKind};
use crate::ids::ItemId;

/// What an expectation talks about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExpectationKind {
    /// What do you want to achieve?
    Goal,
    /// What limitations do we have?
    Constraint,
    /// How will we know if we succeeded?
    Success,
}

impl ExpectationKind {
    pub const ALL: [ExpectationKind; 3] = [Self::Goal, Self::Constraint, Self::Success];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Constraint => "constraint",
            Self::Success => "success",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "goal" => Some(Self::Goal),
            "constraint" => Some(Self::Constraint),
            "success" => Some(Self::Success),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Goal => "Goals",
            Self::Constraint => "Constraints",
            Self::Success => "Success Looks Like",
        }
    }
}

/// Urgency of an expectation. `1` is the most urgent and sorts first.
///
/// A missing or `null` priority on the wire reads as [`Priority::High`].
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(try_from = "Option<u8>", into = "u8")]
pub enum Priority {
    #[default]
    High = 1,
    Medium = 2,
    Low = 3,
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::High),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Low),
            other => Err(format!("priority must be 1, 2 or 3, got {}", other)),
        }
    }
}

impl TryFrom<Option<u8>> for Priority {
    type Error = String;

    fn try_from(value: Option<u8>) -> Result<Self, Self::Error> {
        value.map_or(Ok(Self::High), <Self as TryFrom<u8>>::try_from)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority as u8
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpectationItem {
    pub id: ItemId,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ExpectationKind,
    #[serde(default)]
    pub priority: Priority,
}

impl Keyed for ExpectationItem {
    fn id(&self) -> &ItemId {
        &self.id
    }
}

/// The "Manage Expectations" document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Expectations {
    #[serde(default)]
    pub items: Vec<ExpectationItem>,
}

/// Input row of the expectations page. New items default to medium priority.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectationDraft {
    pub text: String,
    pub kind: ExpectationKind,
    pub priority: Priority,
}

impl Default for ExpectationDraft {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: ExpectationKind::Goal,
            priority: Priority::Medium,
        }
    }
}

impl ToolDocument for Expectations {
    const KIND: ToolKind = ToolKind::Expectations;
    type Draft = ExpectationDraft;
}
