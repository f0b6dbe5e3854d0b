use serde::{Deserialize, Serialize};

use super::tool::{Keyed, ToolDocument, ToolKind};
use crate::ids::ItemId;

/// Which side of the core problem a node hangs on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TreeNodeKind {
    /// Why does the problem happen? Drawn below the trunk.
    Cause,
    /// What happens because of it? Drawn above the trunk.
    Effect,
}

impl TreeNodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cause => "cause",
            Self::Effect => "effect",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "cause" => Some(Self::Cause),
            "effect" => Some(Self::Effect),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeNode {
    pub id: ItemId,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: TreeNodeKind,
}

impl Keyed for TreeNode {
    fn id(&self) -> &ItemId {
        &self.id
    }
}

/// The "Problem Tree" document: a core problem with its causes and effects.
///
/// `core_problem` is always a string; an unanswered trunk is `""`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProblemTree {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub core_problem: String,
    #[serde(default)]
    pub items: Vec<TreeNode>,
}

/// One input box each for the next cause and the next effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProblemTreeDraft {
    pub cause: String,
    pub effect: String,
}

impl ToolDocument for ProblemTree {
    const KIND: ToolKind = ToolKind::ProblemTree;
    type Draft = ProblemTreeDraft;
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
