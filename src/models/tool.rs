use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// The six co-design exercises, in session order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    Expectations,
    ProblemTree,
    EmpathyMap,
    StoryMap,
    IdeasBoard,
    Feedback,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        Self::Expectations,
        Self::ProblemTree,
        Self::EmpathyMap,
        Self::StoryMap,
        Self::IdeasBoard,
        Self::Feedback,
    ];

    /// Collection segment of the document endpoint (`/api/{resource}/{session_id}`).
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Expectations => "expectations",
            Self::ProblemTree => "problem-trees",
            Self::EmpathyMap => "empathy-maps",
            Self::StoryMap => "story-maps",
            Self::IdeasBoard => "ideas-boards",
            Self::Feedback => "feedback",
        }
    }

    /// Page path segment of the step that hosts this tool.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Expectations => "expectations",
            Self::ProblemTree => "problem-tree",
            Self::EmpathyMap => "empathy-map",
            Self::StoryMap => "story-map",
            Self::IdeasBoard => "ideas-board",
            Self::Feedback => "feedback",
        }
    }

    /// Position of this tool's step in the session.
    pub fn step_index(&self) -> usize {
        match self {
            Self::Expectations => 0,
            Self::ProblemTree => 1,
            Self::EmpathyMap => 2,
            Self::StoryMap => 3,
            Self::IdeasBoard => 4,
            Self::Feedback => 5,
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.path() == path)
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// A whole-document aggregate holding all of one tool's data for a session.
///
/// The document is the unit of fetch and save: it is always replaced
/// wholesale, never patched.
pub trait ToolDocument:
    Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: ToolKind;

    /// Ephemeral input state of the tool page. Never persisted.
    type Draft: Clone + Default + Send + Sync + 'static;
}

/// An item addressable by its locally allocated id.
pub trait Keyed {
    fn id(&self) -> &ItemId;
}

/// Removes the first item with `id`, keeping the order of the rest.
/// Returns `false` when nothing matched.
pub fn remove_by_id<T: Keyed>(items: &mut Vec<T>, id: &ItemId) -> bool {
    match items.iter().position(|item| item.id() == id) {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}

/// Trimmed text, or `None` when it is empty or only whitespace.
pub fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
