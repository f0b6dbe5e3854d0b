use serde::{Deserialize, Serialize};

use super::tool::{ToolDocument, ToolKind};

pub const DEFAULT_PERSONA: &str = "User";

/// The four quadrants of an empathy map.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    Says,
    Thinks,
    Does,
    Feels,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Self::Says, Self::Thinks, Self::Does, Self::Feels];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Says => "says",
            Self::Thinks => "thinks",
            Self::Does => "does",
            Self::Feels => "feels",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "says" => Some(Self::Says),
            "thinks" => Some(Self::Thinks),
            "does" => Some(Self::Does),
            "feels" => Some(Self::Feels),
            _ => None,
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Says => "What do they say out loud?",
            Self::Thinks => "What are they thinking?",
            Self::Does => "What actions do they take?",
            Self::Feels => "What emotions do they feel?",
        }
    }
}

/// The "Empathy Map" document for one persona.
///
/// Quadrant entries are bare strings and are addressed by position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmpathyMap {
    #[serde(default = "default_persona")]
    pub persona_name: String,
    #[serde(default)]
    pub says: Vec<String>,
    #[serde(default)]
    pub thinks: Vec<String>,
    #[serde(default)]
    pub does: Vec<String>,
    #[serde(default)]
    pub feels: Vec<String>,
}

impl Default for EmpathyMap {
    fn default() -> Self {
        Self {
            persona_name: default_persona(),
            says: Vec::new(),
            thinks: Vec::new(),
            does: Vec::new(),
            feels: Vec::new(),
        }
    }
}

impl EmpathyMap {
    pub fn quadrant(&self, quadrant: Quadrant) -> &[String] {
        match quadrant {
            Quadrant::Says => &self.says,
            Quadrant::Thinks => &self.thinks,
            Quadrant::Does => &self.does,
            Quadrant::Feels => &self.feels,
        }
    }

    pub fn quadrant_mut(&mut self, quadrant: Quadrant) -> &mut Vec<String> {
        match quadrant {
            Quadrant::Says => &mut self.says,
            Quadrant::Thinks => &mut self.thinks,
            Quadrant::Does => &mut self.does,
            Quadrant::Feels => &mut self.feels,
        }
    }
}

/// One pending input per quadrant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmpathyMapDraft {
    pub says: String,
    pub thinks: String,
    pub does: String,
    pub feels: String,
}

impl EmpathyMapDraft {
    pub fn input(&self, quadrant: Quadrant) -> &str {
        match quadrant {
            Quadrant::Says => &self.says,
            Quadrant::Thinks => &self.thinks,
            Quadrant::Does => &self.does,
            Quadrant::Feels => &self.feels,
        }
    }

    pub fn input_mut(&mut self, quadrant: Quadrant) -> &mut String {
        match quadrant {
            Quadrant::Says => &mut self.says,
            Quadrant::Thinks => &mut self.thinks,
            Quadrant::Does => &mut self.does,
            Quadrant::Feels => &mut self.feels,
        }
    }
}

impl ToolDocument for EmpathyMap {
    const KIND: ToolKind = ToolKind::EmpathyMap;
    type Draft = EmpathyMapDraft;
}

fn default_persona() -> String {
    DEFAULT_PERSONA.to_string()
}
