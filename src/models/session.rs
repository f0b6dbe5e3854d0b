use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::steps::clamp_step;

/// One run of the six-step co-design process inside a project.
///
/// Progress is navigation-based: `current_step` only moves when a user
/// proceeds past a tool, never because a tool's content looks complete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Index of the step the session has reached, always within `0..STEP_COUNT`.
    #[serde(default, deserialize_with = "deserialize_step")]
    pub current_step: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionInput {
    pub project_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// The server stores whatever step it was sent; anything out of range is
/// pulled back into the catalogue on the way in.
fn deserialize_step<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(clamp_step(raw))
}
