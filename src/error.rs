//! Error types shared across the engine's components.

use thiserror::Error;
use uuid::Uuid;

use crate::client::ClientError;
use crate::models::ToolKind;

/// A gateway call that did not complete.
///
/// "Document not found" is not an error; gateways report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Transport(#[from] ClientError),

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("malformed {tool} document: {source}")]
    Decode {
        tool: ToolKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode {tool} document: {source}")]
    Encode {
        tool: ToolKind,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures of project and session bookkeeping.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    #[error("Only facilitators can manage projects")]
    Forbidden,

    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Where the shell should send the user when a page cannot be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// The project and session list.
    ProjectList,
}

#[derive(Debug, Error)]
pub enum EngineError {
    /// The session could not be loaded. Nothing of it may be rendered.
    #[error("could not open session {session_id}: {source}")]
    SessionUnavailable {
        session_id: Uuid,
        redirect: Redirect,
        #[source]
        source: RegistryError,
    },

    #[error("no step at path {0:?}")]
    UnknownStep(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl EngineError {
    /// Redirect target for errors that are fatal to the current page.
    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            Self::SessionUnavailable { redirect, .. } => Some(*redirect),
            _ => None,
        }
    }
}
