//! Synchronization with the remote store.
//!
//! Two seams, both object-safe so stores and the registry can hold them as
//! `Arc<dyn ...>`:
//!
//! - [`DocumentGateway`]: whole-document fetch/replace of tool documents.
//! - [`SessionGateway`]: project and session records.
//!
//! [`HttpGateway`] talks to the REST API; [`MemoryGateway`] emulates it in
//! process. [`ToolGateway`] layers the typed, per-tool view on top.

mod http;
mod memory;

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub use http::HttpGateway;
pub use memory::MemoryGateway;

use crate::error::SyncError;
use crate::models::*;

#[async_trait]
pub trait DocumentGateway: Send + Sync {
    /// `Ok(None)` when the session has no document for `tool` yet.
    async fn fetch_document(
        &self,
        tool: ToolKind,
        session_id: Uuid,
    ) -> Result<Option<Value>, SyncError>;

    /// Replace the document wholesale. Saving the same body twice has the
    /// same effect as saving it once.
    async fn save_document(
        &self,
        tool: ToolKind,
        session_id: Uuid,
        document: Value,
    ) -> Result<(), SyncError>;
}

#[async_trait]
pub trait SessionGateway: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, SyncError>;

    async fn create_project(&self, input: CreateProjectInput) -> Result<Project, SyncError>;

    /// `Ok(false)` when no such project exists.
    async fn delete_project(&self, id: Uuid) -> Result<bool, SyncError>;

    async fn list_sessions(&self, project_id: Option<Uuid>) -> Result<Vec<Session>, SyncError>;

    /// `Ok(None)` when the project does not exist.
    async fn create_session(&self, input: CreateSessionInput)
        -> Result<Option<Session>, SyncError>;

    async fn get_session(&self, id: Uuid) -> Result<Option<Session>, SyncError>;

    /// `Ok(false)` when no such session exists.
    async fn set_session_step(&self, id: Uuid, step: usize) -> Result<bool, SyncError>;
}

/// PUT body: the document's fields plus the owning session id.
#[derive(Serialize)]
struct SaveEnvelope<'a, D> {
    session_id: Uuid,
    #[serde(flatten)]
    document: &'a D,
}

/// Typed fetch/save of one tool's document.
pub struct ToolGateway<D> {
    backend: Arc<dyn DocumentGateway>,
    _document: PhantomData<fn() -> D>,
}

impl<D> Clone for ToolGateway<D> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            _document: PhantomData,
        }
    }
}

impl<D: ToolDocument> ToolGateway<D> {
    pub fn new(backend: Arc<dyn DocumentGateway>) -> Self {
        Self {
            backend,
            _document: PhantomData,
        }
    }

    /// Fetch and decode. Server bookkeeping fields are ignored.
    pub async fn fetch(&self, session_id: Uuid) -> Result<Option<D>, SyncError> {
        let Some(raw) = self.backend.fetch_document(D::KIND, session_id).await? else {
            return Ok(None);
        };
        serde_json::from_value(raw)
            .map(Some)
            .map_err(|source| SyncError::Decode {
                tool: D::KIND,
                source,
            })
    }

    pub async fn save(&self, session_id: Uuid, document: &D) -> Result<(), SyncError> {
        let body = serde_json::to_value(SaveEnvelope {
            session_id,
            document,
        })
        .map_err(|source| SyncError::Encode {
            tool: D::KIND,
            source,
        })?;
        self.backend.save_document(D::KIND, session_id, body).await
    }
}
