use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{DocumentGateway, SessionGateway};
use crate::client::{ClientError, StudioClient};
use crate::error::SyncError;
use crate::models::*;

/// Gateway backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: StudioClient,
}

impl HttpGateway {
    pub fn new(client: StudioClient) -> Self {
        Self { client }
    }
}

/// Map a 404 to `Ok(false)`, anything else to the usual error.
fn found(result: Result<(), ClientError>) -> Result<bool, SyncError> {
    match result {
        Ok(()) => Ok(true),
        Err(ClientError::NotFound(_)) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl DocumentGateway for HttpGateway {
    async fn fetch_document(
        &self,
        tool: ToolKind,
        session_id: Uuid,
    ) -> Result<Option<Value>, SyncError> {
        tracing::debug!(%tool, %session_id, "GET tool document");
        Ok(self.client.get_document(tool, session_id).await?)
    }

    async fn save_document(
        &self,
        tool: ToolKind,
        session_id: Uuid,
        document: Value,
    ) -> Result<(), SyncError> {
        tracing::debug!(%tool, %session_id, "PUT tool document");
        Ok(self.client.put_document(tool, session_id, &document).await?)
    }
}

#[async_trait]
impl SessionGateway for HttpGateway {
    async fn list_projects(&self) -> Result<Vec<Project>, SyncError> {
        Ok(self.client.list_projects().await?)
    }

    async fn create_project(&self, input: CreateProjectInput) -> Result<Project, SyncError> {
        Ok(self.client.create_project(&input).await?)
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, SyncError> {
        found(self.client.delete_project(id).await)
    }

    async fn list_sessions(&self, project_id: Option<Uuid>) -> Result<Vec<Session>, SyncError> {
        Ok(self.client.list_sessions(project_id).await?)
    }

    async fn create_session(
        &self,
        input: CreateSessionInput,
    ) -> Result<Option<Session>, SyncError> {
        match self.client.create_session(&input).await {
            Ok(session) => Ok(Some(session)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_session(&self, id: Uuid) -> Result<Option<Session>, SyncError> {
        match self.client.get_session(id).await {
            Ok(session) => Ok(Some(session)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_session_step(&self, id: Uuid, step: usize) -> Result<bool, SyncError> {
        found(self.client.set_session_step(id, step).await)
    }
}
