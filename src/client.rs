//! HTTP client for the Co-Design Studio REST API.
//!
//! Thin typed wrapper over the `/api` resource. It knows URLs, verbs and
//! status codes; deciding what a failure means for the user is left to the
//! gateway and the stores built on top of it.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::config::StudioConfig;
use crate::models::*;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: token missing, expired or invalid")]
    Unauthorized,

    #[error("Server error: {0}")]
    Server(String),
}

/// HTTP client for the Co-Design Studio API.
#[derive(Debug, Clone)]
pub struct StudioClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl StudioClient {
    /// Create with explicit configuration and reqwest defaults.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
        }
    }

    /// Create from loaded configuration, applying its request timeout.
    pub fn from_config(config: &StudioConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request with optional bearer auth.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Handle response, converting HTTP errors to ClientError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    /// Handle response whose body is irrelevant to the caller.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    async fn status_error(status: StatusCode, response: reqwest::Response) -> ClientError {
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(body),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::BadRequest(body)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized,
            _ => ClientError::Server(format!("{}: {}", status, body)),
        }
    }

    // ============================================================
    // Current user
    // ============================================================

    /// Resolve the user behind the configured token.
    pub async fn current_user(&self) -> Result<CurrentUser, ClientError> {
        let response = self.request(Method::GET, "/auth/me").send().await?;
        self.handle_response(response).await
    }

    // ============================================================
    // Project Operations
    // ============================================================

    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        let response = self.request(Method::GET, "/projects").send().await?;
        self.handle_response(response).await
    }

    pub async fn create_project(&self, input: &CreateProjectInput) -> Result<Project, ClientError> {
        let response = self
            .request(Method::POST, "/projects")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete a project. The server cascades to its sessions.
    pub async fn delete_project(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .request(Method::DELETE, &format!("/projects/{}", id))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    // ============================================================
    // Session Operations
    // ============================================================

    /// List sessions, optionally only those of one project.
    pub async fn list_sessions(&self, project_id: Option<Uuid>) -> Result<Vec<Session>, ClientError> {
        let path = match project_id {
            Some(pid) => format!("/sessions?project_id={}", pid),
            None => "/sessions".to_string(),
        };
        let response = self.request(Method::GET, &path).send().await?;
        self.handle_response(response).await
    }

    pub async fn create_session(&self, input: &CreateSessionInput) -> Result<Session, ClientError> {
        let response = self
            .request(Method::POST, "/sessions")
            .json(input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub async fn get_session(&self, id: Uuid) -> Result<Session, ClientError> {
        let response = self
            .request(Method::GET, &format!("/sessions/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Write a session's progress pointer. The server stores the value as
    /// sent, so callers clamp first.
    pub async fn set_session_step(&self, id: Uuid, step: usize) -> Result<(), ClientError> {
        let response = self
            .request(Method::PUT, &format!("/sessions/{}/step?step={}", id, step))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    // ============================================================
    // Tool Documents
    // ============================================================

    /// Fetch a tool document. `Ok(None)` when the session has none yet.
    pub async fn get_document(
        &self,
        tool: ToolKind,
        session_id: Uuid,
    ) -> Result<Option<Value>, ClientError> {
        let response = self
            .request(Method::GET, &format!("/{}/{}", tool.resource(), session_id))
            .send()
            .await?;
        match self.handle_response(response).await {
            Ok(doc) => Ok(Some(doc)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Replace a tool document wholesale.
    pub async fn put_document(
        &self,
        tool: ToolKind,
        session_id: Uuid,
        body: &Value,
    ) -> Result<(), ClientError> {
        let response = self
            .request(Method::PUT, &format!("/{}/{}", tool.resource(), session_id))
            .json(body)
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}
