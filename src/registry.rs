//! Project and session bookkeeping on top of a [`SessionGateway`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::auth::AuthSession;
use crate::error::RegistryError;
use crate::models::*;
use crate::steps::clamp_step;
use crate::sync::SessionGateway;

#[derive(Clone)]
pub struct SessionRegistry {
    gateway: Arc<dyn SessionGateway>,
}

type PendingWrite = Pin<Box<dyn Future<Output = bool> + Send>>;

enum Delivery {
    Spawned(JoinHandle<bool>),
    /// No runtime was running; the write goes out when awaited.
    Deferred(PendingWrite),
}

/// A step write that was sent off without waiting for it.
///
/// Navigation never blocks on the write; callers that care (tests, the CLI
/// before exiting) can await [`acknowledged`](Self::acknowledged).
pub struct StepWrite {
    step: usize,
    delivery: Delivery,
}

impl StepWrite {
    /// The clamped step that was written.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Whether the write was sent in the background or waits to be awaited.
    pub fn is_spawned(&self) -> bool {
        matches!(self.delivery, Delivery::Spawned(_))
    }

    /// Whether the server accepted the write. Failures were already logged.
    pub async fn acknowledged(self) -> bool {
        match self.delivery {
            Delivery::Spawned(handle) => handle.await.unwrap_or(false),
            Delivery::Deferred(write) => write.await,
        }
    }
}

impl fmt::Debug for StepWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepWrite")
            .field("step", &self.step)
            .field("spawned", &self.is_spawned())
            .finish()
    }
}

impl SessionRegistry {
    pub fn new(gateway: Arc<dyn SessionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, RegistryError> {
        Ok(self.gateway.list_projects().await?)
    }

    /// Facilitators only.
    pub async fn create_project(
        &self,
        auth: &AuthSession,
        name: &str,
        description: &str,
    ) -> Result<Project, RegistryError> {
        if !auth.can_manage_projects() {
            return Err(RegistryError::Forbidden);
        }
        let name = non_blank(name).ok_or(RegistryError::EmptyName("Project"))?;
        let project = self
            .gateway
            .create_project(CreateProjectInput {
                name,
                description: description.trim().to_string(),
            })
            .await?;
        tracing::info!(project_id = %project.id, name = %project.name, "created project");
        Ok(project)
    }

    /// Facilitators only. Deleting a project removes its sessions too.
    pub async fn delete_project(&self, auth: &AuthSession, id: Uuid) -> Result<(), RegistryError> {
        if !auth.can_manage_projects() {
            return Err(RegistryError::Forbidden);
        }
        if !self.gateway.delete_project(id).await? {
            return Err(RegistryError::ProjectNotFound(id));
        }
        tracing::info!(project_id = %id, "deleted project");
        Ok(())
    }

    /// Sessions of one project, or all visible sessions.
    pub async fn list_sessions(&self, project_id: Option<Uuid>) -> Result<Vec<Session>, RegistryError> {
        Ok(self.gateway.list_sessions(project_id).await?)
    }

    /// New sessions start at step 0.
    pub async fn create_session(
        &self,
        project_id: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Session, RegistryError> {
        let name = non_blank(name).ok_or(RegistryError::EmptyName("Session"))?;
        let session = self
            .gateway
            .create_session(CreateSessionInput {
                project_id,
                name,
                description: description.trim().to_string(),
            })
            .await?
            .ok_or(RegistryError::ProjectNotFound(project_id))?;
        tracing::info!(session_id = %session.id, %project_id, "created session");
        Ok(session)
    }

    pub async fn get_session(&self, id: Uuid) -> Result<Session, RegistryError> {
        self.gateway
            .get_session(id)
            .await?
            .ok_or(RegistryError::SessionNotFound(id))
    }

    /// Clamp `step` into range and write it in the background.
    ///
    /// Outside a Tokio runtime the write is held until the returned
    /// [`StepWrite`] is awaited.
    pub fn set_current_step(&self, id: Uuid, step: i64) -> StepWrite {
        let step = clamp_step(step);
        let gateway = Arc::clone(&self.gateway);
        let write = async move {
            match gateway.set_session_step(id, step).await {
                Ok(true) => {
                    tracing::debug!(session_id = %id, step, "step write acknowledged");
                    true
                }
                Ok(false) => {
                    tracing::warn!(session_id = %id, step, "step write for unknown session");
                    false
                }
                Err(e) => {
                    tracing::warn!(session_id = %id, step, "step write failed: {}", e);
                    false
                }
            }
        };
        let delivery = match Handle::try_current() {
            Ok(runtime) => Delivery::Spawned(runtime.spawn(write)),
            Err(_) => {
                tracing::debug!(session_id = %id, step, "no runtime, step write deferred");
                Delivery::Deferred(Box::pin(write))
            }
        };
        StepWrite { step, delivery }
    }
}
