use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::Value;
use uuid::Uuid;

use super::{DocumentGateway, SessionGateway};
use crate::error::SyncError;
use crate::models::*;

#[derive(Debug, Default)]
struct Store {
    projects: Vec<Project>,
    sessions: Vec<Session>,
    documents: HashMap<(ToolKind, Uuid), Value>,
    saves: HashMap<(ToolKind, Uuid), usize>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Faults {
    fetches: bool,
    saves: bool,
    sessions: bool,
}

/// In-process stand-in for the REST API.
///
/// Behaves like the real backend: documents are replaced wholesale and
/// echoed back with server bookkeeping fields, steps are stored unclamped,
/// deleting a project cascades to its sessions and their documents. Faults
/// can be switched on to simulate an unreachable server.
#[derive(Debug)]
pub struct MemoryGateway {
    owner_id: Uuid,
    store: Mutex<Store>,
    faults: Mutex<Faults>,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::with_owner(Uuid::new_v4())
    }

    /// Projects created through this gateway are owned by `owner_id`.
    pub fn with_owner(owner_id: Uuid) -> Self {
        Self {
            owner_id,
            store: Mutex::new(Store::default()),
            faults: Mutex::new(Faults::default()),
        }
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.faults.lock().fetches = fail;
    }

    pub fn fail_saves(&self, fail: bool) {
        self.faults.lock().saves = fail;
    }

    pub fn fail_sessions(&self, fail: bool) {
        self.faults.lock().sessions = fail;
    }

    /// The raw stored document, bookkeeping fields included.
    pub fn document(&self, tool: ToolKind, session_id: Uuid) -> Option<Value> {
        self.store.lock().documents.get(&(tool, session_id)).cloned()
    }

    /// Seed a document as if another client had saved it.
    pub fn insert_document(&self, tool: ToolKind, session_id: Uuid, document: Value) {
        let stamped = stamp(document, session_id, None);
        self.store.lock().documents.insert((tool, session_id), stamped);
    }

    /// Number of successful saves of one document.
    pub fn save_count(&self, tool: ToolKind, session_id: Uuid) -> usize {
        self.store
            .lock()
            .saves
            .get(&(tool, session_id))
            .copied()
            .unwrap_or(0)
    }

    fn outage(what: &str) -> SyncError {
        SyncError::Unavailable(format!("simulated outage during {}", what))
    }

    fn check_sessions(&self, what: &str) -> Result<(), SyncError> {
        if self.faults.lock().sessions {
            return Err(Self::outage(what));
        }
        Ok(())
    }
}

/// Add the fields the backend attaches to every stored document.
fn stamp(document: Value, session_id: Uuid, previous: Option<&Value>) -> Value {
    let Value::Object(mut fields) = document else {
        return document;
    };
    let now = Value::String(Utc::now().to_rfc3339());
    let kept = |key: &str| previous.and_then(|p| p.get(key)).cloned();

    fields.insert(
        "id".to_string(),
        kept("id").unwrap_or_else(|| Value::String(Uuid::new_v4().to_string())),
    );
    fields.insert(
        "session_id".to_string(),
        Value::String(session_id.to_string()),
    );
    fields.insert(
        "created_at".to_string(),
        kept("created_at").unwrap_or_else(|| now.clone()),
    );
    fields.insert("updated_at".to_string(), now);
    Value::Object(fields)
}

#[async_trait]
impl DocumentGateway for MemoryGateway {
    async fn fetch_document(
        &self,
        tool: ToolKind,
        session_id: Uuid,
    ) -> Result<Option<Value>, SyncError> {
        if self.faults.lock().fetches {
            return Err(Self::outage("fetch"));
        }
        Ok(self.document(tool, session_id))
    }

    async fn save_document(
        &self,
        tool: ToolKind,
        session_id: Uuid,
        document: Value,
    ) -> Result<(), SyncError> {
        if self.faults.lock().saves {
            return Err(Self::outage("save"));
        }
        let mut store = self.store.lock();
        let key = (tool, session_id);
        let stamped = stamp(document, session_id, store.documents.get(&key));
        store.documents.insert(key, stamped);
        *store.saves.entry(key).or_default() += 1;
        Ok(())
    }
}

#[async_trait]
impl SessionGateway for MemoryGateway {
    async fn list_projects(&self) -> Result<Vec<Project>, SyncError> {
        self.check_sessions("list projects")?;
        let store = self.store.lock();
        Ok(store
            .projects
            .iter()
            .filter(|p| p.owner_id == self.owner_id)
            .cloned()
            .collect())
    }

    async fn create_project(&self, input: CreateProjectInput) -> Result<Project, SyncError> {
        self.check_sessions("create project")?;
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            owner_id: self.owner_id,
            created_at: now,
            updated_at: now,
        };
        self.store.lock().projects.push(project.clone());
        Ok(project)
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, SyncError> {
        self.check_sessions("delete project")?;
        let mut store = self.store.lock();
        let before = store.projects.len();
        store.projects.retain(|p| p.id != id);
        if store.projects.len() == before {
            return Ok(false);
        }

        let doomed: Vec<Uuid> = store
            .sessions
            .iter()
            .filter(|s| s.project_id == id)
            .map(|s| s.id)
            .collect();
        store.sessions.retain(|s| s.project_id != id);
        store
            .documents
            .retain(|(_, session_id), _| !doomed.contains(session_id));
        Ok(true)
    }

    async fn list_sessions(&self, project_id: Option<Uuid>) -> Result<Vec<Session>, SyncError> {
        self.check_sessions("list sessions")?;
        let store = self.store.lock();
        Ok(store
            .sessions
            .iter()
            .filter(|s| project_id.map_or(true, |pid| s.project_id == pid))
            .cloned()
            .collect())
    }

    async fn create_session(
        &self,
        input: CreateSessionInput,
    ) -> Result<Option<Session>, SyncError> {
        self.check_sessions("create session")?;
        let mut store = self.store.lock();
        if !store.projects.iter().any(|p| p.id == input.project_id) {
            return Ok(None);
        }
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            project_id: input.project_id,
            name: input.name,
            description: input.description,
            current_step: 0,
            created_at: now,
            updated_at: now,
        };
        store.sessions.push(session.clone());
        Ok(Some(session))
    }

    async fn get_session(&self, id: Uuid) -> Result<Option<Session>, SyncError> {
        self.check_sessions("get session")?;
        Ok(self
            .store
            .lock()
            .sessions
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn set_session_step(&self, id: Uuid, step: usize) -> Result<bool, SyncError> {
        self.check_sessions("set session step")?;
        let mut store = self.store.lock();
        match store.sessions.iter_mut().find(|s| s.id == id) {
            Some(session) => {
                session.current_step = step;
                session.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
