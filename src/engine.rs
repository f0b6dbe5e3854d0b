//! Composition root: one open session with its steps and tool stores.

use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::auth::AuthSession;
use crate::capabilities::{LogNotifier, Notifier, SilentSpeech, Speech};
use crate::error::{EngineError, Redirect};
use crate::ids::{IdAllocator, UuidAllocator};
use crate::models::*;
use crate::registry::{SessionRegistry, StepWrite};
use crate::steps::{Step, StepSequencer, StepView, SESSION_HELP};
use crate::sync::{DocumentGateway, SessionGateway};
use crate::tools::*;

/// The two remote seams the engine talks through.
#[derive(Clone)]
pub struct Gateways {
    pub documents: Arc<dyn DocumentGateway>,
    pub sessions: Arc<dyn SessionGateway>,
}

impl Gateways {
    /// Use one backend for both documents and sessions.
    pub fn shared<G>(gateway: Arc<G>) -> Self
    where
        G: DocumentGateway + SessionGateway + 'static,
    {
        Self {
            documents: gateway.clone(),
            sessions: gateway,
        }
    }
}

/// Collaborators the host environment provides.
#[derive(Clone)]
pub struct Capabilities {
    pub ids: Arc<dyn IdAllocator>,
    pub notifier: Arc<dyn Notifier>,
    pub speech: Arc<dyn Speech>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            ids: Arc::new(UuidAllocator),
            notifier: Arc::new(LogNotifier),
            speech: Arc::new(SilentSpeech),
        }
    }
}

/// Result of pressing "Next" (or "Finish Session") on a tool page.
#[derive(Debug)]
pub struct Advance {
    pub persisted: PersistOutcome,
    /// The background step write.
    pub write: StepWrite,
    /// Where to navigate; `None` after the last step.
    pub next: Option<&'static Step>,
}

pub struct WorkflowEngine {
    auth: AuthSession,
    registry: SessionRegistry,
    documents: Arc<dyn DocumentGateway>,
    capabilities: Capabilities,
    sequencer: StepSequencer,
    session: Mutex<Session>,
}

impl WorkflowEngine {
    /// Load the session. If it cannot be loaded the caller must leave the
    /// page; the error carries where to go.
    pub async fn open(
        gateways: Gateways,
        auth: AuthSession,
        session_id: Uuid,
        capabilities: Capabilities,
    ) -> Result<Self, EngineError> {
        let registry = SessionRegistry::new(gateways.sessions);
        let session = registry.get_session(session_id).await.map_err(|source| {
            tracing::error!(%session_id, "could not load session: {}", source);
            EngineError::SessionUnavailable {
                session_id,
                redirect: Redirect::ProjectList,
                source,
            }
        })?;

        tracing::info!(
            %session_id,
            user = %auth.user.name,
            role = auth.role().as_str(),
            current_step = session.current_step,
            "opened session"
        );

        Ok(Self {
            auth,
            registry,
            documents: gateways.documents,
            capabilities,
            sequencer: StepSequencer,
            session: Mutex::new(session),
        })
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn session(&self) -> Session {
        self.session.lock().clone()
    }

    pub fn session_id(&self) -> Uuid {
        self.session.lock().id
    }

    pub fn current_step(&self) -> usize {
        self.session.lock().current_step
    }

    pub fn overview(&self) -> Vec<StepView> {
        self.sequencer.overview(self.current_step())
    }

    pub fn progress(&self) -> f32 {
        self.sequencer.progress(self.current_step())
    }

    /// Resolve a step page. Any step may be opened regardless of progress.
    pub fn navigate(&self, path: &str) -> Result<&'static Step, EngineError> {
        self.sequencer
            .by_path(path)
            .ok_or_else(|| EngineError::UnknownStep(path.to_string()))
    }

    /// Create the store for one tool and load its document.
    pub async fn open_tool<D: ToolDocument>(&self) -> ToolStore<D> {
        let store = ToolStore::new(
            self.session_id(),
            Arc::clone(&self.documents),
            Arc::clone(&self.capabilities.ids),
            Arc::clone(&self.capabilities.notifier),
        );
        let outcome = store.load().await;
        tracing::debug!(tool = %D::KIND, ?outcome, "tool page opened");
        store
    }

    pub async fn expectations(&self) -> ExpectationsStore {
        self.open_tool().await
    }

    pub async fn problem_tree(&self) -> ProblemTreeStore {
        self.open_tool().await
    }

    pub async fn empathy_map(&self) -> EmpathyMapStore {
        self.open_tool().await
    }

    pub async fn story_map(&self) -> StoryMapStore {
        self.open_tool().await
    }

    pub async fn ideas_board(&self) -> IdeasBoardStore {
        self.open_tool().await
    }

    pub async fn feedback(&self) -> FeedbackStore {
        self.open_tool().await
    }

    /// "Next" on a tool page: save the tool, then move the session to the
    /// following step. Navigation goes ahead even if the save failed; the
    /// user has already been told.
    pub async fn advance<D: ToolDocument>(&self, store: &ToolStore<D>) -> Advance {
        let persisted = store.persist().await;

        let index = D::KIND.step_index();
        let write = self
            .registry
            .set_current_step(store.session_id(), index as i64 + 1);
        self.session.lock().current_step = write.step();

        let next = self.sequencer.next(index);
        tracing::info!(
            tool = %D::KIND,
            step = write.step(),
            next = next.map(|s| s.path),
            "advanced session"
        );

        Advance {
            persisted,
            write,
            next,
        }
    }

    /// "Finish Session" on the last step. Same as advancing from it; the
    /// step write clamps to the last index.
    pub async fn finish(&self, store: &FeedbackStore) -> Advance {
        let advance = self.advance(store).await;
        tracing::info!(session_id = %store.session_id(), "session finished");
        advance
    }

    /// Read out the help for a step page, or for the session overview.
    pub async fn speak_help(&self, step: Option<&Step>) {
        let text = step.map_or(SESSION_HELP, |s| s.help);
        self.capabilities.speech.speak(text).await;
    }

    /// Listen once and hand the recognised text to `fill` for the store's
    /// draft. Returns `false` when nothing usable was heard.
    pub async fn dictate<D: ToolDocument>(
        &self,
        store: &ToolStore<D>,
        fill: impl FnOnce(&mut D::Draft, String),
    ) -> bool {
        let heard = self.capabilities.speech.listen().await;
        match heard.as_deref().and_then(non_blank) {
            Some(text) => {
                store.update_draft(|draft| fill(draft, text));
                true
            }
            None => false,
        }
    }
}
