//! Tool data stores.
//!
//! A [`ToolStore`] owns the in-memory copy of one tool document for one
//! session, plus the page's draft input. Edits are purely local until
//! [`ToolStore::persist`] sends the whole document through the gateway.
//!
//! # Ordering
//!
//! Gateway calls run without holding the store's lock, so a load and a
//! persist (or several loads) can be in flight at once. Every load, persist
//! and local edit takes the next ticket from a per-store counter. A fetch
//! response is applied only if its ticket is still the newest one issued;
//! otherwise it is dropped as [`LoadOutcome::Superseded`]. The result is
//! last-issued-wins rather than last-arrived-wins, and a slow fetch can never
//! clobber an edit made while it was in flight.
//!
//! Tool-specific operations live in the submodules as inherent impls on
//! `ToolStore<Document>`.

mod empathy_map;
mod expectations;
mod feedback;
mod ideas;
mod problem_tree;
mod story_map;

use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

pub use empathy_map::EmpathyMapStore;
pub use expectations::{ExpectationSummary, ExpectationsStore};
pub use feedback::FeedbackStore;
pub use ideas::IdeasBoardStore;
pub use problem_tree::ProblemTreeStore;
pub use story_map::StoryMapStore;

use crate::capabilities::{Notice, Notifier};
use crate::error::SyncError;
use crate::ids::{IdAllocator, ItemId};
use crate::models::{ToolDocument, ToolKind};
use crate::sync::{DocumentGateway, ToolGateway};

/// How a [`ToolStore::load`] ended.
///
/// `Fresh` and `Failed` both leave the empty default in place and look the
/// same to the user; they are kept apart here so a caller can surface the
/// difference later without changing the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The stored document replaced local state.
    Loaded,
    /// The server has no document for this session yet.
    Fresh,
    /// The fetch failed; local state is the empty default.
    Failed,
    /// A newer load, persist or edit was issued while this fetch was in
    /// flight; the response was dropped.
    Superseded,
}

/// How a [`ToolStore::persist`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved,
    /// The save did not complete. Local edits are kept and the user was
    /// told; saving again is up to them.
    Failed,
}

struct StoreState<D: ToolDocument> {
    document: D,
    draft: D::Draft,
    /// Last ticket handed out to a load, persist or edit.
    issued: u64,
    /// Bumped by every change to `document`.
    revision: u64,
    /// Newest revision known to match the server.
    synced_revision: Option<u64>,
    last_load: Option<LoadOutcome>,
}

struct Shared<D: ToolDocument> {
    session_id: Uuid,
    gateway: ToolGateway<D>,
    ids: Arc<dyn IdAllocator>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<StoreState<D>>,
}

/// In-memory owner of one tool document. Cloning yields another handle to
/// the same store.
pub struct ToolStore<D: ToolDocument> {
    shared: Arc<Shared<D>>,
}

impl<D: ToolDocument> Clone for ToolStore<D> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<D: ToolDocument> ToolStore<D> {
    /// A store holding the empty default document. Call [`load`](Self::load)
    /// to pull in what the server has.
    pub fn new(
        session_id: Uuid,
        backend: Arc<dyn DocumentGateway>,
        ids: Arc<dyn IdAllocator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                session_id,
                gateway: ToolGateway::new(backend),
                ids,
                notifier,
                state: Mutex::new(StoreState {
                    document: D::default(),
                    draft: D::Draft::default(),
                    issued: 0,
                    revision: 0,
                    synced_revision: None,
                    last_load: None,
                }),
            }),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.shared.session_id
    }

    pub fn tool(&self) -> ToolKind {
        D::KIND
    }

    /// Copy of the current document.
    pub fn snapshot(&self) -> D {
        self.shared.state.lock().document.clone()
    }

    /// Read the document in place.
    pub fn read<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        f(&self.shared.state.lock().document)
    }

    pub fn draft(&self) -> D::Draft {
        self.shared.state.lock().draft.clone()
    }

    /// Edit the draft input. Drafts are not part of the document and do not
    /// count as edits.
    pub fn update_draft(&self, f: impl FnOnce(&mut D::Draft)) {
        f(&mut self.shared.state.lock().draft);
    }

    /// Outcome of the most recent load that finished, if any.
    pub fn last_load(&self) -> Option<LoadOutcome> {
        self.shared.state.lock().last_load
    }

    /// Whether the document has changes the server has not acknowledged.
    pub fn is_dirty(&self) -> bool {
        let state = self.shared.state.lock();
        state.synced_revision != Some(state.revision)
    }

    pub(crate) fn next_id(&self) -> ItemId {
        self.shared.ids.next()
    }

    /// Apply a local edit. Supersedes any fetch in flight.
    pub(crate) fn edit<R>(&self, f: impl FnOnce(&mut D, &mut D::Draft) -> R) -> R {
        let mut state = self.shared.state.lock();
        state.issued += 1;
        state.revision += 1;
        let state = &mut *state;
        f(&mut state.document, &mut state.draft)
    }

    /// Apply an edit only if `f` reports that it changed something.
    ///
    /// Rejected adds and removals of unknown ids leave the counters alone,
    /// so they neither dirty the store nor cancel an in-flight load.
    pub(crate) fn try_edit(&self, f: impl FnOnce(&mut D, &mut D::Draft) -> bool) -> bool {
        let mut state = self.shared.state.lock();
        let changed = {
            let state = &mut *state;
            f(&mut state.document, &mut state.draft)
        };
        if changed {
            state.issued += 1;
            state.revision += 1;
        }
        changed
    }

    /// Fetch the stored document and adopt it.
    ///
    /// Never fails: a missing document or a transport failure both leave the
    /// empty default in place. Transport failures are logged, not shown.
    pub async fn load(&self) -> LoadOutcome {
        let ticket = {
            let mut state = self.shared.state.lock();
            state.issued += 1;
            state.issued
        };

        let fetched = self.shared.gateway.fetch(self.shared.session_id).await;

        let mut state = self.shared.state.lock();
        if state.issued != ticket {
            tracing::debug!(
                tool = %D::KIND,
                session_id = %self.shared.session_id,
                ticket,
                newest = state.issued,
                "dropping superseded fetch response"
            );
            return LoadOutcome::Superseded;
        }

        let (document, outcome) = match fetched {
            Ok(Some(document)) => (document, LoadOutcome::Loaded),
            Ok(None) => (D::default(), LoadOutcome::Fresh),
            Err(e) => {
                tracing::warn!(
                    tool = %D::KIND,
                    session_id = %self.shared.session_id,
                    "fetch failed, starting from an empty document: {}",
                    e
                );
                (D::default(), LoadOutcome::Failed)
            }
        };

        state.document = document;
        state.revision += 1;
        state.synced_revision = match outcome {
            LoadOutcome::Failed => None,
            _ => Some(state.revision),
        };
        state.last_load = Some(outcome);
        outcome
    }

    /// Send the whole document to the server.
    ///
    /// On failure nothing is rolled back; the user gets an error notice and
    /// can retry.
    pub async fn persist(&self) -> PersistOutcome {
        let (document, revision) = {
            let mut state = self.shared.state.lock();
            state.issued += 1;
            (state.document.clone(), state.revision)
        };

        match self.save(&document).await {
            Ok(()) => {
                let mut state = self.shared.state.lock();
                if state.synced_revision.map_or(true, |synced| synced < revision) {
                    state.synced_revision = Some(revision);
                }
                drop(state);
                self.shared.notifier.notify(Notice::success("Saved!"));
                PersistOutcome::Saved
            }
            Err(e) => {
                tracing::error!(
                    tool = %D::KIND,
                    session_id = %self.shared.session_id,
                    "save failed, keeping local edits: {}",
                    e
                );
                self.shared.notifier.notify(Notice::error("Could not save"));
                PersistOutcome::Failed
            }
        }
    }

    async fn save(&self, document: &D) -> Result<(), SyncError> {
        self.shared
            .gateway
            .save(self.shared.session_id, document)
            .await
    }
}
