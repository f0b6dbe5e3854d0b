//! Co-Design Studio session workflow engine.
//!
//! Drives a team through six design-thinking exercises inside a session:
//! the per-tool document stores, their sync with the REST backend, the step
//! sequence and session progress.

pub mod auth;
pub mod capabilities;
pub mod cli;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod ids;
pub mod models;
pub mod registry;
pub mod render;
pub mod steps;
pub mod sync;
pub mod tools;

pub use engine::{Advance, Capabilities, Gateways, WorkflowEngine};
pub use error::{EngineError, RegistryError, SyncError};
pub use tools::{LoadOutcome, PersistOutcome, ToolStore};
