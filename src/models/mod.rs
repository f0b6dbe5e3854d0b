//! Domain models for Co-Design Studio.
//!
//! # Core Concepts
//!
//! ## Records owned by the server
//!
//! - [`Project`]: Top-level container for co-design sessions.
//! - [`Session`]: One run of the six-step process, with its progress pointer.
//!
//! ## Tool documents
//!
//! Each tool keeps all of its data for a session in a single document that is
//! fetched and saved whole (see [`ToolDocument`]):
//!
//! - [`Expectations`]: goals, constraints and success criteria with priorities.
//! - [`ProblemTree`]: a core problem with its causes and effects.
//! - [`EmpathyMap`]: what a persona says, thinks, does and feels.
//! - [`StoryMap`]: the user journey in activity/task/story lanes.
//! - [`IdeasBoard`]: colored, categorized, votable ideas.
//! - [`Feedback`]: "I like", "I wish" and "what if" reactions.
//!
//! Items inside documents carry locally allocated [`ItemId`](crate::ids::ItemId)s.

mod empathy_map;
mod expectations;
mod feedback;
mod ideas;
mod problem_tree;
mod project;
mod session;
mod story_map;
mod tool;

pub use empathy_map::*;
pub use expectations::*;
pub use feedback::*;
pub use ideas::*;
pub use problem_tree::*;
pub use project::*;
pub use session::*;
pub use story_map::*;
pub use tool::*;
