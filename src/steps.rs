//! The fixed catalogue of co-design steps and progress derivation.
//!
//! Progress is navigation-based. A step is "completed" because the session
//! moved past it, not because its tool has content, and any step page may be
//! opened at any time.

use serde::Serialize;

use crate::models::ToolKind;

pub const STEP_COUNT: usize = 6;

/// One entry in the step catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub index: usize,
    pub tool: ToolKind,
    pub name: &'static str,
    pub path: &'static str,
    /// Icon tag for the navigation shell.
    pub icon: &'static str,
    /// Color tag for the navigation shell.
    pub color: &'static str,
    pub description: &'static str,
    /// Spoken guidance for the step page.
    pub help: &'static str,
}

pub const STEPS: [Step; STEP_COUNT] = [
    Step {
        index: 0,
        tool: ToolKind::Expectations,
        name: "Manage Expectations",
        path: "expectations",
        icon: "target",
        color: "amber",
        description: "Set goals for your project",
        help: "This is Manage Expectations. Start by setting clear goals - what do you want to achieve? Add constraints - what limitations exist? Define success - how will you know if it worked?",
    },
    Step {
        index: 1,
        tool: ToolKind::ProblemTree,
        name: "Problem Tree",
        path: "problem-tree",
        icon: "tree-pine",
        color: "red",
        description: "Find the main problem and its causes",
        help: "This is the Problem Tree. First, write the main problem in the middle box. Then add causes below (why does this happen?) and effects above (what happens because of this?). This helps you understand the problem better.",
    },
    Step {
        index: 2,
        tool: ToolKind::EmpathyMap,
        name: "Empathy Map",
        path: "empathy-map",
        icon: "heart",
        color: "pink",
        description: "Understand how people feel",
        help: "This is the Empathy Map. Think about a person who has this problem. What do they say? What do they think? What do they do? How do they feel? This helps us understand their experience.",
    },
    Step {
        index: 3,
        tool: ToolKind::StoryMap,
        name: "Story Map",
        path: "story-map",
        icon: "map",
        color: "blue",
        description: "Plan the user journey",
        help: "This is the Story Map. Start with big activities - what does the user need to do? Then add tasks - smaller steps in each activity. Finally add stories - specific details and examples. This shows the whole journey.",
    },
    Step {
        index: 4,
        tool: ToolKind::IdeasBoard,
        name: "Ideas Board",
        path: "ideas-board",
        icon: "lightbulb",
        color: "yellow",
        description: "Collect and vote on ideas",
        help: "This is the Ideas Board. Share your ideas here! Type or speak your idea, pick a color, and add it to the board. You can vote for ideas you like by clicking the thumbs up button.",
    },
    Step {
        index: 5,
        tool: ToolKind::Feedback,
        name: "I Like, I Wish, What If",
        path: "feedback",
        icon: "message-square",
        color: "green",
        description: "Share feedback and suggestions",
        help: "This is the I Like, I Wish, What If tool. Share feedback in three ways: I Like - what works well; I Wish - what could be better; What If - new ideas to try. Every opinion matters!",
    },
];

pub const SESSION_HELP: &str = "This is your session overview. You can see all the design steps here. Click on a step to start working on it. Complete each step in order or choose the one you want.";

/// Derived status of a step relative to a session's `current_step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Current => "current",
            Self::Upcoming => "upcoming",
        }
    }
}

/// A step together with its status, as shown in the session overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepView {
    #[serde(flatten)]
    pub step: Step,
    pub status: StepStatus,
}

/// Pulls any requested step index into `0..STEP_COUNT`.
pub fn clamp_step(step: i64) -> usize {
    step.clamp(0, STEP_COUNT as i64 - 1) as usize
}

/// Stateless view over [`STEPS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StepSequencer;

impl StepSequencer {
    pub fn steps(&self) -> &'static [Step] {
        &STEPS
    }

    pub fn by_path(&self, path: &str) -> Option<&'static Step> {
        STEPS.iter().find(|step| step.path == path)
    }

    pub fn status(&self, step: &Step, current_step: usize) -> StepStatus {
        use std::cmp::Ordering;
        match step.index.cmp(&current_step) {
            Ordering::Less => StepStatus::Completed,
            Ordering::Equal => StepStatus::Current,
            Ordering::Greater => StepStatus::Upcoming,
        }
    }

    pub fn overview(&self, current_step: usize) -> Vec<StepView> {
        STEPS
            .iter()
            .map(|step| StepView {
                step: *step,
                status: self.status(step, current_step),
            })
            .collect()
    }

    pub fn next(&self, index: usize) -> Option<&'static Step> {
        STEPS.get(index + 1)
    }

    pub fn previous(&self, index: usize) -> Option<&'static Step> {
        index.checked_sub(1).and_then(|i| STEPS.get(i))
    }

    /// Share of steps completed, in `0.0..=1.0`.
    pub fn progress(&self, current_step: usize) -> f32 {
        current_step.min(STEP_COUNT) as f32 / STEP_COUNT as f32
    }
}
