//! Guided focus-session state.
//!
//! A guided session walks the user through one task at a time. The backend
//! owns the task queue; each transition replaces the whole client-side
//! state with the server's snapshot.

use crate::task::Task;
use serde::{Deserialize, Serialize};

/// The server's view of a guided session after any transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidedSnapshot {
    pub session_id: String,
    #[serde(default)]
    pub current_task: Option<Task>,
    pub remaining_tasks: u32,
    pub completed_tasks: u32,
}

/// Client-side guided-session state machine.
///
/// `NotStarted -> InProgress -> Finished`, with `Finished -> NotStarted`
/// as a local reset. A snapshot without a current task classifies as
/// `Finished`, so "in progress with no task loaded" is unrepresentable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum GuidedState {
    #[default]
    NotStarted,
    InProgress(GuidedSnapshot),
    Finished {
        completed_tasks: u32,
    },
}

impl GuidedState {
    /// Classifies a server snapshot into the state machine.
    pub fn from_snapshot(snapshot: GuidedSnapshot) -> Self {
        if snapshot.current_task.is_none() {
            Self::Finished {
                completed_tasks: snapshot.completed_tasks,
            }
        } else {
            Self::InProgress(snapshot)
        }
    }

    pub fn is_not_started(&self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress(_))
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }

    /// The session id, while one exists server-side.
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Self::InProgress(snapshot) => Some(&snapshot.session_id),
            _ => None,
        }
    }

    /// The task currently in front of the user.
    pub fn current_task(&self) -> Option<&Task> {
        match self {
            Self::InProgress(snapshot) => snapshot.current_task.as_ref(),
            _ => None,
        }
    }

    pub fn completed_tasks(&self) -> u32 {
        match self {
            Self::NotStarted => 0,
            Self::InProgress(snapshot) => snapshot.completed_tasks,
            Self::Finished { completed_tasks } => *completed_tasks,
        }
    }

    pub fn remaining_tasks(&self) -> u32 {
        match self {
            Self::InProgress(snapshot) => snapshot.remaining_tasks,
            _ => 0,
        }
    }
}
