//! Task status transitions
//!
//! Pure functions: computing a change never touches the API, and applying
//! one never mutates the input task.

use crate::schemas::{Task, TaskStatus};

use super::states::{next_status, transition_label};

/// A one-step status change for a task, ready to be sent to the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub task_id: i64,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

impl StatusChange {
    /// Button label for this change
    pub fn label(&self) -> &'static str {
        transition_label(&self.from).unwrap_or("Advance")
    }
}

/// Result of applying a status change to a local task
#[derive(Debug)]
pub enum TransitionResult {
    /// Successful transition with the new task state
    Success {
        /// The task with its updated status
        next_task: Task,
    },
    /// Failed transition with error message
    Error {
        /// Description of why the transition failed
        error: String,
    },
}

impl TransitionResult {
    /// Check if the transition was successful
    pub fn is_success(&self) -> bool {
        matches!(self, TransitionResult::Success { .. })
    }

    /// Check if the transition failed
    pub fn is_error(&self) -> bool {
        matches!(self, TransitionResult::Error { .. })
    }

    /// Get the next task if the transition was successful
    pub fn task(self) -> Option<Task> {
        match self {
            TransitionResult::Success { next_task } => Some(next_task),
            TransitionResult::Error { .. } => None,
        }
    }

    /// Get the error message if the transition failed
    pub fn error(self) -> Option<String> {
        match self {
            TransitionResult::Success { .. } => None,
            TransitionResult::Error { error } => Some(error),
        }
    }
}

/// The change that moves `task` one step forward.
///
/// None for terminal or unrecognized statuses: the control is hidden and
/// no request is made.
pub fn advance(task: &Task) -> Option<StatusChange> {
    let to = next_status(&task.status)?;
    Some(StatusChange {
        task_id: task.id,
        from: task.status.clone(),
        to,
    })
}

/// Apply a change the API has confirmed to the local copy of a task.
///
/// Rejects changes computed for a different task, or for a status the task
/// no longer has.
pub fn apply_status_change(task: &Task, change: &StatusChange) -> TransitionResult {
    if task.id != change.task_id {
        return TransitionResult::Error {
            error: format!("status change for task {} applied to task {}", change.task_id, task.id),
        };
    }
    if task.status != change.from {
        return TransitionResult::Error {
            error: format!(
                "cannot transition from {} to {}: task is now {}",
                change.from, change.to, task.status
            ),
        };
    }

    TransitionResult::Success {
        next_task: task.clone().with_status(change.to.clone()),
    }
}
