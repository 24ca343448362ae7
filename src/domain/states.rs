//! Task status vocabulary
//!
//! Tasks move forward one step at a time along a fixed sequence:
//! to_do → in_progress → in_review → done → completed

use crate::schemas::TaskStatus;

/// The canonical ordering of task statuses.
///
/// This is the only place the forward sequence is encoded. Statuses not in
/// this list (backlog, testing, unknown strings) have no transition.
pub const TASK_WORKFLOW: &[TaskStatus] = &[
    TaskStatus::ToDo,
    TaskStatus::InProgress,
    TaskStatus::InReview,
    TaskStatus::Done,
    TaskStatus::Completed,
];

/// Get the 0-based index of a status in the workflow, if it has one.
pub fn get_status_index(status: &TaskStatus) -> Option<usize> {
    TASK_WORKFLOW.iter().position(|s| s == status)
}

/// Returns the next status in the workflow.
///
/// Returns None for `completed` and for statuses outside the sequence.
pub fn next_status(current: &TaskStatus) -> Option<TaskStatus> {
    let index = get_status_index(current)?;
    TASK_WORKFLOW.get(index + 1).cloned()
}

/// Button label for moving a task out of `current`.
///
/// None exactly when [`next_status`] is None, so the control is hidden.
pub fn transition_label(current: &TaskStatus) -> Option<&'static str> {
    match current {
        TaskStatus::ToDo => Some("Move to Progress"),
        TaskStatus::InProgress => Some("Move to Review"),
        TaskStatus::InReview => Some("Mark as Done"),
        TaskStatus::Done => Some("Mark as Completed"),
        _ => None,
    }
}

/// Check if a status is the end of the workflow.
pub fn is_terminal(status: &TaskStatus) -> bool {
    *status == TaskStatus::Completed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_order() {
        assert_eq!(TASK_WORKFLOW.len(), 5);
        assert_eq!(TASK_WORKFLOW[0], TaskStatus::ToDo);
        assert_eq!(TASK_WORKFLOW[4], TaskStatus::Completed);
    }

    #[test]
    fn test_get_status_index() {
        assert_eq!(get_status_index(&TaskStatus::ToDo), Some(0));
        assert_eq!(get_status_index(&TaskStatus::Done), Some(3));
        assert_eq!(get_status_index(&TaskStatus::Testing), None);
    }

    #[test]
    fn test_next_status() {
        assert_eq!(next_status(&TaskStatus::ToDo), Some(TaskStatus::InProgress));
        assert_eq!(next_status(&TaskStatus::InProgress), Some(TaskStatus::InReview));
        assert_eq!(next_status(&TaskStatus::InReview), Some(TaskStatus::Done));
        assert_eq!(next_status(&TaskStatus::Done), Some(TaskStatus::Completed));
        assert_eq!(next_status(&TaskStatus::Completed), None);
    }

    #[test]
    fn test_next_status_outside_sequence() {
        assert_eq!(next_status(&TaskStatus::Backlog), None);
        assert_eq!(next_status(&TaskStatus::Testing), None);
        assert_eq!(next_status(&TaskStatus::Other("blocked".into())), None);
    }

    #[test]
    fn test_legacy_review_advances_like_in_review() {
        let review = TaskStatus::from("review");
        assert_eq!(next_status(&review), Some(TaskStatus::Done));
    }

    #[test]
    fn test_transition_labels() {
        assert_eq!(transition_label(&TaskStatus::ToDo), Some("Move to Progress"));
        assert_eq!(transition_label(&TaskStatus::InProgress), Some("Move to Review"));
        assert_eq!(transition_label(&TaskStatus::InReview), Some("Mark as Done"));
        assert_eq!(transition_label(&TaskStatus::Done), Some("Mark as Completed"));
        assert_eq!(transition_label(&TaskStatus::Completed), None);
        assert_eq!(transition_label(&TaskStatus::Other("x".into())), None);
    }

    #[test]
    fn test_is_terminal() {
        assert!(is_terminal(&TaskStatus::Completed));
        assert!(!is_terminal(&TaskStatus::Done));
        assert!(!is_terminal(&TaskStatus::Testing));
    }
}
