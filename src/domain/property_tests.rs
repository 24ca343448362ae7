//! Property-based tests for domain logic
//!
//! These tests use proptest to verify invariants across many random inputs.

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    use crate::domain::{
        advance, apply_status_change, compute_health, date_bounds, next_status,
        transition_label, validate_task_dates, HealthStatus, TASK_WORKFLOW,
    };
    use crate::schemas::{Priority, Sprint, SprintStatus, Task, TaskStatus};

    // ===== STRATEGY HELPERS =====

    /// Generate a status from the forward sequence, excluding completed
    fn any_advanceable_status() -> impl Strategy<Value = TaskStatus> {
        prop_oneof![
            Just(TaskStatus::ToDo),
            Just(TaskStatus::InProgress),
            Just(TaskStatus::InReview),
            Just(TaskStatus::Done),
        ]
    }

    /// Generate a status that has no forward transition
    fn any_stuck_status() -> impl Strategy<Value = TaskStatus> {
        prop_oneof![
            Just(TaskStatus::Completed),
            Just(TaskStatus::Backlog),
            Just(TaskStatus::Testing),
            "[a-z]{3,10}"
                .prop_filter("must be unrecognized", |s| !TaskStatus::from(s.as_str()).is_recognized())
                .prop_map(TaskStatus::Other),
        ]
    }

    fn any_task(status: impl Strategy<Value = TaskStatus>) -> impl Strategy<Value = Task> {
        (1i64..10_000, status).prop_map(|(id, status)| Task {
            id,
            title: "Test Task".to_string(),
            description: None,
            status,
            priority: Priority::Medium,
            assignee: None,
            milestone: 1,
            sprint: None,
            start_date: None,
            end_date: None,
            estimated_hours: None,
        })
    }

    fn base_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..730).prop_map(|offset| base_date() + Duration::days(offset))
    }

    /// Generate a sprint with both dates set, start <= end
    fn any_dated_sprint() -> impl Strategy<Value = Sprint> {
        (any_date(), 0i64..60).prop_map(|(start, length)| Sprint {
            id: 1,
            name: "Sprint".to_string(),
            status: SprintStatus::Active,
            start_date: Some(start),
            end_date: Some(start + Duration::days(length)),
            milestone: 1,
            milestone_name: None,
            progress: None,
            task_count: None,
        })
    }

    // ===== STATUS VOCABULARY =====

    proptest! {
        /// Property: advance yields exactly the next status in the sequence
        #[test]
        fn test_advance_is_next_in_sequence(task in any_task(any_advanceable_status())) {
            let change = advance(&task).unwrap();
            let index = TASK_WORKFLOW.iter().position(|s| *s == task.status).unwrap();
            prop_assert_eq!(&change.to, &TASK_WORKFLOW[index + 1]);
            prop_assert_eq!(change.task_id, task.id);
        }

        /// Property: terminal and unknown statuses never advance
        #[test]
        fn test_stuck_statuses_never_advance(task in any_task(any_stuck_status())) {
            prop_assert!(advance(&task).is_none());
            prop_assert!(transition_label(&task.status).is_none());
        }

        /// Property: a label exists exactly when a next status exists
        #[test]
        fn test_label_iff_next_status(s in "[a-z_]{2,12}") {
            let status = TaskStatus::from(s.as_str());
            prop_assert_eq!(next_status(&status).is_some(), transition_label(&status).is_some());
        }

        /// Property: applying a change never mutates its input
        #[test]
        fn test_apply_change_never_mutates(task in any_task(any_advanceable_status())) {
            let original = task.clone();
            let change = advance(&task).unwrap();
            let _ = apply_status_change(&task, &change);
            prop_assert_eq!(task, original);
        }
    }

    // ===== DATE VALIDATION =====

    proptest! {
        /// Property: dates inside the window (inclusive) always pass
        #[test]
        fn test_dates_inside_window_pass(sprint in any_dated_sprint(), a in 0i64..60, b in 0i64..60) {
            let start = sprint.start_date.unwrap();
            let end = sprint.end_date.unwrap();
            let length = (end - start).num_days();
            let first = start + Duration::days(a.min(length));
            let second = start + Duration::days(b.min(length));
            let bounds = date_bounds(Some(&sprint));
            prop_assert!(validate_task_dates(Some(first), Some(second), &bounds).is_ok());
        }

        /// Property: a start strictly before the sprint start fails
        #[test]
        fn test_start_before_window_fails(sprint in any_dated_sprint(), days in 1i64..100) {
            let proposed = sprint.start_date.unwrap() - Duration::days(days);
            let bounds = date_bounds(Some(&sprint));
            prop_assert!(validate_task_dates(Some(proposed), None, &bounds).is_err());
        }

        /// Property: an end strictly after the sprint end fails
        #[test]
        fn test_end_after_window_fails(sprint in any_dated_sprint(), days in 1i64..100) {
            let proposed = sprint.end_date.unwrap() + Duration::days(days);
            let bounds = date_bounds(Some(&sprint));
            prop_assert!(validate_task_dates(None, Some(proposed), &bounds).is_err());
        }

        /// Property: no sprint, or a sprint without dates, never fails
        #[test]
        fn test_no_window_never_fails(start in any_date(), end in any_date()) {
            let undated = Sprint {
                id: 1,
                name: "Undated".to_string(),
                status: SprintStatus::Planned,
                start_date: None,
                end_date: None,
                milestone: 1,
                milestone_name: None,
                progress: None,
                task_count: None,
            };
            prop_assert!(validate_task_dates(Some(start), Some(end), &date_bounds(None)).is_ok());
            prop_assert!(validate_task_dates(Some(start), Some(end), &date_bounds(Some(&undated))).is_ok());
        }
    }

    // ===== HEALTH =====

    proptest! {
        /// Property: the score always stays within 0..=100
        #[test]
        fn test_score_in_range(progress in -50.0f64..200.0, overdue in -5i64..50, milestones in -2i64..10) {
            let health = compute_health(progress, overdue, milestones);
            prop_assert!((0.0..=100.0).contains(&health.score));
        }

        /// Property: more than five overdue tasks is always critical
        #[test]
        fn test_many_overdue_always_critical(progress in 0.0f64..100.0, overdue in 6i64..100) {
            prop_assert_eq!(compute_health(progress, overdue, 1).status, HealthStatus::Critical);
        }

        /// Property: an extra overdue task never raises the score
        #[test]
        fn test_overdue_never_raises_score(progress in 0.0f64..100.0, overdue in 0i64..30, milestones in 0i64..5) {
            let before = compute_health(progress, overdue, milestones).score;
            let after = compute_health(progress, overdue + 1, milestones).score;
            prop_assert!(after <= before);
        }
    }
}
