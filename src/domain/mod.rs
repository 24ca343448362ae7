//! Domain logic for task workflow, sprint date windows and project metrics

mod dates;
mod filters;
mod health;
mod states;
mod transitions;
mod validation;

// Property-based tests (compiled only in test builds)
#[cfg(test)]
mod property_tests;

pub use dates::{date_bounds, DateBounds};
pub use filters::{
    filter_clients, filter_sprints_by_milestone, paginate, ClientFilter, ClientMetrics, Page,
    TimeWindow,
};
pub use health::{
    clamp_progress, compute_health, count_overdue, health_band, is_overdue, progress_band,
    ColorBand, Health, HealthStatus, ProjectSummary,
};
pub use states::{get_status_index, is_terminal, next_status, transition_label, TASK_WORKFLOW};
pub use transitions::{advance, apply_status_change, StatusChange, TransitionResult};
pub use validation::{
    assign_milestone_from_sprint, validate_task_dates, validate_task_update, ClientDraft,
    DateField, ProjectDraft, SprintPlacement, TaskDraft, ValidationError,
};
