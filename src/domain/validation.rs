//! Validation rules for task and client forms
//!
//! Every check here runs before a request is sent. A failure blocks the
//! submission and names the offending field.

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::schemas::{
    ClientInput, ClientStatus, NewTask, Priority, ProjectInput, ProjectStatus, Sprint, Task,
    TaskStatus, TaskUpdate,
};

use super::dates::{date_bounds, DateBounds};

lazy_static::lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Which task date a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

impl std::fmt::Display for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateField::Start => write!(f, "start_date"),
            DateField::End => write!(f, "end_date"),
        }
    }
}

/// Client-side validation failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A task date falls outside its sprint's window
    #[error("date out of range: {field} {date} is outside the sprint window (limit {bound})")]
    DateOutOfRange {
        field: DateField,
        date: NaiveDate,
        bound: NaiveDate,
    },

    /// The milestone is derived from the sprint, so a sprint must be chosen
    #[error("sprint required")]
    SprintRequired,

    /// The chosen sprint is not among the loaded sprints
    #[error("unknown sprint: {0}")]
    UnknownSprint(i64),

    /// An explicit milestone disagrees with the chosen sprint's milestone
    #[error("milestone {given} does not match sprint milestone {expected}")]
    MilestoneMismatch { given: i64, expected: i64 },

    /// A required field is empty
    #[error("{0} is required")]
    Required(&'static str),

    #[error("end date must be after start date")]
    EndBeforeStart,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("estimated hours cannot be negative")]
    NegativeHours,

    #[error("invalid budget: {0}")]
    InvalidBudget(String),

    #[error("nothing to update")]
    EmptyUpdate,
}

impl ValidationError {
    /// Get the error code for this validation failure
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::DateOutOfRange { .. } => "DATE_OUT_OF_RANGE",
            ValidationError::SprintRequired => "SPRINT_REQUIRED",
            ValidationError::UnknownSprint(_) => "UNKNOWN_SPRINT",
            ValidationError::MilestoneMismatch { .. } => "MILESTONE_MISMATCH",
            ValidationError::Required(_) => "REQUIRED",
            ValidationError::EndBeforeStart => "END_BEFORE_START",
            ValidationError::InvalidEmail(_) => "INVALID_EMAIL",
            ValidationError::NegativeHours => "NEGATIVE_HOURS",
            ValidationError::InvalidBudget(_) => "INVALID_BUDGET",
            ValidationError::EmptyUpdate => "EMPTY_UPDATE",
        }
    }
}

/// Check proposed task dates against sprint bounds.
///
/// The start and end checks are independent; a missing date or a missing
/// bound skips that check. Bounds are inclusive.
pub fn validate_task_dates(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    bounds: &DateBounds,
) -> Result<(), ValidationError> {
    if let (Some(date), Some(min)) = (start, bounds.min) {
        if date < min {
            return Err(ValidationError::DateOutOfRange {
                field: DateField::Start,
                date,
                bound: min,
            });
        }
    }
    if let (Some(date), Some(max)) = (end, bounds.max) {
        if date > max {
            return Err(ValidationError::DateOutOfRange {
                field: DateField::End,
                date,
                bound: max,
            });
        }
    }
    Ok(())
}

/// Milestone for a task placed in `sprint_id`.
pub fn assign_milestone_from_sprint(
    sprint_id: Option<i64>,
    sprints: &[Sprint],
) -> Result<i64, ValidationError> {
    let sprint_id = sprint_id.ok_or(ValidationError::SprintRequired)?;
    sprints
        .iter()
        .find(|s| s.id == sprint_id)
        .map(|s| s.milestone)
        .ok_or(ValidationError::UnknownSprint(sprint_id))
}

/// A task's position inside a sprint.
///
/// Can only be built from a sprint and dates that fit its window, and
/// carries the milestone inherited from that sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprintPlacement {
    sprint: i64,
    milestone: i64,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl SprintPlacement {
    pub fn new(
        sprint: &Sprint,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        validate_task_dates(start_date, end_date, &date_bounds(Some(sprint)))?;
        Ok(SprintPlacement {
            sprint: sprint.id,
            milestone: sprint.milestone,
            start_date,
            end_date,
        })
    }

    pub fn sprint(&self) -> i64 {
        self.sprint
    }

    pub fn milestone(&self) -> i64 {
        self.milestone
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

/// Unvalidated task-creation form
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub assignee: Option<i64>,
    /// Only honored for tasks kept out of any sprint
    pub milestone: Option<i64>,
    pub sprint: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub estimated_hours: Option<f64>,
}

impl TaskDraft {
    /// Validate the form and produce the creation request.
    ///
    /// With a sprint the milestone comes from the sprint and the dates must
    /// fit its window. Without one, an explicit milestone keeps the task in
    /// the backlog; with neither the sprint is required.
    pub fn validate(&self, sprints: &[Sprint]) -> Result<NewTask, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::Required("title"));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ValidationError::EndBeforeStart);
            }
        }
        if self.estimated_hours.is_some_and(|h| h < 0.0) {
            return Err(ValidationError::NegativeHours);
        }

        let (milestone, sprint) = match (self.sprint, self.milestone) {
            (Some(sprint_id), given) => {
                let sprint = sprints
                    .iter()
                    .find(|s| s.id == sprint_id)
                    .ok_or(ValidationError::UnknownSprint(sprint_id))?;
                let placement = SprintPlacement::new(sprint, self.start_date, self.end_date)?;
                if let Some(given) = given.filter(|&m| m != placement.milestone()) {
                    return Err(ValidationError::MilestoneMismatch {
                        given,
                        expected: placement.milestone(),
                    });
                }
                (placement.milestone(), Some(placement.sprint()))
            }
            (None, Some(milestone)) => (milestone, None),
            (None, None) => (assign_milestone_from_sprint(None, sprints)?, None),
        };

        Ok(NewTask {
            title: title.to_string(),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            status: TaskStatus::ToDo,
            priority: self.priority,
            assignee: self.assignee,
            milestone,
            sprint,
            start_date: self.start_date,
            end_date: self.end_date,
            estimated_hours: self.estimated_hours,
        })
    }
}

/// Unvalidated client form
#[derive(Debug, Clone, Default)]
pub struct ClientDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: ClientStatus,
    pub tenant: Option<i64>,
}

impl ClientDraft {
    pub fn validate(&self) -> Result<ClientInput, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required("name"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::Required("email"));
        }
        if !EMAIL_REGEX.is_match(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }
        Ok(ClientInput {
            name: name.to_string(),
            email: email.to_string(),
            phone: self
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            status: self.status,
            tenant: self.tenant,
        })
    }
}

/// Check a partial task edit against the task it changes.
///
/// Dates left out of the update keep the task's current values, so a new
/// end date is still compared with the existing start. `sprint` is the
/// task's sprint, when it has one.
pub fn validate_task_update(
    task: &Task,
    update: &TaskUpdate,
    sprint: Option<&Sprint>,
) -> Result<(), ValidationError> {
    if update.is_empty() {
        return Err(ValidationError::EmptyUpdate);
    }
    if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(ValidationError::Required("title"));
    }
    if update.estimated_hours.is_some_and(|h| h < 0.0) {
        return Err(ValidationError::NegativeHours);
    }
    let start = update.start_date.or(task.start_date);
    let end = update.end_date.or(task.end_date);
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(ValidationError::EndBeforeStart);
        }
    }
    validate_task_dates(update.start_date, update.end_date, &date_bounds(sprint))
}

/// Unvalidated project form
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub client: i64,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Decimal amount, e.g. "12500.00"
    pub budget: Option<String>,
    pub team_members: Vec<i64>,
}

impl ProjectDraft {
    pub fn validate(&self) -> Result<ProjectInput, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required("name"));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ValidationError::EndBeforeStart);
            }
        }
        let budget = match self.budget.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
            Some(raw) => match raw.parse::<f64>() {
                Ok(amount) if amount.is_finite() && amount >= 0.0 => Some(raw.to_string()),
                _ => return Err(ValidationError::InvalidBudget(raw.to_string())),
            },
            None => None,
        };
        Ok(ProjectInput {
            name: name.to_string(),
            client: self.client,
            status: self.status.clone(),
            priority: self.priority,
            start_date: self.start_date,
            end_date: self.end_date,
            budget,
            team_members: self.team_members.clone(),
        })
    }
}
