//! Task schema - the unit of work moved across the sprint board

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status of a task.
///
/// One vocabulary for every surface. Older spellings (`todo`, `review`)
/// parse to their canonical variants; strings the API invents later are
/// preserved in `Other` so they round-trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Backlog,
    ToDo,
    InProgress,
    InReview,
    Testing,
    Done,
    Completed,
    Other(String),
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::ToDo
    }
}

impl TaskStatus {
    /// Wire spelling of the status
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Backlog => "backlog",
            TaskStatus::ToDo => "to_do",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::InReview => "in_review",
            TaskStatus::Testing => "testing",
            TaskStatus::Done => "done",
            TaskStatus::Completed => "completed",
            TaskStatus::Other(s) => s,
        }
    }

    /// Human-readable column title
    pub fn display_name(&self) -> &str {
        match self {
            TaskStatus::Backlog => "Backlog",
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::InReview => "In Review",
            TaskStatus::Testing => "Testing",
            TaskStatus::Done => "Done",
            TaskStatus::Completed => "Completed",
            TaskStatus::Other(s) => s,
        }
    }

    /// Whether the status belongs to the known vocabulary
    pub fn is_recognized(&self) -> bool {
        !matches!(self, TaskStatus::Other(_))
    }
}

impl From<&str> for TaskStatus {
    fn from(s: &str) -> Self {
        match s {
            "backlog" => TaskStatus::Backlog,
            "to_do" | "todo" => TaskStatus::ToDo,
            "in_progress" => TaskStatus::InProgress,
            "in_review" | "review" => TaskStatus::InReview,
            "testing" => TaskStatus::Testing,
            "done" => TaskStatus::Done,
            "completed" => TaskStatus::Completed,
            other => TaskStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        TaskStatus::from(s.as_str())
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TaskStatus::from(s))
    }
}

/// Priority shared by tasks and projects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// A task as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Externally assigned identifier
    pub id: i64,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub priority: Priority,

    /// User id of the assignee
    #[serde(default)]
    pub assignee: Option<i64>,

    /// Owning milestone
    pub milestone: i64,

    #[serde(default)]
    pub sprint: Option<i64>,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
}

impl Task {
    /// Return a new Task with the given status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Body of a task-creation request.
///
/// Only built by [`crate::domain::TaskDraft::validate`], so the milestone
/// always matches the chosen sprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub status: TaskStatus,
    pub priority: Priority,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<i64>,

    pub milestone: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
}

/// Partial task update from the edit form; only set fields are sent.
/// Status moves through [`crate::workflow::advance_task`] instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        *self == TaskUpdate::default()
    }
}

/// Partial update carrying only a status change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStatusUpdate {
    pub status: TaskStatus,
}
