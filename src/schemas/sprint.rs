//! Sprint and milestone schemas

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status of a sprint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SprintStatus {
    Planned,
    Active,
    Completed,
    Canceled,
    Other(String),
}

impl Default for SprintStatus {
    fn default() -> Self {
        SprintStatus::Planned
    }
}

impl SprintStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SprintStatus::Planned => "planned",
            SprintStatus::Active => "active",
            SprintStatus::Completed => "completed",
            SprintStatus::Canceled => "canceled",
            SprintStatus::Other(s) => s,
        }
    }
}

impl From<String> for SprintStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "planned" => SprintStatus::Planned,
            "active" => SprintStatus::Active,
            "completed" => SprintStatus::Completed,
            "canceled" | "cancelled" => SprintStatus::Canceled,
            _ => SprintStatus::Other(s),
        }
    }
}

impl From<SprintStatus> for String {
    fn from(status: SprintStatus) -> Self {
        match status {
            SprintStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A time-boxed slice of a milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub status: SprintStatus,

    /// Start of the date window; tasks may not start before it
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// End of the date window; tasks may not end after it
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Owning milestone. Tasks placed in this sprint inherit it.
    pub milestone: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_name: Option<String>,

    #[serde(default)]
    pub progress: Option<f64>,

    #[serde(default, rename = "tasks_count")]
    pub task_count: Option<u32>,
}

impl Sprint {
    /// Whether both ends of the date window are known
    pub fn has_window(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }
}

/// Status of a milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    #[default]
    Planning,
    Active,
    Completed,
}

impl std::fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MilestoneStatus::Planning => write!(f, "planning"),
            MilestoneStatus::Active => write!(f, "active"),
            MilestoneStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for MilestoneStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(MilestoneStatus::Planning),
            "active" => Ok(MilestoneStatus::Active),
            "completed" => Ok(MilestoneStatus::Completed),
            _ => Err(format!("Unknown milestone status: {}", s)),
        }
    }
}

/// A named grouping of tasks within a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: MilestoneStatus,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub progress: Option<f64>,

    pub project: i64,
}

/// Body of a sprint create/update request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SprintInput {
    pub name: String,
    pub status: SprintStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    pub milestone: i64,
}

impl From<&Sprint> for SprintInput {
    fn from(sprint: &Sprint) -> Self {
        SprintInput {
            name: sprint.name.clone(),
            status: sprint.status.clone(),
            start_date: sprint.start_date,
            end_date: sprint.end_date,
            milestone: sprint.milestone,
        }
    }
}

/// Body of a milestone create/update request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneInput {
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    pub status: MilestoneStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    pub project: i64,
}

impl From<&Milestone> for MilestoneInput {
    fn from(milestone: &Milestone) -> Self {
        MilestoneInput {
            name: milestone.name.clone(),
            description: milestone.description.clone(),
            status: milestone.status,
            due_date: milestone.due_date,
            project: milestone.project,
        }
    }
}
