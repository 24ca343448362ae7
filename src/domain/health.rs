//! Derived project metrics: health status, health score, color bands
//!
//! Two color scales exist on purpose: the health widget bands the score,
//! the plain progress bar bands clamped raw progress with other thresholds.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::schemas::{Milestone, MilestoneStatus, Sprint, SprintStatus, Task, TaskStatus};

/// Overdue tasks above this count make a project critical
const CRITICAL_OVERDUE: i64 = 5;
const CRITICAL_PROGRESS: f64 = 30.0;
const ON_TRACK_PROGRESS: f64 = 70.0;
const OVERDUE_PENALTY: f64 = 5.0;
const MILESTONE_BONUS: f64 = 10.0;

/// Overall health of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    #[serde(rename = "Critical")]
    Critical,
    #[serde(rename = "At Risk")]
    AtRisk,
    #[serde(rename = "On Track")]
    OnTrack,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Critical => write!(f, "Critical"),
            HealthStatus::AtRisk => write!(f, "At Risk"),
            HealthStatus::OnTrack => write!(f, "On Track"),
        }
    }
}

/// Color band of a progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBand {
    Red,
    Yellow,
    Green,
}

impl std::fmt::Display for ColorBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorBand::Red => write!(f, "red"),
            ColorBand::Yellow => write!(f, "yellow"),
            ColorBand::Green => write!(f, "green"),
        }
    }
}

/// Output of [`compute_health`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Health {
    pub status: HealthStatus,
    /// 0..=100
    pub score: f64,
    /// Band of `score`
    pub band: ColorBand,
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

/// Clamp a progress percentage to [0, 100]. NaN counts as 0.
pub fn clamp_progress(progress: f64) -> f64 {
    non_negative(progress).min(100.0)
}

/// Compute project health from progress, overdue tasks and milestones.
///
/// Negative or NaN inputs count as 0. Critical is checked before At Risk.
pub fn compute_health(progress: f64, overdue: i64, milestones: i64) -> Health {
    let progress = non_negative(progress);
    let overdue = overdue.max(0);
    let milestones = milestones.max(0);

    let status = if overdue > CRITICAL_OVERDUE || progress < CRITICAL_PROGRESS {
        HealthStatus::Critical
    } else if overdue > 0 || progress < ON_TRACK_PROGRESS {
        HealthStatus::AtRisk
    } else {
        HealthStatus::OnTrack
    };

    let bonus = if milestones > 0 { MILESTONE_BONUS } else { 0.0 };
    let score = (progress - OVERDUE_PENALTY * overdue as f64 + bonus).clamp(0.0, 100.0);

    Health {
        status,
        score,
        band: health_band(score),
    }
}

/// Band for the health score: ≥70 green, ≥40 yellow, else red
pub fn health_band(score: f64) -> ColorBand {
    if score >= 70.0 {
        ColorBand::Green
    } else if score >= 40.0 {
        ColorBand::Yellow
    } else {
        ColorBand::Red
    }
}

/// Band for the plain progress bar: <40 red, <75 yellow, else green
pub fn progress_band(progress: f64) -> ColorBand {
    let progress = clamp_progress(progress);
    if progress < 40.0 {
        ColorBand::Red
    } else if progress < 75.0 {
        ColorBand::Yellow
    } else {
        ColorBand::Green
    }
}

/// Whether a task has passed its end date without being completed
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    task.status != TaskStatus::Completed && task.end_date.is_some_and(|end| end < today)
}

/// Number of overdue tasks as of `today`
pub fn count_overdue(tasks: &[Task], today: NaiveDate) -> usize {
    tasks.iter().filter(|t| is_overdue(t, today)).count()
}

/// Roll-up shown on a project's overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub total_milestones: usize,
    pub completed_milestones: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    pub active_sprint: Option<i64>,
    /// Assignee holding the most tasks and how many; lowest id wins ties
    pub top_workload: Option<(i64, usize)>,
}

impl ProjectSummary {
    pub fn from_records(
        milestones: &[Milestone],
        sprints: &[Sprint],
        tasks: &[Task],
        today: NaiveDate,
    ) -> Self {
        let mut workload: BTreeMap<i64, usize> = BTreeMap::new();
        for assignee in tasks.iter().filter_map(|t| t.assignee) {
            *workload.entry(assignee).or_default() += 1;
        }
        let top_workload = workload
            .into_iter()
            .fold(None, |best: Option<(i64, usize)>, (id, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((id, count)),
            });

        ProjectSummary {
            total_milestones: milestones.len(),
            completed_milestones: milestones
                .iter()
                .filter(|m| m.status == MilestoneStatus::Completed)
                .count(),
            total_tasks: tasks.len(),
            completed_tasks: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count(),
            overdue_tasks: count_overdue(tasks, today),
            active_sprint: sprints
                .iter()
                .find(|s| s.status == SprintStatus::Active)
                .map(|s| s.id),
            top_workload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::Priority;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_task(id: i64, status: TaskStatus, end: Option<NaiveDate>, assignee: Option<i64>) -> Task {
        Task {
            id,
            title: format!("Task {}", id),
            description: None,
            status,
            priority: Priority::Low,
            assignee,
            milestone: 1,
            sprint: None,
            start_date: None,
            end_date: end,
            estimated_hours: None,
        }
    }

    #[test]
    fn test_low_progress_is_critical() {
        let health = compute_health(25.0, 0, 0);
        assert_eq!(health.status, HealthStatus::Critical);
        assert_eq!(health.score, 25.0);
        assert_eq!(health.band, ColorBand::Red);
    }

    #[test]
    fn test_many_overdue_overrides_progress() {
        let health = compute_health(80.0, 6, 1);
        assert_eq!(health.status, HealthStatus::Critical);
        assert_eq!(health.score, 60.0);
        assert_eq!(health.band, ColorBand::Yellow);
    }

    #[test]
    fn test_mid_progress_is_at_risk() {
        let health = compute_health(50.0, 0, 1);
        assert_eq!(health.status, HealthStatus::AtRisk);
        assert_eq!(health.score, 60.0);
    }

    #[test]
    fn test_one_overdue_is_at_risk() {
        assert_eq!(compute_health(95.0, 1, 0).status, HealthStatus::AtRisk);
    }

    #[test]
    fn test_on_track_score_capped() {
        let health = compute_health(90.0, 0, 1);
        assert_eq!(health.status, HealthStatus::OnTrack);
        assert_eq!(health.score, 100.0);
        assert_eq!(health.band, ColorBand::Green);
    }

    #[test]
    fn test_negative_inputs_default_to_zero() {
        let health = compute_health(-20.0, -3, -1);
        assert_eq!(health.status, HealthStatus::Critical);
        assert_eq!(health.score, 0.0);

        assert_eq!(compute_health(f64::NAN, 0, 0).score, 0.0);
    }

    #[test]
    fn test_score_floor_is_zero() {
        assert_eq!(compute_health(10.0, 20, 0).score, 0.0);
    }

    #[test]
    fn test_health_status_display() {
        assert_eq!(HealthStatus::AtRisk.to_string(), "At Risk");
        assert_eq!(serde_json::to_string(&HealthStatus::OnTrack).unwrap(), "\"On Track\"");
    }

    #[test]
    fn test_health_band_thresholds() {
        assert_eq!(health_band(70.0), ColorBand::Green);
        assert_eq!(health_band(69.9), ColorBand::Yellow);
        assert_eq!(health_band(40.0), ColorBand::Yellow);
        assert_eq!(health_band(39.0), ColorBand::Red);
    }

    #[test]
    fn test_progress_band_thresholds() {
        assert_eq!(progress_band(39.0), ColorBand::Red);
        assert_eq!(progress_band(40.0), ColorBand::Yellow);
        assert_eq!(progress_band(74.0), ColorBand::Yellow);
        assert_eq!(progress_band(75.0), ColorBand::Green);
        assert_eq!(progress_band(250.0), ColorBand::Green);
        assert_eq!(progress_band(-1.0), ColorBand::Red);
    }

    #[test]
    fn test_bands_differ_for_same_value() {
        assert_eq!(health_band(72.0), ColorBand::Green);
        assert_eq!(progress_band(72.0), ColorBand::Yellow);
    }

    #[test]
    fn test_clamp_progress() {
        assert_eq!(clamp_progress(120.0), 100.0);
        assert_eq!(clamp_progress(-4.0), 0.0);
        assert_eq!(clamp_progress(33.3), 33.3);
    }

    #[test]
    fn test_count_overdue() {
        let today = date(2024, 6, 10);
        let tasks = vec![
            make_task(1, TaskStatus::InProgress, Some(date(2024, 6, 9)), None),
            make_task(2, TaskStatus::Completed, Some(date(2024, 6, 1)), None),
            make_task(3, TaskStatus::ToDo, Some(date(2024, 6, 10)), None),
            make_task(4, TaskStatus::ToDo, None, None),
        ];
        assert_eq!(count_overdue(&tasks, today), 1);
    }

    #[test]
    fn test_project_summary() {
        let today = date(2024, 6, 10);
        let milestones = vec![
            Milestone {
                id: 1,
                name: "M1".to_string(),
                description: String::new(),
                status: MilestoneStatus::Completed,
                due_date: None,
                progress: None,
                project: 1,
            },
            Milestone {
                id: 2,
                name: "M2".to_string(),
                description: String::new(),
                status: MilestoneStatus::Active,
                due_date: None,
                progress: None,
                project: 1,
            },
        ];
        let sprints = vec![Sprint {
            id: 8,
            name: "S".to_string(),
            status: SprintStatus::Active,
            start_date: None,
            end_date: None,
            milestone: 2,
            milestone_name: None,
            progress: None,
            task_count: None,
        }];
        let tasks = vec![
            make_task(1, TaskStatus::Completed, None, Some(5)),
            make_task(2, TaskStatus::ToDo, Some(date(2024, 6, 1)), Some(3)),
            make_task(3, TaskStatus::ToDo, None, Some(5)),
            make_task(4, TaskStatus::ToDo, None, Some(3)),
        ];

        let summary = ProjectSummary::from_records(&milestones, &sprints, &tasks, today);
        assert_eq!(summary.completed_milestones, 1);
        assert_eq!(summary.completed_tasks, 1);
        assert_eq!(summary.total_tasks, 4);
        assert_eq!(summary.overdue_tasks, 1);
        assert_eq!(summary.active_sprint, Some(8));
        assert_eq!(summary.top_workload, Some((3, 2)));
    }

    #[test]
    fn test_project_summary_empty() {
        let summary = ProjectSummary::from_records(&[], &[], &[], date(2024, 1, 1));
        assert_eq!(summary.top_workload, None);
        assert_eq!(summary.active_sprint, None);
    }
}
