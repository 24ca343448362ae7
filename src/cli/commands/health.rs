//! Project health report

use chrono::Local;
use serde_json::json;

use crate::api::TaskQuery;
use crate::cli::{print_json, Context};
use crate::domain::{compute_health, count_overdue, progress_band};
use crate::errors::Result;

pub async fn run(ctx: &Context, project_id: i64) -> Result<()> {
    let (api, _) = ctx.api()?;
    let query = TaskQuery {
        project: Some(project_id),
        ..Default::default()
    };
    let (project, milestones, tasks) = tokio::try_join!(
        api.get_project(project_id),
        api.list_milestones(project_id),
        api.list_tasks(&query),
    )?;

    let overdue = count_overdue(&tasks, Local::now().date_naive());
    let health = compute_health(project.progress, overdue as i64, milestones.len() as i64);

    if ctx.json {
        return print_json(&json!({
            "project": project.id,
            "progress": project.display_progress(),
            "overdue_tasks": overdue,
            "milestones": milestones.len(),
            "health": health,
        }));
    }

    println!("{}", project.name);
    println!(
        "Progress:   {:.0}% ({})",
        project.display_progress(),
        progress_band(project.progress)
    );
    println!("Overdue:    {}", overdue);
    println!("Milestones: {}", milestones.len());
    println!("Health:     {} (score {:.0}, {})", health.status, health.score, health.band);
    Ok(())
}
