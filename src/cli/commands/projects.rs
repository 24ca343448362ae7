//! Project list, detail, editing and deletion

use chrono::{Local, NaiveDate};
use serde_json::json;

use crate::api::TaskQuery;
use crate::cli::{print_json, print_table, Context};
use crate::domain::{compute_health, progress_band, ProjectDraft, ProjectSummary};
use crate::errors::{Result, SkhokhoError};
use crate::schemas::{Priority, Project, ProjectStatus};
use crate::workflow::{delete_with_confirmation, load_board, submit_project, update_project, ListView};

use super::clients::report_delete;

pub async fn list(ctx: &Context) -> Result<()> {
    let (api, _) = ctx.api()?;
    let projects = api.list_projects().await?;

    if ctx.json {
        return print_json(&projects);
    }

    let rows: Vec<Vec<String>> = projects
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.client_name.clone(),
                p.status.to_string(),
                p.priority.to_string(),
                format!("{:.0}% ({})", p.display_progress(), progress_band(p.progress)),
                p.end_date.map(|d| d.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "CLIENT", "STATUS", "PRIORITY", "PROGRESS", "DUE"], &rows);
    Ok(())
}

/// Project detail: milestones, sprints and the summary roll-up
pub async fn show(ctx: &Context, id: i64) -> Result<()> {
    let (api, _) = ctx.api()?;
    let query = TaskQuery {
        project: Some(id),
        ..Default::default()
    };
    let (project, board, tasks) =
        tokio::try_join!(api.get_project(id), load_board(&api, id), api.list_tasks(&query))?;

    let today = Local::now().date_naive();
    let summary = ProjectSummary::from_records(&board.milestones, &board.sprints, &tasks, today);
    let health = compute_health(
        project.progress,
        summary.overdue_tasks as i64,
        board.milestones.len() as i64,
    );

    if ctx.json {
        return print_json(&json!({
            "project": project,
            "milestones": board.milestones,
            "sprints": board.sprints,
            "summary": summary,
            "health": health,
        }));
    }

    println!("{} ({})", project.name, project.status);
    println!("Client:   {}", project.client_name);
    println!("Progress: {:.0}%", project.display_progress());
    println!("Health:   {} ({:.0})", health.status, health.score);
    println!(
        "Tasks:    {} total, {} completed, {} overdue",
        summary.total_tasks, summary.completed_tasks, summary.overdue_tasks
    );
    println!();

    let rows: Vec<Vec<String>> = board
        .milestones
        .iter()
        .map(|m| {
            let sprints = board.sprints.iter().filter(|s| s.milestone == m.id).count();
            vec![
                m.id.to_string(),
                m.name.clone(),
                m.status.to_string(),
                m.due_date.map(|d| d.to_string()).unwrap_or_default(),
                sprints.to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "MILESTONE", "STATUS", "DUE", "SPRINTS"], &rows);
    Ok(())
}

pub async fn add(ctx: &Context, draft: &ProjectDraft) -> Result<()> {
    let (api, _) = ctx.api()?;
    let project = submit_project(&api, draft).await?;

    if ctx.json {
        return print_json(&project);
    }
    println!("Created project {} ({})", project.name, project.id);
    Ok(())
}

/// Field overrides for `projects edit`
#[derive(Debug, Clone, Default)]
pub struct ProjectEdit {
    pub name: Option<String>,
    pub client: Option<i64>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<String>,
}

impl ProjectEdit {
    fn merge(&self, project: &Project) -> ProjectDraft {
        ProjectDraft {
            name: self.name.clone().unwrap_or_else(|| project.name.clone()),
            client: self.client.unwrap_or(project.client),
            status: self.status.clone().unwrap_or_else(|| project.status.clone()),
            priority: self.priority.unwrap_or(project.priority),
            start_date: self.start_date.or(project.start_date),
            end_date: self.end_date.or(project.end_date),
            budget: self.budget.clone().or_else(|| project.budget.clone()),
            team_members: project.team_members.clone(),
        }
    }
}

pub async fn edit(ctx: &Context, id: i64, changes: &ProjectEdit) -> Result<()> {
    let (api, _) = ctx.api()?;
    let current = api.get_project(id).await?;
    let project = update_project(&api, id, &changes.merge(&current)).await?;

    if ctx.json {
        return print_json(&project);
    }
    println!("Updated project {} ({})", project.name, project.id);
    Ok(())
}

pub async fn delete(ctx: &Context, id: i64) -> Result<()> {
    let (api, _) = ctx.api()?;
    let mut view = ListView::new(api.list_projects().await?);
    let name = view
        .get(id)
        .map(|p| p.name.clone())
        .ok_or_else(|| SkhokhoError::NotFound(format!("project {}", id)))?;

    let prompt = format!("Delete project '{}' with its milestones, sprints and tasks?", name);
    let confirm = ctx.confirmer();
    let outcome =
        delete_with_confirmation(&mut view, id, &prompt, confirm.as_ref(), |id| api.delete_project(id))
            .await?;

    report_delete(ctx, "project", id, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_merges_onto_stored_project() {
        let project: Project = serde_json::from_value(json!({
            "id": 7, "name": "Website", "client": 2, "status": "active",
            "priority": "low", "start_date": "2024-01-01", "end_date": "2024-06-30",
            "budget": "12500.00", "team_members": [4]
        }))
        .unwrap();

        let changes = ProjectEdit {
            end_date: NaiveDate::from_ymd_opt(2024, 9, 30),
            status: Some(ProjectStatus::OnHold),
            ..Default::default()
        };
        let input = changes.merge(&project).validate().unwrap();
        assert_eq!(input.name, "Website");
        assert_eq!(input.priority, Priority::Low);
        assert_eq!(input.status, ProjectStatus::OnHold);
        assert_eq!(input.end_date, NaiveDate::from_ymd_opt(2024, 9, 30));
        assert_eq!(input.budget.as_deref(), Some("12500.00"));
        assert_eq!(input.team_members, vec![4]);
    }
}
