//! Task listing, creation, editing, advancing and deletion

use serde_json::json;

use crate::api::{ApiClient, TaskQuery};
use crate::cli::{print_json, print_table, Context};
use crate::domain::{transition_label, TaskDraft};
use crate::errors::{Result, SkhokhoError};
use crate::schemas::{Task, TaskUpdate};
use crate::workflow::{
    advance_task, delete_with_confirmation, edit_task, submit_task, AdvanceOutcome, ListView,
};

use super::clients::report_delete;

pub async fn list(ctx: &Context, project: Option<i64>, sprint: Option<i64>) -> Result<()> {
    let (api, _) = ctx.api()?;
    let tasks = api
        .list_tasks(&TaskQuery {
            project,
            sprint,
            ..Default::default()
        })
        .await?;

    if ctx.json {
        return print_json(&tasks);
    }

    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.title.clone(),
                t.status.display_name().to_string(),
                t.priority.to_string(),
                t.assignee.map(|a| a.to_string()).unwrap_or_default(),
                t.end_date.map(|d| d.to_string()).unwrap_or_default(),
                transition_label(&t.status).unwrap_or("").to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "TITLE", "STATUS", "PRIORITY", "ASSIGNEE", "DUE", "NEXT"], &rows);
    Ok(())
}

/// Validate against the project's sprints, then create
pub async fn add(ctx: &Context, project: i64, draft: &TaskDraft) -> Result<()> {
    let (api, _) = ctx.api()?;
    let sprints = api.list_sprints(project).await?;
    let task = submit_task(&api, &sprints, draft).await?;

    if ctx.json {
        return print_json(&task);
    }
    println!("Created task {} ({}) in {}", task.title, task.id, task.status.display_name());
    Ok(())
}

async fn sprint_tasks(api: &ApiClient, sprint: i64) -> Result<ListView<Task>> {
    let tasks = api
        .list_tasks(&TaskQuery {
            sprint: Some(sprint),
            ..Default::default()
        })
        .await?;
    Ok(ListView::new(tasks))
}

/// Send only the given fields, checked against the sprint's window
pub async fn edit(ctx: &Context, sprint: i64, id: i64, update: &TaskUpdate) -> Result<()> {
    let (api, _) = ctx.api()?;
    let (mut view, sprint) = tokio::try_join!(sprint_tasks(&api, sprint), api.get_sprint(sprint))?;
    let task = edit_task(&api, &mut view, std::slice::from_ref(&sprint), id, update).await?;

    if ctx.json {
        return print_json(&task);
    }
    println!("Updated task {} ({})", task.title, task.id);
    Ok(())
}

pub async fn advance(ctx: &Context, sprint: i64, id: i64) -> Result<()> {
    let (api, _) = ctx.api()?;
    let mut view = sprint_tasks(&api, sprint).await?;
    let outcome = advance_task(&api, &mut view, id).await?;

    match outcome {
        AdvanceOutcome::Advanced(change) => {
            if ctx.json {
                return print_json(&json!({
                    "id": id,
                    "from": change.from,
                    "to": change.to,
                }));
            }
            println!(
                "{}: {} -> {}",
                change.label(),
                change.from.display_name(),
                change.to.display_name()
            );
        }
        AdvanceOutcome::NoTransition(status) => {
            if ctx.json {
                return print_json(&json!({ "id": id, "from": status, "to": null }));
            }
            println!("Task {} is {}; nothing to advance", id, status.display_name());
        }
    }
    Ok(())
}

pub async fn delete(ctx: &Context, sprint: i64, id: i64) -> Result<()> {
    let (api, _) = ctx.api()?;
    let mut view = sprint_tasks(&api, sprint).await?;
    let title = view
        .get(id)
        .map(|t| t.title.clone())
        .ok_or_else(|| SkhokhoError::NotFound(format!("task {}", id)))?;

    let prompt = format!("Delete task '{}'?", title);
    let confirm = ctx.confirmer();
    let outcome =
        delete_with_confirmation(&mut view, id, &prompt, confirm.as_ref(), |id| api.delete_task(id))
            .await?;

    report_delete(ctx, "task", id, outcome)
}
