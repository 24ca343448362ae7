//! Sprint listing, editing and deletion

use chrono::NaiveDate;

use crate::cli::{print_json, print_table, Context};
use crate::domain::{date_bounds, filter_sprints_by_milestone, ValidationError};
use crate::errors::{Result, SkhokhoError};
use crate::schemas::{Sprint, SprintInput, SprintStatus};
use crate::workflow::{delete_with_confirmation, ListView};

use super::clients::report_delete;

pub async fn list(ctx: &Context, project: i64, milestone: Option<i64>) -> Result<()> {
    let (api, _) = ctx.api()?;
    let sprints = api.list_sprints(project).await?;
    let shown = filter_sprints_by_milestone(&sprints, milestone);

    if ctx.json {
        return print_json(&shown);
    }

    let rows: Vec<Vec<String>> = shown
        .iter()
        .map(|&s| {
            let bounds = date_bounds(Some(s));
            vec![
                s.id.to_string(),
                s.name.clone(),
                s.status.to_string(),
                s.milestone_name.clone().unwrap_or_else(|| s.milestone.to_string()),
                format!("{} .. {}", bounds.min_str(), bounds.max_str()),
                s.task_count.map(|n| n.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "STATUS", "MILESTONE", "WINDOW", "TASKS"], &rows);
    Ok(())
}

pub async fn add(ctx: &Context, input: &SprintInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(ValidationError::Required("name").into());
    }
    let (api, _) = ctx.api()?;
    let sprint = api.create_sprint(input).await?;
    report_saved(ctx, "Created", &sprint)
}

/// Field overrides for `sprints edit`
#[derive(Debug, Clone, Default)]
pub struct SprintEdit {
    pub name: Option<String>,
    pub status: Option<SprintStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SprintEdit {
    fn merge(&self, sprint: &Sprint) -> SprintInput {
        let mut input = SprintInput::from(sprint);
        if let Some(name) = &self.name {
            input.name = name.clone();
        }
        if let Some(status) = &self.status {
            input.status = status.clone();
        }
        input.start_date = self.start_date.or(input.start_date);
        input.end_date = self.end_date.or(input.end_date);
        input
    }
}

pub async fn edit(ctx: &Context, id: i64, changes: &SprintEdit) -> Result<()> {
    let (api, _) = ctx.api()?;
    let current = api.get_sprint(id).await?;
    let input = changes.merge(&current);
    if input.name.trim().is_empty() {
        return Err(ValidationError::Required("name").into());
    }
    let sprint = api.update_sprint(id, &input).await?;
    report_saved(ctx, "Updated", &sprint)
}

fn report_saved(ctx: &Context, verb: &str, sprint: &Sprint) -> Result<()> {
    if ctx.json {
        return print_json(sprint);
    }
    let bounds = date_bounds(Some(sprint));
    println!(
        "{} sprint {} ({}), {} .. {}",
        verb,
        sprint.name,
        sprint.id,
        bounds.min_str(),
        bounds.max_str()
    );
    Ok(())
}

pub async fn delete(ctx: &Context, project: i64, id: i64) -> Result<()> {
    let (api, _) = ctx.api()?;
    let mut view = ListView::new(api.list_sprints(project).await?);
    let name = view
        .get(id)
        .map(|s| s.name.clone())
        .ok_or_else(|| SkhokhoError::NotFound(format!("sprint {}", id)))?;

    let prompt = format!("Delete sprint '{}'?", name);
    let confirm = ctx.confirmer();
    let outcome =
        delete_with_confirmation(&mut view, id, &prompt, confirm.as_ref(), |id| api.delete_sprint(id))
            .await?;

    report_delete(ctx, "sprint", id, outcome)
}
