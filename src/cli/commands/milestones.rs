//! Milestone listing, editing and deletion

use chrono::NaiveDate;

use crate::cli::{print_json, print_table, Context};
use crate::domain::ValidationError;
use crate::errors::{Result, SkhokhoError};
use crate::schemas::{Milestone, MilestoneInput, MilestoneStatus};
use crate::workflow::{delete_with_confirmation, ListView};

use super::clients::report_delete;

pub async fn list(ctx: &Context, project: i64) -> Result<()> {
    let (api, _) = ctx.api()?;
    let milestones = api.list_milestones(project).await?;

    if ctx.json {
        return print_json(&milestones);
    }

    let rows: Vec<Vec<String>> = milestones
        .iter()
        .map(|m| {
            vec![
                m.id.to_string(),
                m.name.clone(),
                m.status.to_string(),
                m.due_date.map(|d| d.to_string()).unwrap_or_default(),
                m.progress.map(|p| format!("{:.0}%", p)).unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "STATUS", "DUE", "PROGRESS"], &rows);
    Ok(())
}

pub async fn add(ctx: &Context, input: &MilestoneInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(ValidationError::Required("name").into());
    }
    let (api, _) = ctx.api()?;
    let milestone = api.create_milestone(input).await?;
    report_saved(ctx, "Created", &milestone)
}

/// Field overrides for `milestones edit`
#[derive(Debug, Clone, Default)]
pub struct MilestoneEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<MilestoneStatus>,
    pub due_date: Option<NaiveDate>,
}

impl MilestoneEdit {
    fn merge(&self, milestone: &Milestone) -> MilestoneInput {
        let mut input = MilestoneInput::from(milestone);
        if let Some(name) = &self.name {
            input.name = name.clone();
        }
        if let Some(description) = &self.description {
            input.description = description.clone();
        }
        input.status = self.status.unwrap_or(input.status);
        input.due_date = self.due_date.or(input.due_date);
        input
    }
}

pub async fn edit(ctx: &Context, project: i64, id: i64, changes: &MilestoneEdit) -> Result<()> {
    let (api, _) = ctx.api()?;
    let view = ListView::new(api.list_milestones(project).await?);
    let current = view
        .get(id)
        .ok_or_else(|| SkhokhoError::NotFound(format!("milestone {}", id)))?;
    let input = changes.merge(current);
    if input.name.trim().is_empty() {
        return Err(ValidationError::Required("name").into());
    }
    let milestone = api.update_milestone(id, &input).await?;
    report_saved(ctx, "Updated", &milestone)
}

fn report_saved(ctx: &Context, verb: &str, milestone: &Milestone) -> Result<()> {
    if ctx.json {
        return print_json(milestone);
    }
    println!("{} milestone {} ({})", verb, milestone.name, milestone.id);
    Ok(())
}

pub async fn delete(ctx: &Context, project: i64, id: i64) -> Result<()> {
    let (api, _) = ctx.api()?;
    let mut view = ListView::new(api.list_milestones(project).await?);
    let name = view
        .get(id)
        .map(|m| m.name.clone())
        .ok_or_else(|| SkhokhoError::NotFound(format!("milestone {}", id)))?;

    let prompt = format!("Delete milestone '{}' with its sprints and tasks?", name);
    let confirm = ctx.confirmer();
    let outcome = delete_with_confirmation(&mut view, id, &prompt, confirm.as_ref(), |id| {
        api.delete_milestone(id)
    })
    .await?;

    report_delete(ctx, "milestone", id, outcome)
}
