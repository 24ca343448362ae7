//! Client list, creation, editing and deletion

use chrono::Utc;
use serde_json::json;

use crate::cli::{print_json, print_table, Context};
use crate::domain::{filter_clients, paginate, ClientDraft, ClientFilter, ClientMetrics};
use crate::errors::{Result, SkhokhoError};
use crate::schemas::{Client, ClientStatus};
use crate::workflow::{
    delete_with_confirmation, submit_client, update_client, DeleteOutcome, ListView,
};

/// List clients after filtering, one page at a time
pub async fn list(ctx: &Context, filter: &ClientFilter, page: usize) -> Result<()> {
    let (api, _) = ctx.api()?;
    let clients = api.list_clients().await?;
    let metrics = ClientMetrics::from_clients(&clients);

    let matching: Vec<Client> = filter_clients(&clients, filter, Utc::now())
        .into_iter()
        .cloned()
        .collect();
    let page = paginate(&matching, page, ctx.config.page_size);

    if ctx.json {
        return print_json(&json!({ "metrics": metrics, "page": page }));
    }

    println!(
        "{} clients ({} active, {} prospect, {} inactive)",
        metrics.total, metrics.active, metrics.prospect, metrics.inactive
    );
    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                c.email.clone(),
                c.phone.clone().unwrap_or_default(),
                c.status.to_string(),
                c.projects_count.to_string(),
                c.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "EMAIL", "PHONE", "STATUS", "PROJECTS", "CREATED"], &rows);
    println!("Page {} of {}", page.page, page.total_pages.max(1));
    Ok(())
}

pub async fn add(
    ctx: &Context,
    name: &str,
    email: &str,
    phone: Option<&str>,
    status: ClientStatus,
) -> Result<()> {
    let (api, _) = ctx.api()?;
    let draft = ClientDraft {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.map(str::to_string),
        status,
        tenant: None,
    };
    let client = submit_client(&api, &draft).await?;

    if ctx.json {
        return print_json(&client);
    }
    println!("Created client {} ({})", client.name, client.id);
    Ok(())
}

/// Field overrides for `clients edit`
#[derive(Debug, Clone, Default)]
pub struct ClientEdit {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<ClientStatus>,
}

impl ClientEdit {
    /// The stored client with the given fields replaced
    fn merge(&self, client: &Client) -> ClientDraft {
        ClientDraft {
            name: self.name.clone().unwrap_or_else(|| client.name.clone()),
            email: self.email.clone().unwrap_or_else(|| client.email.clone()),
            phone: self.phone.clone().or_else(|| client.phone.clone()),
            status: self.status.unwrap_or(client.status),
            tenant: None,
        }
    }
}

pub async fn edit(ctx: &Context, id: i64, changes: &ClientEdit) -> Result<()> {
    let (api, _) = ctx.api()?;
    let view = ListView::new(api.list_clients().await?);
    let current = view
        .get(id)
        .ok_or_else(|| SkhokhoError::NotFound(format!("client {}", id)))?;
    let client = update_client(&api, id, &changes.merge(current)).await?;

    if ctx.json {
        return print_json(&client);
    }
    println!("Updated client {} ({})", client.name, client.id);
    Ok(())
}

pub async fn delete(ctx: &Context, id: i64) -> Result<()> {
    let (api, _) = ctx.api()?;
    let mut view = ListView::new(api.list_clients().await?);
    let name = view
        .get(id)
        .map(|c| c.name.clone())
        .ok_or_else(|| SkhokhoError::NotFound(format!("client {}", id)))?;

    let prompt = format!("Delete client '{}'? This cannot be undone.", name);
    let confirm = ctx.confirmer();
    let outcome =
        delete_with_confirmation(&mut view, id, &prompt, confirm.as_ref(), |id| api.delete_client(id))
            .await?;

    report_delete(ctx, "client", id, outcome)
}

/// Shared output for delete commands
pub(crate) fn report_delete(ctx: &Context, kind: &str, id: i64, outcome: DeleteOutcome) -> Result<()> {
    let deleted = outcome == DeleteOutcome::Deleted;
    if ctx.json {
        return print_json(&json!({ "kind": kind, "id": id, "deleted": deleted }));
    }
    if deleted {
        println!("Deleted {} {}", kind, id);
    } else {
        println!("Cancelled");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client() -> Client {
        serde_json::from_value(json!({
            "id": 3, "name": "Acme", "email": "ops@acme.test", "phone": "555-0100",
            "status": "prospect", "created_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_edit_keeps_unset_fields() {
        let changes = ClientEdit {
            status: Some(ClientStatus::Active),
            ..Default::default()
        };
        let draft = changes.merge(&make_client());
        assert_eq!(draft.name, "Acme");
        assert_eq!(draft.phone.as_deref(), Some("555-0100"));
        assert_eq!(draft.status, ClientStatus::Active);
    }

    #[test]
    fn test_edit_can_clear_phone() {
        let changes = ClientEdit {
            phone: Some(String::new()),
            ..Default::default()
        };
        let input = changes.merge(&make_client()).validate().unwrap();
        assert!(input.phone.is_none());
    }
}
