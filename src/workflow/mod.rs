//! Side-effecting workflow steps
//!
//! Each step validates locally, sends at most one request per record, and
//! only touches the local list once the API has confirmed the change.

use std::future::Future;

use tracing::{debug, info};

use crate::api::ApiClient;
use crate::domain::{
    advance, apply_status_change, validate_task_update, ClientDraft, ProjectDraft, StatusChange,
    TaskDraft, TransitionResult,
};
use crate::errors::{Result, SkhokhoError};
use crate::schemas::{Client, Member, Milestone, Project, Sprint, Task, TaskStatus, TaskUpdate};

/// Anything listed by id
pub trait Record {
    fn id(&self) -> i64;
}

macro_rules! impl_record {
    ($($ty:ty),*) => {
        $(impl Record for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

impl_record!(Client, Project, Milestone, Sprint, Task, Member);

/// Asks the user before a destructive action
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Fixed answer, for `--yes` and tests
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Transient local copy of a list fetched from the API
#[derive(Debug, Clone, Default)]
pub struct ListView<T> {
    items: Vec<T>,
}

impl<T: Record> ListView<T> {
    pub fn new(items: Vec<T>) -> Self {
        ListView { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove the item with `id`, keeping the order of the rest
    pub fn remove(&mut self, id: i64) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Swap in a new version of an item. Returns false if it isn't listed.
    pub fn replace(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }
}

/// What happened to a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// Delete one listed record after asking the user.
///
/// Declined: nothing is sent and the list is unchanged. Confirmed: exactly
/// one request; the item leaves the list only if that request succeeds.
pub async fn delete_with_confirmation<T, F, Fut>(
    view: &mut ListView<T>,
    id: i64,
    prompt: &str,
    confirm: &dyn Confirm,
    delete: F,
) -> Result<DeleteOutcome>
where
    T: Record,
    F: FnOnce(i64) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    if view.get(id).is_none() {
        return Err(SkhokhoError::NotFound(format!("record {}", id)));
    }

    if !confirm.confirm(prompt) {
        debug!(id, "Delete cancelled");
        return Ok(DeleteOutcome::Cancelled);
    }

    delete(id).await?;
    view.remove(id);
    info!(id, "Deleted");
    Ok(DeleteOutcome::Deleted)
}

/// Result of trying to move a task forward
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    Advanced(StatusChange),

    /// Terminal or unrecognized status; no request was sent
    NoTransition(TaskStatus),
}

/// Move a listed task one step along the workflow.
///
/// Sends one status update. The local copy is replaced only after the API
/// accepts it; on failure the list still shows the old status.
pub async fn advance_task(api: &ApiClient, view: &mut ListView<Task>, id: i64) -> Result<AdvanceOutcome> {
    let task = view
        .get(id)
        .ok_or_else(|| SkhokhoError::NotFound(format!("task {}", id)))?;

    let Some(change) = advance(task) else {
        debug!(id, status = %task.status, "No transition available");
        return Ok(AdvanceOutcome::NoTransition(task.status.clone()));
    };

    let updated = api.update_task_status(id, &change.to).await?;

    let current = view
        .get(id)
        .ok_or_else(|| SkhokhoError::NotFound(format!("task {}", id)))?;
    match apply_status_change(current, &change) {
        TransitionResult::Success { next_task } => {
            // Prefer the server's copy when it agrees on the new status
            let next = if updated.id == id && updated.status == change.to {
                updated
            } else {
                next_task
            };
            view.replace(next);
        }
        TransitionResult::Error { error } => {
            return Err(SkhokhoError::wrap(error, format!("task {}", id)));
        }
    }

    info!(id, from = %change.from, to = %change.to, "Task advanced");
    Ok(AdvanceOutcome::Advanced(change))
}

/// Validate a task form and create it. Nothing is sent when validation fails.
pub async fn submit_task(api: &ApiClient, sprints: &[Sprint], draft: &TaskDraft) -> Result<Task> {
    let new_task = draft.validate(sprints)?;
    api.create_task(&new_task).await
}

/// Validate a client form and create it. Nothing is sent when validation fails.
pub async fn submit_client(api: &ApiClient, draft: &ClientDraft) -> Result<Client> {
    let input = draft.validate()?;
    api.create_client(&input).await
}

/// Validate a client form and overwrite client `id` with it
pub async fn update_client(api: &ApiClient, id: i64, draft: &ClientDraft) -> Result<Client> {
    let input = draft.validate()?;
    api.update_client(id, &input).await
}

/// Validate a project form and create it. Nothing is sent when validation fails.
pub async fn submit_project(api: &ApiClient, draft: &ProjectDraft) -> Result<Project> {
    let input = draft.validate()?;
    api.create_project(&input).await
}

/// Validate a project form and overwrite project `id` with it
pub async fn update_project(api: &ApiClient, id: i64, draft: &ProjectDraft) -> Result<Project> {
    let input = draft.validate()?;
    api.update_project(id, &input).await
}

/// Apply a partial edit to a listed task.
///
/// The edit is checked against the task's current dates and its sprint's
/// window before anything is sent. The list gets the server's copy.
pub async fn edit_task(
    api: &ApiClient,
    view: &mut ListView<Task>,
    sprints: &[Sprint],
    id: i64,
    update: &TaskUpdate,
) -> Result<Task> {
    let task = view
        .get(id)
        .ok_or_else(|| SkhokhoError::NotFound(format!("task {}", id)))?;
    let sprint = task.sprint.and_then(|sid| sprints.iter().find(|s| s.id == sid));
    validate_task_update(task, update, sprint)?;

    let updated = api.update_task(id, update).await?;
    view.replace(updated.clone());
    info!(id, "Task updated");
    Ok(updated)
}

/// Reference data for one project's board
#[derive(Debug, Clone, Default)]
pub struct Board {
    pub milestones: Vec<Milestone>,
    pub sprints: Vec<Sprint>,
    pub members: Vec<Member>,
}

impl Board {
    pub fn sprint(&self, id: i64) -> Option<&Sprint> {
        self.sprints.iter().find(|s| s.id == id)
    }
}

/// Fetch milestones, sprints and members concurrently. All three must succeed.
pub async fn load_board(api: &ApiClient, project_id: i64) -> Result<Board> {
    let (milestones, sprints, members) = tokio::try_join!(
        api.list_milestones(project_id),
        api.list_sprints(project_id),
        api.list_members(),
    )?;
    debug!(
        project_id,
        milestones = milestones.len(),
        sprints = sprints.len(),
        members = members.len(),
        "Board loaded"
    );
    Ok(Board {
        milestones,
        sprints,
        members,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{Config, Priority};
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> ApiClient {
        let config = Config {
            api_base: format!("{}/api", server.uri()),
            ..Default::default()
        };
        ApiClient::new(&config).unwrap().with_token("tok".to_string())
    }

    fn make_task(id: i64, status: TaskStatus) -> Task {
        Task {
            id,
            title: format!("Task {}", id),
            description: None,
            status,
            priority: Priority::Medium,
            assignee: None,
            milestone: 1,
            sprint: Some(2),
            start_date: None,
            end_date: None,
            estimated_hours: None,
        }
    }

    fn make_sprint() -> Sprint {
        Sprint {
            id: 2,
            name: "Sprint 2".to_string(),
            status: Default::default(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 14),
            milestone: 1,
            milestone_name: None,
            progress: None,
            task_count: None,
        }
    }

    #[test]
    fn test_list_view_replace_and_remove() {
        let mut view = ListView::new(vec![
            make_task(1, TaskStatus::ToDo),
            make_task(2, TaskStatus::ToDo),
            make_task(3, TaskStatus::ToDo),
        ]);

        assert!(view.replace(make_task(2, TaskStatus::Done)));
        assert_eq!(view.get(2).unwrap().status, TaskStatus::Done);
        assert!(!view.replace(make_task(9, TaskStatus::Done)));

        assert_eq!(view.remove(2).unwrap().id, 2);
        let ids: Vec<i64> = view.items().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(view.remove(2).is_none());
    }

    #[tokio::test]
    async fn test_delete_declined_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let api = api_for(&server);
        let mut view = ListView::new(vec![make_task(1, TaskStatus::ToDo)]);
        let outcome = delete_with_confirmation(&mut view, 1, "Delete?", &AutoConfirm(false), |id| {
            api.delete_task(id)
        })
        .await
        .unwrap();

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(view.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_confirmed_sends_once_and_removes_one() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/tasks/2/"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server);
        let mut view = ListView::new(vec![make_task(1, TaskStatus::ToDo), make_task(2, TaskStatus::Done)]);
        let outcome = delete_with_confirmation(&mut view, 2, "Delete?", &AutoConfirm(true), |id| {
            api.delete_task(id)
        })
        .await
        .unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(view.len(), 1);
        assert!(view.get(2).is_none());
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_list() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/tasks/1/"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server);
        let mut view = ListView::new(vec![make_task(1, TaskStatus::ToDo)]);
        let err = delete_with_confirmation(&mut view, 1, "Delete?", &AutoConfirm(true), |id| {
            api.delete_task(id)
        })
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "boom");
        assert_eq!(view.len(), 1);
    }

    #[tokio::test]
    async fn test_advance_task_replaces_after_success() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/tasks/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "title": "Task 1", "status": "in_progress", "milestone": 1, "sprint": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server);
        let mut view = ListView::new(vec![make_task(1, TaskStatus::ToDo)]);
        let outcome = advance_task(&api, &mut view, 1).await.unwrap();

        assert!(matches!(outcome, AdvanceOutcome::Advanced(ref c) if c.to == TaskStatus::InProgress));
        assert_eq!(view.get(1).unwrap().status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn test_advance_task_failure_keeps_old_status() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"status": ["Invalid choice."]})))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let mut view = ListView::new(vec![make_task(1, TaskStatus::InReview)]);
        let err = advance_task(&api, &mut view, 1).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid choice.");
        assert_eq!(view.get(1).unwrap().status, TaskStatus::InReview);
    }

    #[tokio::test]
    async fn test_advance_terminal_task_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = api_for(&server);
        let mut view = ListView::new(vec![make_task(1, TaskStatus::Completed)]);
        let outcome = advance_task(&api, &mut view, 1).await.unwrap();

        assert_eq!(outcome, AdvanceOutcome::NoTransition(TaskStatus::Completed));
    }

    #[tokio::test]
    async fn test_submit_task_out_of_window_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let api = api_for(&server);
        let draft = TaskDraft {
            title: "Late".to_string(),
            sprint: Some(2),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 20),
            ..Default::default()
        };
        let err = submit_task(&api, &[make_sprint()], &draft).await.unwrap_err();
        assert_eq!(err.code(), "DATE_OUT_OF_RANGE");
    }

    #[tokio::test]
    async fn test_load_board_fetches_all_three() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/milestones/"))
            .and(query_param("project", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "M1", "status": "active", "project": 7}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/sprints/"))
            .and(query_param("project", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 2, "name": "S2", "status": "active", "milestone": 1,
                 "start_date": "2024-03-01", "end_date": "2024-03-14"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/members/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let board = load_board(&api_for(&server), 7).await.unwrap();
        assert_eq!(board.milestones.len(), 1);
        assert!(board.sprint(2).unwrap().has_window());
        assert!(board.members.is_empty());
    }

    #[tokio::test]
    async fn test_load_board_fails_if_any_fetch_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/milestones/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/sprints/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/members/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = load_board(&api_for(&server), 7).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch sprints");
    }

    #[tokio::test]
    async fn test_edit_task_replaces_with_server_copy() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/tasks/1/"))
            .and(body_json(json!({"assignee": 4, "estimated_hours": 3.5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "title": "Task 1", "status": "to_do", "milestone": 1, "sprint": 2,
                "assignee": 4, "estimated_hours": 3.5
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server);
        let mut view = ListView::new(vec![make_task(1, TaskStatus::ToDo)]);
        let update = TaskUpdate {
            assignee: Some(4),
            estimated_hours: Some(3.5),
            ..Default::default()
        };
        edit_task(&api, &mut view, &[make_sprint()], 1, &update).await.unwrap();

        let task = view.get(1).unwrap();
        assert_eq!(task.assignee, Some(4));
        assert_eq!(task.estimated_hours, Some(3.5));
    }

    #[tokio::test]
    async fn test_edit_task_out_of_window_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = api_for(&server);
        let mut view = ListView::new(vec![make_task(1, TaskStatus::ToDo)]);
        let update = TaskUpdate {
            start_date: NaiveDate::from_ymd_opt(2024, 2, 20),
            ..Default::default()
        };
        let err = edit_task(&api, &mut view, &[make_sprint()], 1, &update)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "DATE_OUT_OF_RANGE");
        assert_eq!(view.get(1).unwrap().start_date, None);
    }

    #[tokio::test]
    async fn test_submit_project_with_bad_budget_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let draft = ProjectDraft {
            name: "Website".to_string(),
            client: 2,
            budget: Some("lots".to_string()),
            ..Default::default()
        };
        let err = submit_project(&api_for(&server), &draft).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_BUDGET");
    }

    #[tokio::test]
    async fn test_update_project_puts_validated_form() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/projects/7/"))
            .and(body_json(json!({
                "name": "Website", "client": 2, "status": "on_hold", "priority": "high"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7, "name": "Website", "client": 2, "status": "on_hold",
                "priority": "high", "progress": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let draft = ProjectDraft {
            name: "Website".to_string(),
            client: 2,
            status: crate::schemas::ProjectStatus::OnHold,
            priority: Priority::High,
            ..Default::default()
        };
        let project = update_project(&api_for(&server), 7, &draft).await.unwrap();
        assert_eq!(project.progress, 0.0);
    }

    #[tokio::test]
    async fn test_update_client_invalid_email_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let draft = ClientDraft {
            name: "Acme".to_string(),
            email: "acme".to_string(),
            ..Default::default()
        };
        let err = update_client(&api_for(&server), 3, &draft).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_EMAIL");
    }
}
