//! HTTP client for the Skhokho API
//!
//! One method per endpoint. Requests are sent once: no retries, no
//! de-duplication. Every failure comes back as a [`SkhokhoError`] whose
//! message is fit to show the user.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::{Result, SkhokhoError};
use crate::schemas::{
    AuthResponse, Client, ClientInput, Config, LoginRequest, Member, Milestone, MilestoneInput,
    NewTask, Project, ProjectInput, SignupRequest, Sprint, SprintInput, Task, TaskStatus,
    TaskStatusUpdate, TaskUpdate,
};
use crate::session::Session;

use super::errors::error_message;

/// Filters for listing tasks
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TaskQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<i64>,
}

#[derive(Serialize)]
struct ProjectQuery {
    project: i64,
}

/// API client, optionally carrying an auth token
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Unauthenticated client for `config.api_base`
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SkhokhoError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(ApiClient {
            http,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Client authenticated with the session's token
    pub fn with_session(config: &Config, session: &Session) -> Result<Self> {
        Ok(Self::new(config)?.with_token(session.token.clone()))
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn public(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.token.as_deref().ok_or_else(|| {
            SkhokhoError::NotAuthenticated("no active session; run `skhokho login`".to_string())
        })?;
        Ok(self
            .public(method, path)
            .header("Authorization", format!("Token {}", token)))
    }

    async fn execute(&self, request: RequestBuilder, fallback: &str) -> Result<Response> {
        let request = request.build()?;
        debug!(method = %request.method(), url = %request.url(), "API request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        debug!(status = status.as_u16(), "API response");

        if status.is_success() {
            return Ok(response);
        }

        let body: serde_json::Value = response.json().await.unwrap_or(serde_json::Value::Null);
        let message = error_message(&body).unwrap_or_else(|| fallback.to_string());
        warn!(status = status.as_u16(), %message, "API request failed");

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(SkhokhoError::NotAuthenticated(message))
            }
            _ => Err(SkhokhoError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, fallback: &str) -> Result<T> {
        let response = self.execute(request, fallback).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| SkhokhoError::InvalidJson(format!("{}: {}", fallback, e)))
    }

    async fn send_empty(&self, request: RequestBuilder, fallback: &str) -> Result<()> {
        self.execute(request, fallback).await.map(|_| ())
    }

    // ===== AUTH =====

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send_json(self.public(Method::POST, "login/").json(&body), "Login failed")
            .await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse> {
        self.send_json(self.public(Method::POST, "signup/").json(request), "Signup failed")
            .await
    }

    /// Members of the current tenant, i.e. assignable users
    pub async fn list_members(&self) -> Result<Vec<Member>> {
        self.send_json(self.authed(Method::GET, "members/")?, "Failed to fetch members")
            .await
    }

    // ===== CLIENTS =====

    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        self.send_json(self.authed(Method::GET, "clients/")?, "Failed to fetch clients")
            .await
    }

    pub async fn create_client(&self, input: &ClientInput) -> Result<Client> {
        self.send_json(
            self.authed(Method::POST, "clients/")?.json(input),
            "Failed to create client",
        )
        .await
    }

    pub async fn update_client(&self, id: i64, input: &ClientInput) -> Result<Client> {
        self.send_json(
            self.authed(Method::PUT, &format!("clients/{}/", id))?.json(input),
            "Failed to update client",
        )
        .await
    }

    pub async fn delete_client(&self, id: i64) -> Result<()> {
        self.send_empty(
            self.authed(Method::DELETE, &format!("clients/{}/", id))?,
            "Failed to delete client",
        )
        .await
    }

    // ===== PROJECTS =====

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.send_json(self.authed(Method::GET, "projects/")?, "Failed to fetch projects")
            .await
    }

    pub async fn get_project(&self, id: i64) -> Result<Project> {
        self.send_json(
            self.authed(Method::GET, &format!("projects/{}/", id))?,
            "Failed to fetch project",
        )
        .await
    }

    pub async fn create_project(&self, input: &ProjectInput) -> Result<Project> {
        self.send_json(
            self.authed(Method::POST, "projects/")?.json(input),
            "Failed to create project",
        )
        .await
    }

    pub async fn update_project(&self, id: i64, input: &ProjectInput) -> Result<Project> {
        self.send_json(
            self.authed(Method::PUT, &format!("projects/{}/", id))?.json(input),
            "Failed to update project",
        )
        .await
    }

    pub async fn delete_project(&self, id: i64) -> Result<()> {
        self.send_empty(
            self.authed(Method::DELETE, &format!("projects/{}/", id))?,
            "Failed to delete project",
        )
        .await
    }

    // ===== MILESTONES & SPRINTS =====

    pub async fn list_milestones(&self, project: i64) -> Result<Vec<Milestone>> {
        self.send_json(
            self.authed(Method::GET, "milestones/")?.query(&ProjectQuery { project }),
            "Failed to fetch milestones",
        )
        .await
    }

    pub async fn create_milestone(&self, input: &MilestoneInput) -> Result<Milestone> {
        self.send_json(
            self.authed(Method::POST, "milestones/")?.json(input),
            "Failed to create milestone",
        )
        .await
    }

    pub async fn update_milestone(&self, id: i64, input: &MilestoneInput) -> Result<Milestone> {
        self.send_json(
            self.authed(Method::PUT, &format!("milestones/{}/", id))?.json(input),
            "Failed to update milestone",
        )
        .await
    }

    /// Deleting a milestone removes its sprints and tasks on the server
    pub async fn delete_milestone(&self, id: i64) -> Result<()> {
        self.send_empty(
            self.authed(Method::DELETE, &format!("milestones/{}/", id))?,
            "Failed to delete milestone",
        )
        .await
    }

    pub async fn list_sprints(&self, project: i64) -> Result<Vec<Sprint>> {
        self.send_json(
            self.authed(Method::GET, "sprints/")?.query(&ProjectQuery { project }),
            "Failed to fetch sprints",
        )
        .await
    }

    pub async fn get_sprint(&self, id: i64) -> Result<Sprint> {
        self.send_json(
            self.authed(Method::GET, &format!("sprints/{}/", id))?,
            "Failed to fetch sprint",
        )
        .await
    }

    pub async fn create_sprint(&self, input: &SprintInput) -> Result<Sprint> {
        self.send_json(
            self.authed(Method::POST, "sprints/")?.json(input),
            "Failed to create sprint",
        )
        .await
    }

    pub async fn update_sprint(&self, id: i64, input: &SprintInput) -> Result<Sprint> {
        self.send_json(
            self.authed(Method::PUT, &format!("sprints/{}/", id))?.json(input),
            "Failed to update sprint",
        )
        .await
    }

    pub async fn delete_sprint(&self, id: i64) -> Result<()> {
        self.send_empty(
            self.authed(Method::DELETE, &format!("sprints/{}/", id))?,
            "Failed to delete sprint",
        )
        .await
    }

    // ===== TASKS =====

    pub async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        self.send_json(
            self.authed(Method::GET, "tasks/")?.query(query),
            "Failed to fetch tasks",
        )
        .await
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<Task> {
        self.send_json(
            self.authed(Method::POST, "tasks/")?.json(task),
            "Failed to create task",
        )
        .await
    }

    pub async fn update_task_status(&self, id: i64, status: &TaskStatus) -> Result<Task> {
        let body = TaskStatusUpdate {
            status: status.clone(),
        };
        self.send_json(
            self.authed(Method::PATCH, &format!("tasks/{}/", id))?.json(&body),
            "Failed to update task status",
        )
        .await
    }

    /// PATCH only the fields set in `update`
    pub async fn update_task(&self, id: i64, update: &TaskUpdate) -> Result<Task> {
        self.send_json(
            self.authed(Method::PATCH, &format!("tasks/{}/", id))?.json(update),
            "Failed to update task",
        )
        .await
    }

    pub async fn delete_task(&self, id: i64) -> Result<()> {
        self.send_empty(
            self.authed(Method::DELETE, &format!("tasks/{}/", id))?,
            "Failed to delete task",
        )
        .await
    }
}
