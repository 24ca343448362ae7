//! Skhokho - client for a multi-tenant CRM and project tracker
//!
//! This library provides the core functionality for the skhokho CLI, including:
//! - Schema definitions for clients, projects, milestones, sprints and tasks
//! - Domain logic for the task workflow, sprint date windows and project health
//! - Session storage and configuration
//! - An HTTP client for the remote API
//! - Workflow steps that tie validation, requests and local lists together

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;
pub mod session;
pub mod workflow;

// Re-export commonly used types
pub use errors::{Result, SkhokhoError};
pub use schemas::{Client, Config, Project, Sprint, Task, TaskStatus};
