//! Schema types for skhokho
//!
//! All types mirror the JSON bodies exchanged with the API.

mod client;
mod config;
mod identity;
mod project;
mod sprint;
mod task;

pub use client::{Client, ClientInput, ClientStatus};
pub use config::Config;
pub use identity::{AuthResponse, LoginRequest, Member, SignupRequest, User};
pub use project::{Project, ProjectInput, ProjectStatus};
pub use sprint::{Milestone, MilestoneInput, MilestoneStatus, Sprint, SprintInput, SprintStatus};
pub use task::{NewTask, Priority, Task, TaskStatus, TaskStatusUpdate, TaskUpdate};
