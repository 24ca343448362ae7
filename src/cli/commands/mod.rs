//! CLI command implementations

pub mod auth;
pub mod clients;
pub mod health;
pub mod milestones;
pub mod projects;
pub mod sprints;
pub mod tasks;
