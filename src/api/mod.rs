//! Client for the remote Skhokho API

mod client;
mod errors;

pub use client::{ApiClient, TaskQuery};
pub use errors::error_message;
