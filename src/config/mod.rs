//! Configuration for skhokho

mod loader;

pub use loader::{load_config, API_URL_ENV};
