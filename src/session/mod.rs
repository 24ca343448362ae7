//! Login session: auth token plus the user/tenant identity
//!
//! Written once per login, read by every authenticated request, removed as
//! a unit on logout. Token and user never exist in the store without each
//! other.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{Result, SkhokhoError};
use crate::fs;
use crate::schemas::{AuthResponse, User};

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,

    /// ISO 8601 login timestamp
    pub created_at: String,
}

impl Session {
    pub fn new(token: String, user: User) -> Self {
        Session {
            token,
            user,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl From<&AuthResponse> for Session {
    fn from(response: &AuthResponse) -> Self {
        Session::new(response.token.clone(), response.user())
    }
}

/// File-backed session storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store backed by `session.json` in the config directory
    pub fn in_dir(dir: &Path) -> Self {
        SessionStore {
            path: fs::get_session_path(dir),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session, if any
    pub fn load(&self) -> Result<Option<Session>> {
        match fs::read_json::<Session>(&self.path) {
            Ok(session) => Ok(Some(session)),
            Err(SkhokhoError::FileNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// The stored session, or `NotAuthenticated` when logged out
    pub fn require(&self) -> Result<Session> {
        self.load()?.ok_or_else(|| {
            SkhokhoError::NotAuthenticated("no active session; run `skhokho login`".to_string())
        })
    }

    /// Persist a session, replacing any previous one. Owner-only on Unix.
    pub fn save(&self, session: &Session) -> Result<()> {
        fs::write_json(&self.path, session, fs::FileMode::Private)?;
        info!(user = %session.user.email, "Session saved");
        Ok(())
    }

    /// Remove the session. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        let removed = fs::remove_file_if_exists(&self.path)?;
        debug!(removed, "Session cleared");
        Ok(removed)
    }
}
