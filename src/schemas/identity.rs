//! Identity schemas - users, tenant membership and auth responses

use serde::{Deserialize, Serialize};

/// The logged-in user together with their tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    /// Tenant name, when the API reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
}

impl User {
    /// "First Last", falling back to the email
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}

/// A user's membership in a tenant, as listed by `members/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub user: i64,
    pub user_email: String,

    #[serde(default)]
    pub user_first_name: String,

    #[serde(default)]
    pub user_last_name: String,

    pub tenant: i64,

    #[serde(default)]
    pub tenant_name: String,

    #[serde(default)]
    pub is_owner: bool,

    #[serde(default)]
    pub is_approved: bool,

    #[serde(default)]
    pub role: String,
}

impl Member {
    /// The member as an assignable user
    pub fn to_user(&self) -> User {
        User {
            id: self.user,
            email: self.user_email.clone(),
            first_name: self.user_first_name.clone(),
            last_name: self.user_last_name.clone(),
            tenant: Some(self.tenant_name.clone()).filter(|t| !t.is_empty()),
        }
    }
}

/// Response of `login/` and `signup/`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i64,
    pub email: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub tenant: Option<String>,

    #[serde(default)]
    pub message: String,
}

impl AuthResponse {
    pub fn user(&self) -> User {
        User {
            id: self.user_id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            tenant: self.tenant.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
}
