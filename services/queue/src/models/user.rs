//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Marketplace role a user registers under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Posts queue requests that need fulfillment
    Requester,
    /// Accepts and fulfills posted queue requests
    Queuer,
}

impl Role {
    /// Canonical storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Requester => "requester",
            Role::Queuer => "queuer",
        }
    }
}

/// Error returned when parsing an unknown role value
#[derive(Debug, Error)]
#[error("Role must be requester or queuer")]
pub struct ParseRoleError(pub String);

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "requester" => Ok(Role::Requester),
            "queuer" => Ok(Role::Queuer),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this user may post queue requests
    pub fn is_requester(&self) -> bool {
        self.role == Role::Requester
    }

    /// Whether this user may accept queue requests
    pub fn is_queuer(&self) -> bool {
        self.role == Role::Queuer
    }
}

/// New user creation payload
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}
