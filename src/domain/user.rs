//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        id: Uuid,
        username: String,
        password_hash: String,
        full_name: Option<String>,
        address: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            password_hash,
            full_name,
            address,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Typed caller identity resolved from a validated bearer token.
///
/// Passed explicitly into service calls so that authorization decisions
/// never rely on identity fields supplied in a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
}
