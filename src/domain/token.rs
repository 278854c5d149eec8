//! Issued-token record used as a per-user revocation list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted bearer token.
///
/// After a successful login, at most one unexpired and unrevoked token is
/// retained per user; all prior valid tokens are marked expired and revoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub id: Uuid,
    pub token: String,
    pub user_id: Uuid,
    pub token_type: String,
    pub expired: bool,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl Token {
    /// True when the token can still be used for authentication.
    pub fn is_valid(&self) -> bool {
        !self.expired && !self.revoked
    }
}
