//! Authentication types for JWT tokens.
//!
//! Claims are the "identity token" half of an engine actor: who the user
//! is, which organisation they act in, and their stored organisation role.
//! Project roles and any "view as" overlay are session state resolved by
//! the page layer before each authorization check, never token claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Organisation ID (current context).
    pub org: Uuid,
    /// User's stored role in the organisation.
    pub role: String,
    /// Session ID, scoping any "view as" override held server-side.
    pub sid: Uuid,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        org_id: Uuid,
        role: &str,
        session_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            org: org_id,
            role: role.to_string(),
            sid: session_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the organisation ID from claims.
    #[must_use]
    pub const fn organization_id(&self) -> Uuid {
        self.org
    }

    /// Returns the session ID from claims.
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.sid
    }
}
