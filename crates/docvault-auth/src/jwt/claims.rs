//! JWT claims structure used in access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docvault_entity::user::UserRole;

/// JWT claims payload embedded in every access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user ID.
    pub sub: Uuid,
    /// Email at the time of issuance.
    pub email: String,
    /// User role at the time of issuance.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token ID.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
