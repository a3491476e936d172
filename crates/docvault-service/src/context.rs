//! Request context carrying the authenticated actor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docvault_entity::user::{User, UserRole};

/// Context for the current authenticated request.
///
/// Built by the API layer once the bearer token has been verified and
/// passed into service methods so every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's email.
    pub email: String,
    /// The user's role.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id,
            email: email.into(),
            role,
            request_time: Utc::now(),
        }
    }

    /// Creates a context acting as the given user.
    pub fn for_user(user: &User) -> Self {
        Self::new(user.id, user.email.clone(), user.role)
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
