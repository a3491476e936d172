//! In-memory credential store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::user::{CreateUser, User};

use crate::store::CredentialStore;

/// [`CredentialStore`] holding users in a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: DashMap<Uuid, User>,
    /// Email to user id; the entry API makes the uniqueness check atomic.
    emails: DashMap<String, Uuid>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.emails.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        match self.emails.entry(data.email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("User already exists")),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let user = User {
                    id: Uuid::new_v4(),
                    email: data.email.clone(),
                    password_hash: data.password_hash.clone(),
                    first_name: data.first_name.clone(),
                    last_name: data.last_name.clone(),
                    role: data.role,
                    created_at: now,
                    updated_at: now,
                };
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }
}
