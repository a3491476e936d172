//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::user::{CreateUser, User};

use crate::store::CredentialStore;

/// Postgres-backed [`CredentialStore`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, first_name, last_name, role) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("User already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }
}
