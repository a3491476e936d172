//! Registration, login, and bearer token resolution.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use docvault_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use docvault_core::config::AuthConfig;
use docvault_core::error::AppError;
use docvault_database::store::CredentialStore;
use docvault_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;
use crate::validation::validate;

/// Registration input.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    /// Login email.
    #[validate(email(message = "email must be an email"))]
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Given name.
    #[validate(length(min = 1, message = "firstName should not be empty"))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, message = "lastName should not be empty"))]
    pub last_name: String,
}

/// Login input.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginInput {
    /// Login email.
    #[validate(length(min = 1, message = "email should not be empty"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "password should not be empty"))]
    pub password: String,
}

/// Token plus the account it was issued for.
#[derive(Debug, Clone)]
pub struct AuthPayload {
    /// Signed bearer token.
    pub access_token: String,
    /// The authenticated user.
    pub user: User,
}

/// Handles account creation, credential checks, and token resolution.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// Credential store.
    credentials: Arc<dyn CredentialStore>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Token signer.
    encoder: JwtEncoder,
    /// Token verifier.
    decoder: JwtDecoder,
    /// Minimum password length.
    password_min_length: usize,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(credentials: Arc<dyn CredentialStore>, config: &AuthConfig) -> Self {
        Self {
            credentials,
            hasher: PasswordHasher::new(),
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            password_min_length: config.password_min_length,
        }
    }

    /// Registers a new `USER` account and signs a token for it.
    pub async fn register(&self, input: RegisterInput) -> Result<AuthPayload, AppError> {
        validate(&input)?;
        if input.password.chars().count() < self.password_min_length {
            return Err(AppError::validation(format!(
                "password must be at least {} characters long",
                self.password_min_length
            )));
        }

        if self.credentials.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("User already exists"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .credentials
            .create(&CreateUser {
                email: input.email,
                password_hash,
                first_name: input.first_name,
                last_name: input.last_name,
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        self.issue(user)
    }

    /// Checks credentials and signs a token.
    ///
    /// Unknown emails and wrong passwords fail identically, and both run one
    /// Argon2 verification.
    pub async fn login(&self, input: LoginInput) -> Result<AuthPayload, AppError> {
        validate(&input)?;

        let Some(user) = self.credentials.find_by_email(&input.email).await? else {
            self.hasher.verify_dummy(&input.password);
            warn!("Login attempt for unknown email");
            return Err(invalid_credentials());
        };

        if !self
            .hasher
            .verify_password(&input.password, &user.password_hash)?
        {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(invalid_credentials());
        }

        info!(user_id = %user.id, "User logged in");
        self.issue(user)
    }

    /// Resolves a bearer token to the acting user.
    ///
    /// Tokens for users that no longer exist are rejected.
    pub async fn authenticate(&self, token: &str) -> Result<RequestContext, AppError> {
        let claims = self.decoder.decode(token)?;
        let user = self
            .credentials
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;
        Ok(RequestContext::for_user(&user))
    }

    /// Loads the actor's own account.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.credentials
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))
    }

    fn issue(&self, user: User) -> Result<AuthPayload, AppError> {
        let token = self.encoder.issue(user.id, &user.email, user.role)?;
        Ok(AuthPayload {
            access_token: token.access_token,
            user,
        })
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials")
}
