//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use docvault_core::config::AuthConfig;
use docvault_core::error::AppError;
use docvault_entity::user::UserRole;

use super::claims::Claims;

/// Creates signed JWT access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token lifetime in hours.
    ttl_hours: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}

/// A freshly signed access token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// The encoded JWT.
    pub access_token: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_hours: config.jwt_expires_in_hours as i64,
        }
    }

    /// Signs an access token carrying `{sub, email, role}`.
    pub fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        role: UserRole,
    ) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(self.ttl_hours);

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedToken {
            access_token,
            expires_at,
        })
    }
}
