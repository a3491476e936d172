//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use docvault_core::config::AuthConfig;
use docvault_core::error::AppError;

use super::claims::Claims;

/// Validates JWT access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    ///
    /// Every failure maps to `Unauthorized`; the message says which check
    /// failed but never echoes the token.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    _ => AppError::unauthorized("Invalid token"),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use chrono::Utc;
    use docvault_core::error::ErrorKind;
    use docvault_entity::user::UserRole;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issue_then_decode() {
        let cfg = config("test-secret");
        let user_id = Uuid::new_v4();
        let issued = JwtEncoder::new(&cfg)
            .issue(user_id, "ada@example.com", UserRole::Admin)
            .unwrap();

        let claims = JwtDecoder::new(&cfg).decode(&issued.access_token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let issued = JwtEncoder::new(&config("one"))
            .issue(Uuid::new_v4(), "a@b.c", UserRole::User)
            .unwrap();

        let err = JwtDecoder::new(&config("two"))
            .decode(&issued.access_token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@b.c".into(),
            role: UserRole::User,
            iat: now - 7200,
            exp: now - 3600,
            jti: Uuid::new_v4(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let err = JwtDecoder::new(&config("secret")).decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn test_garbage_is_unauthorized() {
        let err = JwtDecoder::new(&config("secret"))
            .decode("not-a-jwt")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
