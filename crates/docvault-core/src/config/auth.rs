//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token signing and credential policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token lifetime in hours.
    #[serde(default = "default_expires_in")]
    pub jwt_expires_in_hours: u64,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_expires_in_hours: default_expires_in(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_expires_in() -> u64 {
    24
}

fn default_password_min() -> usize {
    6
}
