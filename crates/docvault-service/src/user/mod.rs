//! Account services: registration, login and token authentication.

pub mod service;

pub use service::{AuthPayload, AuthService, LoginInput, RegisterInput};
