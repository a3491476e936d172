//! # docvault-database
//!
//! PostgreSQL connection management, the store traits the services depend
//! on, and their implementations: Postgres repositories for production and
//! `dashmap`-backed in-memory stores for tests and local tooling.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{CredentialStore, DocumentStore};
