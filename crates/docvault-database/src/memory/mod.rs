//! In-memory store implementations backed by `dashmap`.
//!
//! They honour the same contracts as the Postgres repositories (unique
//! emails, newest-first listing, delete returning the removed row) and
//! are used by tests and the in-process integration harness.

pub mod document;
pub mod user;

pub use document::MemoryDocumentStore;
pub use user::MemoryCredentialStore;
