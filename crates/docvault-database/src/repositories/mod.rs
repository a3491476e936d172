//! Postgres repository implementations.

pub mod document;
pub mod job;
pub mod user;

pub use document::DocumentRepository;
pub use job::JobRepository;
pub use user::UserRepository;
