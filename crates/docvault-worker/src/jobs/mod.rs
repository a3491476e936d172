//! Job handler implementations.

pub mod audit;

pub use audit::AuditJobHandler;
