//! Domain events emitted by docvault operations.

pub mod audit;

pub use audit::{AuditAction, AuditEvent};
