//! # docvault-core
//!
//! Core crate for docvault. Contains configuration schemas, the audit
//! event model, the storage provider trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other docvault crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
