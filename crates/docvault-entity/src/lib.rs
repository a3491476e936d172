//! # docvault-entity
//!
//! Domain entity models for docvault. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally implement `sqlx::FromRow`.

pub mod document;
pub mod job;
pub mod user;
