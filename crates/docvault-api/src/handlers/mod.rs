//! HTTP request handlers.

pub mod document;
pub mod graphql;
pub mod health;
