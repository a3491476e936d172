//! # docvault-storage
//!
//! Storage for uploaded document files. Only the local filesystem
//! provider exists; it implements [`docvault_core::traits::StorageProvider`].

pub mod naming;
pub mod providers;

pub use naming::{is_upload_key, upload_key};
pub use providers::local::LocalStorageProvider;
