//! Storage provider trait for uploaded document files.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for file storage backends.
///
/// Paths are relative keys such as `uploads/<name>`; implementations
/// resolve them against their own root. The trait is defined here in
/// `docvault-core` and implemented in `docvault-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Read a file and return its byte stream.
    async fn read(&self, path: &str) -> AppResult<ByteStream>;

    /// Write bytes to a file at the given path, creating parent directories.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Delete a file at the given path. Missing files are not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether a file exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Size of the file in bytes.
    async fn size(&self, path: &str) -> AppResult<u64>;
}
