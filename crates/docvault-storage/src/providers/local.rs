//! Local filesystem storage provider.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::traits::storage::{ByteStream, StorageProvider};

/// Local filesystem storage provider.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored files.
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Root directory of this provider.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative key to a path within the root.
    ///
    /// Keys containing `..` or other non-normal components are rejected.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let clean = Path::new(path.trim_start_matches('/'));
        if clean
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(AppError::validation(format!("Invalid storage path: {path}")));
        }
        Ok(self.root.join(clean))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

fn open_error(path: &str, e: std::io::Error) -> AppError {
    if e.kind() == std::io::ErrorKind::NotFound {
        AppError::not_found(format!("File not found: {path}"))
    } else {
        AppError::with_source(ErrorKind::Storage, format!("Failed to open file: {path}"), e)
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        let full_path = self.resolve(path)?;
        let file = fs::File::open(&full_path)
            .await
            .map_err(|e| open_error(path, e))?;

        Ok(Box::pin(ReaderStream::new(file)))
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {path}"),
                e,
            )
        })?;

        debug!(path, bytes = data.len(), "Wrote file");
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(path, "Deleted file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {path}"),
                e,
            )),
        }
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let full_path = self.resolve(path)?;
        fs::try_exists(&full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to check file: {path}"),
                e,
            )
        })
    }

    async fn size(&self, path: &str) -> AppResult<u64> {
        let full_path = self.resolve(path)?;
        let meta = fs::metadata(&full_path)
            .await
            .map_err(|e| open_error(path, e))?;
        Ok(meta.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream::StreamExt;

    async fn provider() -> (tempfile::TempDir, LocalStorageProvider) {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        (dir, provider)
    }

    #[tokio::test]
    async fn test_write_read_delete() {
        let (_dir, provider) = provider().await;

        let data = Bytes::from("hello world");
        provider.write("uploads/file.txt", data.clone()).await.unwrap();
        assert!(provider.exists("uploads/file.txt").await.unwrap());
        assert_eq!(provider.size("uploads/file.txt").await.unwrap(), 11);

        let mut stream = provider.read("uploads/file.txt").await.unwrap();
        let mut read_back = Vec::new();
        while let Some(chunk) = stream.next().await {
            read_back.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(read_back, data.to_vec());

        provider.delete("uploads/file.txt").await.unwrap();
        assert!(!provider.exists("uploads/file.txt").await.unwrap());
        // Deleting twice is fine.
        provider.delete("uploads/file.txt").await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let (_dir, provider) = provider().await;
        let err = provider.read("uploads/nope.bin").await.err().unwrap();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let (_dir, provider) = provider().await;
        let err = provider
            .write("../escape.txt", Bytes::from("x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
