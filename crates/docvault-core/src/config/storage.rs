//! Upload storage configuration.

use serde::{Deserialize, Serialize};

/// Local-disk storage for uploaded document files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory the storage provider resolves paths against.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Directory (relative to `root_path`) receiving uploaded files.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Maximum upload size in bytes (default 10 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            upload_dir: default_upload_dir(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_root_path() -> String {
    ".".to_string()
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_max_upload() -> u64 {
    10 * 1024 * 1024
}
