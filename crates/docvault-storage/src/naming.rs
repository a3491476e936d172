//! Storage key generation for uploads.

use std::path::Path;

use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 16;

/// Build a randomized storage key `{upload_dir}/{uuid}{.ext}` for an upload.
///
/// Only the extension of the client-supplied name is kept, lowercased and
/// limited to ASCII alphanumerics; the original name is stored as document
/// metadata instead.
pub fn upload_key(upload_dir: &str, original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= MAX_EXTENSION_LEN)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    let dir = upload_dir.trim_matches('/');
    let name = format!("{}{extension}", Uuid::new_v4().simple());
    if dir.is_empty() {
        name
    } else {
        format!("{dir}/{name}")
    }
}

/// Check that `key` has the exact shape [`upload_key`] produces for
/// `upload_dir`: `{upload_dir}/{32 hex digits}` plus an optional lowercase
/// alphanumeric extension.
pub fn is_upload_key(upload_dir: &str, key: &str) -> bool {
    let dir = upload_dir.trim_matches('/');
    let name = if dir.is_empty() {
        key
    } else {
        match key
            .strip_prefix(dir)
            .and_then(|rest| rest.strip_prefix('/'))
        {
            Some(name) => name,
            None => return false,
        }
    };

    let (stem, extension) = match name.split_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (name, None),
    };
    let stem_ok = stem.len() == 32
        && stem
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
    let extension_ok = extension.is_none_or(|ext| {
        !ext.is_empty()
            && ext.len() <= MAX_EXTENSION_LEN
            && ext
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    });
    stem_ok && extension_ok
}
