//! Local-filesystem blob store for uploaded proof documents.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::kernel::BaseBlobStore;

/// Longest sanitized original filename kept in a key
const MAX_NAME_LEN: usize = 100;

/// Keys tried per upload before giving up on finding a free one
const MAX_PUT_ATTEMPTS: u32 = 16;

/// Stores blobs as flat files under a root directory
///
/// Keys are `{unix_millis}-{sanitized_name}`. When that key is already taken
/// (same name within the same millisecond) the upload is stored as
/// `{unix_millis}-{n}-{sanitized_name}` instead.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Open the store, creating the root directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("Failed to create upload directory {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            anyhow::bail!("Invalid blob key: {key:?}");
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl BaseBlobStore for LocalBlobStore {
    async fn put(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        let unix_millis = chrono::Utc::now().timestamp_millis();

        for attempt in 0..MAX_PUT_ATTEMPTS {
            let key = if attempt == 0 {
                blob_key(unix_millis, original_name)
            } else {
                numbered_blob_key(unix_millis, attempt, original_name)
            };
            let path = self.path_for(&key)?;

            // create_new: an existing upload is never overwritten
            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    debug!(key = %key, "blob key taken, trying next");
                    continue;
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to create {}", path.display()))
                }
            };

            if let Err(e) = tokio::io::AsyncWriteExt::write_all(&mut file, bytes).await {
                drop(file);
                let _ = tokio::fs::remove_file(&path).await;
                return Err(e).with_context(|| format!("Failed to write {}", path.display()));
            }

            debug!(key = %key, size = bytes.len(), "blob stored");
            return Ok(key);
        }

        anyhow::bail!(
            "No free blob key for {original_name:?} after {MAX_PUT_ATTEMPTS} attempts"
        )
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete {}", path.display())),
        }
    }
}

/// Build a storage key from a timestamp and the client-supplied filename
pub fn blob_key(unix_millis: i64, original_name: &str) -> String {
    format!("{unix_millis}-{}", stored_name(original_name))
}

/// Key used when the plain `blob_key` is already taken
fn numbered_blob_key(unix_millis: i64, n: u32, original_name: &str) -> String {
    format!("{unix_millis}-{n}-{}", stored_name(original_name))
}

fn stored_name(original_name: &str) -> String {
    let name = sanitize_file_name(original_name);
    if name.is_empty() {
        "upload".to_string()
    } else {
        name
    }
}

/// Keep only the final path component and a conservative character set
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if is_key_char(c) { c } else { '_' })
        .take(MAX_NAME_LEN)
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

/// A key is a single path component: no separators, no leading dot
fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.starts_with('.') && key.chars().all(is_key_char)
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_key_prefixes_timestamp() {
        assert_eq!(blob_key(1700000000000, "aadhaar.pdf"), "1700000000000-aadhaar.pdf");
    }

    #[test]
    fn test_blob_key_strips_directories() {
        assert_eq!(blob_key(1, "../../etc/passwd"), "1-passwd");
        assert_eq!(blob_key(1, "C:\\Users\\asha\\id card.png"), "1-id_card.png");
    }

    #[test]
    fn test_blob_key_handles_empty_and_hidden_names() {
        assert_eq!(blob_key(5, ""), "5-upload");
        assert_eq!(blob_key(5, ".."), "5-upload");
        assert_eq!(blob_key(5, ".env"), "5-env");
    }

    #[tokio::test]
    async fn test_put_writes_file_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path().join("uploads")).await.unwrap();

        let key = store.put("proof.pdf", b"%PDF-1.7").await.unwrap();
        assert!(key.ends_with("-proof.pdf"));

        let stored = tokio::fs::read(store.root().join(&key)).await.unwrap();
        assert_eq!(stored, b"%PDF-1.7");

        store.delete(&key).await.unwrap();
        assert!(!store.root().join(&key).exists());
        // Deleting twice is fine
        store.delete(&key).await.unwrap();
    }

    #[test]
    fn test_key_validation() {
        assert!(is_valid_key("1700000000000-aadhaar.pdf"));
        assert!(is_valid_key(&blob_key(1700000000000, &"a".repeat(150))));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key(".."));
        assert!(!is_valid_key("../outside"));
        assert!(!is_valid_key("dir/file"));
    }

    #[tokio::test]
    async fn test_put_accepts_long_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path()).await.unwrap();

        let name = format!("{}.pdf", "a".repeat(90));
        let key = store.put(&name, b"x").await.unwrap();

        assert!(key.ends_with(".pdf"));
        assert_eq!(tokio::fs::read(store.root().join(&key)).await.unwrap(), b"x");
    }

    #[tokio::test]
    async fn test_same_name_uploads_get_distinct_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path()).await.unwrap();

        let first = store.put("image.jpg", b"front").await.unwrap();
        let second = store.put("image.jpg", b"back").await.unwrap();
        let third = store.put("image.jpg", b"side").await.unwrap();

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_ne!(first, third);
        for key in [&first, &second, &third] {
            assert!(key.ends_with("-image.jpg"));
        }
        assert_eq!(tokio::fs::read(store.root().join(&first)).await.unwrap(), b"front");
        assert_eq!(tokio::fs::read(store.root().join(&second)).await.unwrap(), b"back");
        assert_eq!(tokio::fs::read(store.root().join(&third)).await.unwrap(), b"side");
    }

    #[test]
    fn test_numbered_key_keeps_timestamp_prefix() {
        assert_eq!(
            numbered_blob_key(1700000000000, 2, "image.jpg"),
            "1700000000000-2-image.jpg"
        );
    }

    #[tokio::test]
    async fn test_delete_rejects_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::open(dir.path()).await.unwrap();
        assert!(store.delete("../outside").await.is_err());
    }
}
