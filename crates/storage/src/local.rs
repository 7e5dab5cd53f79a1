//! Local-filesystem object store for development and tests.
//!
//! Blobs live under a root directory; public URLs use the
//! `{base_url}/o/{encoded path}?alt=media` layout served by the API's
//! `/objects` route.

use std::path::{Path, PathBuf};

use crate::{ObjectStore, StorageError};

/// Marker separating the URL prefix from the encoded object path.
const URL_MARKER: &str = "/o/";

pub struct LocalStore {
    root: PathBuf,
    base_url: String,
}

impl LocalStore {
    /// * `root`     - directory blobs are written under (created on demand).
    /// * `base_url` - URL prefix the API serves objects from, without a
    ///   trailing slash (e.g. `http://localhost:3000/objects`).
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    /// Absolute filesystem location for an object path.
    pub fn blob_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait::async_trait]
impl ObjectStore for LocalStore {
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let target = self.blob_path(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        Ok(self.public_url(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        tokio::fs::remove_file(self.blob_path(path)).await?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}{URL_MARKER}{}?alt=media",
            self.base_url,
            urlencoding::encode(path)
        )
    }

    fn path_from_url(&self, url: &str) -> Result<String, StorageError> {
        let encoded = url
            .split_once(URL_MARKER)
            .map(|(_, rest)| rest)
            .ok_or_else(|| StorageError::UnrecognizedUrl(url.to_string()))?;
        let encoded = encoded.split('?').next().unwrap_or(encoded);
        urlencoding::decode(encoded)
            .map(|p| p.into_owned())
            .map_err(|_| StorageError::UnrecognizedUrl(url.to_string()))
    }
}

/// Serve helper for the API's `/objects` route: resolve a decoded object
/// path against the root, refusing any path that escapes it.
pub fn resolve_serving_path(root: &Path, object_path: &str) -> Option<PathBuf> {
    if object_path
        .split('/')
        .any(|seg| seg == ".." || seg.is_empty())
    {
        return None;
    }
    Some(root.join(object_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> LocalStore {
        LocalStore::new(dir, "http://localhost:3000/objects")
    }

    #[tokio::test]
    async fn put_then_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let url = store
            .put("courses/1/thumbnail", b"png-bytes".to_vec(), "image/png")
            .await
            .unwrap();
        assert!(url.starts_with("http://localhost:3000/objects/o/"));
        assert!(dir.path().join("courses/1/thumbnail").exists());

        store.delete("courses/1/thumbnail").await.unwrap();
        assert!(!dir.path().join("courses/1/thumbnail").exists());
    }

    #[tokio::test]
    async fn put_overwrites_existing_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        store
            .put("courses/1/thumbnail", b"old".to_vec(), "image/png")
            .await
            .unwrap();
        store
            .put("courses/1/thumbnail", b"new".to_vec(), "image/png")
            .await
            .unwrap();

        let bytes = std::fs::read(dir.path().join("courses/1/thumbnail")).unwrap();
        assert_eq!(bytes, b"new");
    }

    #[tokio::test]
    async fn delete_missing_blob_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        assert!(store.delete("courses/9/thumbnail").await.is_err());
    }

    #[test]
    fn url_round_trips_back_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let path = "courses/1/videos/2/attachments/lecture notes.pdf";
        let url = store.public_url(path);
        assert_eq!(store.path_from_url(&url).unwrap(), path);
    }

    #[test]
    fn foreign_url_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        assert!(store
            .path_from_url("https://elsewhere.example/courses/1/thumbnail")
            .is_err());
    }

    #[test]
    fn serving_path_refuses_traversal() {
        let root = Path::new("/data/objects");
        assert!(resolve_serving_path(root, "courses/1/thumbnail").is_some());
        assert!(resolve_serving_path(root, "../secrets").is_none());
        assert!(resolve_serving_path(root, "a//b").is_none());
    }
}
