//! Object storage: binary blobs addressed by hierarchical path, returning
//! durable fetch URLs at upload time.
//!
//! Two providers implement [`ObjectStore`]: [`LocalStore`] writes under a
//! directory and serves through the API's `/objects` route (development and
//! tests), [`S3Store`] talks to S3-compatible storage.

pub mod local;
pub mod paths;
pub mod s3;

pub use local::LocalStore;
pub use s3::S3Store;

use async_trait::async_trait;

/// Errors from the object storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Local filesystem I/O failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote store rejected or failed the call.
    #[error("Storage provider error: {0}")]
    Provider(String),

    /// A public URL could not be mapped back to an object path.
    #[error("Unrecognized object URL: {0}")]
    UnrecognizedUrl(String),
}

/// A blob store keyed by hierarchical path.
///
/// Writes overwrite whatever blob previously lived at the path. `delete`
/// reports [`StorageError`] for missing objects where the provider does;
/// callers decide whether missing blobs abort their operation.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store a blob, returning its durable fetch URL.
    async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Delete the blob at `path`.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    /// The durable fetch URL for a path, without uploading anything.
    fn public_url(&self, path: &str) -> String;

    /// Recover the object path from a previously issued public URL.
    ///
    /// Each provider splits on its own fixed URL marker, so this breaks if
    /// the provider's URL format changes.
    fn path_from_url(&self, url: &str) -> Result<String, StorageError>;
}
