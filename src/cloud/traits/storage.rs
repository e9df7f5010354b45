// ABOUTME: Object storage trait for site asset uploads.
// ABOUTME: Copies one local file to one key under a bucket.

use crate::types::{BucketName, Region};
use async_trait::async_trait;
use std::path::Path;

/// Object storage operations used by the asset uploader.
#[async_trait]
pub trait StorageOps: Send + Sync {
    /// Copy a local file to `bucket/key` in the given region.
    async fn put_file(
        &self,
        region: &Region,
        bucket: &BucketName,
        key: &str,
        path: &Path,
    ) -> Result<(), StorageError>;
}

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    #[error("failed to read local file {path}: {reason}")]
    LocalRead { path: String, reason: String },

    #[error("access denied for bucket {0}")]
    AccessDenied(String),

    #[error("api error: {0}")]
    Api(String),
}
