// ABOUTME: Error types for deployment stage failures.
// ABOUTME: Every variant carries the region and stack so the final report is actionable.

use std::time::Duration;

use super::outputs::OutputError;
use crate::cloud::{ProvisionApiError, StackStatus, StorageError};
use crate::types::{BucketName, Region, StackName};

/// Errors that can occur while driving a release through its states.
/// All of them are fatal for the run; there is no retry or rollback.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The create or update request was rejected.
    #[error("provisioning request failed for stack {stack} in {region}: {source}")]
    Provision {
        region: Region,
        stack: StackName,
        source: ProvisionApiError,
    },

    /// The stack reached a terminal state other than complete.
    #[error("stack {stack} in {region} reached terminal status: {status}")]
    StackFailed {
        region: Region,
        stack: StackName,
        status: StackStatus,
    },

    /// The stack did not reach a terminal state in time.
    #[error("timed out after {}s waiting for stack {stack} in {region}", .waited.as_secs())]
    ProvisionTimeout {
        region: Region,
        stack: StackName,
        waited: Duration,
    },

    /// The output query itself was rejected.
    #[error("querying outputs of stack {stack} in {region} failed: {source}")]
    OutputQuery {
        region: Region,
        stack: StackName,
        source: ProvisionApiError,
    },

    /// A named output was missing or malformed.
    #[error("output resolution failed for stack {stack} in {region}: {source}")]
    OutputResolution {
        region: Region,
        stack: StackName,
        source: OutputError,
    },

    /// An asset copy failed; later files were not attempted.
    #[error("upload of {file} to bucket {bucket} in {region} failed: {source}")]
    Upload {
        region: Region,
        bucket: BucketName,
        file: String,
        source: StorageError,
    },

    /// The external verifier reported failure or could not run.
    #[error("verification against {url} failed: {reason}")]
    Verification { url: String, reason: String },
}
