// ABOUTME: Cloud control-plane access for deployments.
// ABOUTME: Capability traits plus the AWS SDK implementation.

mod aws;
mod traits;

pub use aws::AwsCloud;
pub use traits::{
    ProvisionApiError, ProvisionOps, StackOutput, StackStatus, StorageError, StorageOps,
};
