// ABOUTME: Composable capability traits for the cloud control plane.
// ABOUTME: Defines ProvisionOps and StorageOps so orchestration can run against fakes.

mod provision;
mod storage;

pub use provision::{ProvisionApiError, ProvisionOps, StackOutput, StackStatus};
pub use storage::{StorageError, StorageOps};
