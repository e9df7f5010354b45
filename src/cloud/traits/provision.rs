// ABOUTME: Stack provisioning trait for the cloud control plane.
// ABOUTME: Create, update, poll status, and read exported outputs of a stack.

use crate::types::{Region, StackName};
use async_trait::async_trait;

/// Stack lifecycle operations, keyed by stack name and region.
///
/// These traits are intentionally not sealed: the orchestrator is tested
/// against fake implementations living outside this crate.
#[async_trait]
pub trait ProvisionOps: Send + Sync {
    /// Issue a stack creation request. Does not wait for completion.
    async fn create_stack(
        &self,
        region: &Region,
        name: &StackName,
        template_body: &str,
    ) -> Result<(), ProvisionApiError>;

    /// Issue a stack update request. Does not wait for completion.
    async fn update_stack(
        &self,
        region: &Region,
        name: &StackName,
        template_body: &str,
    ) -> Result<(), ProvisionApiError>;

    /// Report the current status of a stack.
    async fn stack_status(
        &self,
        region: &Region,
        name: &StackName,
    ) -> Result<StackStatus, ProvisionApiError>;

    /// Read the named output values exported by a stack.
    async fn stack_outputs(
        &self,
        region: &Region,
        name: &StackName,
    ) -> Result<Vec<StackOutput>, ProvisionApiError>;
}

/// Coarse stack status as seen by the deployment pipeline.
///
/// `Complete` and `Failed` are terminal; a stack never leaves them
/// without a new operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackStatus {
    /// Request accepted, work not yet observed.
    Pending,
    /// The control plane is still converging the stack.
    InProgress,
    /// The stack reached its requested state.
    Complete,
    /// The stack failed or rolled back.
    Failed,
}

impl StackStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StackStatus::Complete | StackStatus::Failed)
    }
}

impl std::fmt::Display for StackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StackStatus::Pending => "pending",
            StackStatus::InProgress => "in progress",
            StackStatus::Complete => "complete",
            StackStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// One named output value exported by a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOutput {
    pub key: String,
    pub value: String,
}

/// Errors from provisioning operations.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionApiError {
    #[error("stack not found: {0}")]
    NotFound(String),

    #[error("stack already exists: {0}")]
    AlreadyExists(String),

    #[error("template rejected: {0}")]
    InvalidTemplate(String),

    #[error("api error: {0}")]
    Api(String),
}
