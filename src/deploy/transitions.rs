// ABOUTME: State transition methods for release orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use std::path::Path;
use std::time::Duration;

use crate::cloud::{ProvisionOps, StackStatus, StorageOps};
use crate::deploy::SITE_ASSETS;

use super::Release;
use super::error::DeployError;
use super::outputs::StackOutputs;
use super::release::DeployMode;
use super::state::{Completed, Initialized, OutputsResolved, Provisioned};

// =============================================================================
// Initialized -> Provisioned
// =============================================================================

impl Release<Initialized> {
    /// Issue the create or update request for this release's stack.
    ///
    /// In create mode this waits until the stack reaches a terminal
    /// state, polling every `poll_interval` up to `timeout`. In update
    /// mode the request is issued and the method returns immediately,
    /// without awaiting completion.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Provision` if the request is rejected,
    /// `DeployError::StackFailed` if the stack lands in a failed state,
    /// and `DeployError::ProvisionTimeout` if no terminal state is
    /// reached in time.
    #[must_use = "release state must be used"]
    pub async fn provision<P: ProvisionOps>(
        self,
        cloud: &P,
        template_body: &str,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Release<Provisioned>, DeployError> {
        match self.mode {
            DeployMode::Create => {
                cloud
                    .create_stack(&self.region, &self.stack, template_body)
                    .await
                    .map_err(|e| DeployError::Provision {
                        region: self.region.clone(),
                        stack: self.stack.clone(),
                        source: e,
                    })?;

                tracing::info!(
                    stack = %self.stack,
                    region = %self.region,
                    "waiting for stack creation (this usually takes a few minutes)"
                );

                let status = self.wait_for_terminal(cloud, timeout, poll_interval).await?;
                Ok(self.transition(Provisioned { status }))
            }
            DeployMode::Update => {
                cloud
                    .update_stack(&self.region, &self.stack, template_body)
                    .await
                    .map_err(|e| DeployError::Provision {
                        region: self.region.clone(),
                        stack: self.stack.clone(),
                        source: e,
                    })?;

                // Update completion is not awaited. The recorded status
                // stays in-progress; callers that care are warned by the
                // orchestrator.
                Ok(self.transition(Provisioned {
                    status: StackStatus::InProgress,
                }))
            }
        }
    }

    /// Poll until the stack reaches a terminal status.
    async fn wait_for_terminal<P: ProvisionOps>(
        &self,
        cloud: &P,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<StackStatus, DeployError> {
        let start = std::time::Instant::now();

        loop {
            let status = cloud
                .stack_status(&self.region, &self.stack)
                .await
                .map_err(|e| DeployError::Provision {
                    region: self.region.clone(),
                    stack: self.stack.clone(),
                    source: e,
                })?;

            match status {
                StackStatus::Complete => return Ok(status),
                StackStatus::Failed => {
                    return Err(DeployError::StackFailed {
                        region: self.region.clone(),
                        stack: self.stack.clone(),
                        status,
                    });
                }
                StackStatus::Pending | StackStatus::InProgress => {}
            }

            if start.elapsed() >= timeout {
                return Err(DeployError::ProvisionTimeout {
                    region: self.region.clone(),
                    stack: self.stack.clone(),
                    waited: start.elapsed(),
                });
            }

            tokio::time::sleep(poll_interval).await;
        }
    }
}

// =============================================================================
// Provisioned -> OutputsResolved
// =============================================================================

impl Release<Provisioned> {
    /// The status recorded when provisioning returned.
    pub fn status(&self) -> StackStatus {
        self.state.status
    }

    /// Fetch the stack's exported outputs and resolve the entry URL and
    /// upload bucket from them.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::OutputResolution` if a named output is
    /// missing or the website URL does not have the expected shape.
    #[must_use = "release state must be used"]
    pub async fn resolve_outputs<P: ProvisionOps>(
        self,
        cloud: &P,
    ) -> Result<Release<OutputsResolved>, DeployError> {
        let raw = cloud
            .stack_outputs(&self.region, &self.stack)
            .await
            .map_err(|e| DeployError::OutputQuery {
                region: self.region.clone(),
                stack: self.stack.clone(),
                source: e,
            })?;

        let outputs =
            StackOutputs::from_raw(&raw).map_err(|e| DeployError::OutputResolution {
                region: self.region.clone(),
                stack: self.stack.clone(),
                source: e,
            })?;

        tracing::info!(
            stack = %self.stack,
            region = %self.region,
            entry_url = outputs.entry_url(),
            bucket = %outputs.bucket(),
            "resolved stack outputs"
        );

        Ok(self.transition(OutputsResolved { outputs }))
    }
}

// =============================================================================
// OutputsResolved -> Completed
// =============================================================================

impl Release<OutputsResolved> {
    /// The resolved outputs.
    pub fn outputs(&self) -> &StackOutputs {
        &self.state.outputs
    }

    /// Copy the site assets into the resolved bucket, in list order.
    ///
    /// Stops at the first failing file; files already uploaded are left
    /// in place (no atomicity guarantee).
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Upload` naming the file that failed.
    #[must_use = "release state must be used"]
    pub async fn upload_assets<S: StorageOps>(
        self,
        storage: &S,
        site_dir: &Path,
    ) -> Result<Release<Completed>, DeployError> {
        let bucket = self.state.outputs.bucket().clone();

        for file in SITE_ASSETS {
            let path = site_dir.join(file);
            storage
                .put_file(&self.region, &bucket, file, &path)
                .await
                .map_err(|e| DeployError::Upload {
                    region: self.region.clone(),
                    bucket: bucket.clone(),
                    file: (*file).to_string(),
                    source: e,
                })?;

            tracing::info!(%file, %bucket, region = %self.region, "uploaded asset");
        }

        let outputs = self.state.outputs.clone();
        Ok(self.transition(Completed { outputs }))
    }
}

// =============================================================================
// Completed - Terminal State
// =============================================================================

impl Release<Completed> {
    /// The resolved outputs of the finished release.
    pub fn outputs(&self) -> &StackOutputs {
        &self.state.outputs
    }

    /// Consume the release and return its outputs.
    pub fn finish(self) -> StackOutputs {
        self.state.outputs
    }
}
