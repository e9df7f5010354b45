// ABOUTME: AWS SDK implementation of the cloud capability traits.
// ABOUTME: CloudFormation for stacks, S3 for asset uploads, clients cached per region.

use aws_config::{BehaviorVersion, Region as SdkRegion};
use aws_sdk_cloudformation::types::StackStatus as CfnStatus;
use aws_sdk_s3::primitives::ByteStream;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::Mutex;

use super::traits::{
    ProvisionApiError, ProvisionOps, StackOutput, StackStatus, StorageError, StorageOps,
};
use crate::types::{BucketName, Region, StackName};

/// Production cloud client. SDK clients are region-bound, so one pair of
/// clients is built lazily per region and reused for the rest of the run.
pub struct AwsCloud {
    clients: Mutex<HashMap<Region, RegionClients>>,
}

#[derive(Clone)]
struct RegionClients {
    cloudformation: aws_sdk_cloudformation::Client,
    s3: aws_sdk_s3::Client,
}

impl AwsCloud {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }

    async fn clients_for(&self, region: &Region) -> RegionClients {
        if let Some(clients) = self.clients.lock().await.get(region) {
            return clients.clone();
        }

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(SdkRegion::new(region.as_str().to_owned()))
            .load()
            .await;

        let built = RegionClients {
            cloudformation: aws_sdk_cloudformation::Client::new(&sdk_config),
            s3: aws_sdk_s3::Client::new(&sdk_config),
        };

        self.clients
            .lock()
            .await
            .entry(region.clone())
            .or_insert(built)
            .clone()
    }
}

impl Default for AwsCloud {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ProvisionOps for AwsCloud {
    async fn create_stack(
        &self,
        region: &Region,
        name: &StackName,
        template_body: &str,
    ) -> Result<(), ProvisionApiError> {
        let clients = self.clients_for(region).await;

        let response = clients
            .cloudformation
            .create_stack()
            .stack_name(name.as_str())
            .template_body(template_body)
            .send()
            .await
            .map_err(|e| map_cfn_error(name, e.into_service_error().to_string()))?;

        tracing::debug!(
            stack = %name,
            region = %region,
            stack_id = response.stack_id().unwrap_or("<unknown>"),
            "stack creation requested"
        );
        Ok(())
    }

    async fn update_stack(
        &self,
        region: &Region,
        name: &StackName,
        template_body: &str,
    ) -> Result<(), ProvisionApiError> {
        let clients = self.clients_for(region).await;

        let response = clients
            .cloudformation
            .update_stack()
            .stack_name(name.as_str())
            .template_body(template_body)
            .send()
            .await
            .map_err(|e| map_cfn_error(name, e.into_service_error().to_string()))?;

        tracing::debug!(
            stack = %name,
            region = %region,
            stack_id = response.stack_id().unwrap_or("<unknown>"),
            "stack update requested"
        );
        Ok(())
    }

    async fn stack_status(
        &self,
        region: &Region,
        name: &StackName,
    ) -> Result<StackStatus, ProvisionApiError> {
        let stack = self.describe_stack(region, name).await?;

        let status = stack
            .stack_status()
            .map(map_status)
            .unwrap_or(StackStatus::Pending);

        tracing::debug!(stack = %name, region = %region, %status, "polled stack status");
        Ok(status)
    }

    async fn stack_outputs(
        &self,
        region: &Region,
        name: &StackName,
    ) -> Result<Vec<StackOutput>, ProvisionApiError> {
        let stack = self.describe_stack(region, name).await?;

        let outputs = stack
            .outputs()
            .iter()
            .filter_map(|o| {
                Some(StackOutput {
                    key: o.output_key()?.to_string(),
                    value: o.output_value()?.to_string(),
                })
            })
            .collect();

        Ok(outputs)
    }
}

impl AwsCloud {
    async fn describe_stack(
        &self,
        region: &Region,
        name: &StackName,
    ) -> Result<aws_sdk_cloudformation::types::Stack, ProvisionApiError> {
        let clients = self.clients_for(region).await;

        let response = clients
            .cloudformation
            .describe_stacks()
            .stack_name(name.as_str())
            .send()
            .await
            .map_err(|e| map_cfn_error(name, e.into_service_error().to_string()))?;

        response
            .stacks()
            .first()
            .cloned()
            .ok_or_else(|| ProvisionApiError::NotFound(name.to_string()))
    }
}

#[async_trait::async_trait]
impl StorageOps for AwsCloud {
    async fn put_file(
        &self,
        region: &Region,
        bucket: &BucketName,
        key: &str,
        path: &Path,
    ) -> Result<(), StorageError> {
        let clients = self.clients_for(region).await;

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::LocalRead {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        clients
            .s3
            .put_object()
            .bucket(bucket.as_str())
            .key(key)
            .body(body)
            .content_type(content_type_for(key))
            .send()
            .await
            .map_err(|e| map_s3_error(bucket, e.into_service_error().to_string()))?;

        tracing::debug!(%bucket, %region, key, "uploaded object");
        Ok(())
    }
}

/// Collapse the provider's status vocabulary into the pipeline's.
/// Anything rolled back or deleted counts as failed for a deployment.
fn map_status(status: &CfnStatus) -> StackStatus {
    match status {
        CfnStatus::CreateComplete | CfnStatus::UpdateComplete => StackStatus::Complete,
        CfnStatus::CreateInProgress
        | CfnStatus::UpdateInProgress
        | CfnStatus::UpdateCompleteCleanupInProgress
        | CfnStatus::ReviewInProgress => StackStatus::InProgress,
        CfnStatus::CreateFailed
        | CfnStatus::UpdateFailed
        | CfnStatus::RollbackComplete
        | CfnStatus::RollbackFailed
        | CfnStatus::RollbackInProgress
        | CfnStatus::UpdateRollbackComplete
        | CfnStatus::UpdateRollbackFailed
        | CfnStatus::UpdateRollbackInProgress
        | CfnStatus::DeleteComplete
        | CfnStatus::DeleteFailed
        | CfnStatus::DeleteInProgress => StackStatus::Failed,
        _ => StackStatus::Pending,
    }
}

/// CloudFormation reports a missing stack as a validation error with a
/// "does not exist" message rather than a typed variant, so classify by
/// message text.
fn map_cfn_error(name: &StackName, message: String) -> ProvisionApiError {
    if message.contains("does not exist") {
        ProvisionApiError::NotFound(name.to_string())
    } else if message.contains("AlreadyExists") {
        ProvisionApiError::AlreadyExists(name.to_string())
    } else if message.contains("Template") {
        ProvisionApiError::InvalidTemplate(message)
    } else {
        ProvisionApiError::Api(message)
    }
}

fn map_s3_error(bucket: &BucketName, message: String) -> StorageError {
    if message.contains("NoSuchBucket") {
        StorageError::BucketNotFound(bucket.to_string())
    } else if message.contains("AccessDenied") {
        StorageError::AccessDenied(bucket.to_string())
    } else {
        StorageError::Api(message)
    }
}

fn content_type_for(key: &str) -> &'static str {
    match key.rsplit_once('.').map(|(_, ext)| ext) {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
