// ABOUTME: Recording fakes for the cloud capability traits.
// ABOUTME: Let pipeline tests assert call ordering without touching real services.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use stratos::cloud::{
    ProvisionApiError, ProvisionOps, StackOutput, StackStatus, StorageError, StorageOps,
};
use stratos::deploy::{ENTRY_URL_OUTPUT, WEBSITE_URL_OUTPUT};
use stratos::types::{BucketName, Region, StackName};
use stratos::verifier::{VerifierOps, VerifierReport, VerifyError};

/// One recorded call against the fake cloud, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloudCall {
    CreateStack { region: String, stack: String },
    UpdateStack { region: String, stack: String },
    StackStatus { region: String, stack: String },
    StackOutputs { region: String, stack: String },
    PutFile { region: String, bucket: String, key: String },
}

impl CloudCall {
    pub fn region(&self) -> &str {
        match self {
            CloudCall::CreateStack { region, .. }
            | CloudCall::UpdateStack { region, .. }
            | CloudCall::StackStatus { region, .. }
            | CloudCall::StackOutputs { region, .. }
            | CloudCall::PutFile { region, .. } => region,
        }
    }
}

/// Fake provisioning + storage backend recording every call.
///
/// Defaults: stacks complete on the first status poll, every region
/// exports the standard output pair, and all uploads succeed.
pub struct FakeCloud {
    calls: Mutex<Vec<CloudCall>>,
    statuses: Mutex<VecDeque<StackStatus>>,
    region_outputs: Mutex<HashMap<String, Vec<StackOutput>>>,
    default_outputs: Vec<StackOutput>,
    fail_create_in: Option<String>,
    fail_put_key: Option<String>,
}

pub fn outputs(entries: &[(&str, &str)]) -> Vec<StackOutput> {
    entries
        .iter()
        .map(|(k, v)| StackOutput {
            key: k.to_string(),
            value: v.to_string(),
        })
        .collect()
}

impl FakeCloud {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            statuses: Mutex::new(VecDeque::new()),
            region_outputs: Mutex::new(HashMap::new()),
            default_outputs: outputs(&[
                (ENTRY_URL_OUTPUT, "https://d111.cloudfront.net"),
                (
                    WEBSITE_URL_OUTPUT,
                    "http://mybucket.s3-website-us-east-1.amazonaws.com",
                ),
            ]),
            fail_create_in: None,
            fail_put_key: None,
        }
    }

    /// Replace the status sequence returned by consecutive polls. The
    /// final entry repeats once the queue drains.
    pub fn with_statuses(self, statuses: &[StackStatus]) -> Self {
        *self.statuses.lock() = statuses.iter().copied().collect();
        self
    }

    /// Replace the default output set for every region.
    pub fn with_outputs(self, entries: &[(&str, &str)]) -> Self {
        Self {
            default_outputs: outputs(entries),
            ..self
        }
    }

    /// Override the output set for one region only.
    pub fn with_region_outputs(self, region: &str, entries: &[(&str, &str)]) -> Self {
        self.region_outputs
            .lock()
            .insert(region.to_string(), outputs(entries));
        self
    }

    /// Reject stack creation in the given region.
    pub fn fail_create_in(self, region: &str) -> Self {
        Self {
            fail_create_in: Some(region.to_string()),
            ..self
        }
    }

    /// Reject the upload of the given key.
    pub fn fail_put(self, key: &str) -> Self {
        Self {
            fail_put_key: Some(key.to_string()),
            ..self
        }
    }

    pub fn calls(&self) -> Vec<CloudCall> {
        self.calls.lock().clone()
    }

    /// The recorded PutFile calls, as (bucket, key) pairs in order.
    pub fn puts(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                CloudCall::PutFile { bucket, key, .. } => Some((bucket.clone(), key.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn status_polls(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, CloudCall::StackStatus { .. }))
            .count()
    }

    fn record(&self, call: CloudCall) {
        self.calls.lock().push(call);
    }
}

impl Default for FakeCloud {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProvisionOps for FakeCloud {
    async fn create_stack(
        &self,
        region: &Region,
        name: &StackName,
        _template_body: &str,
    ) -> Result<(), ProvisionApiError> {
        self.record(CloudCall::CreateStack {
            region: region.to_string(),
            stack: name.to_string(),
        });

        match &self.fail_create_in {
            Some(r) if r == region.as_str() => {
                Err(ProvisionApiError::Api("create rejected".to_string()))
            }
            _ => Ok(()),
        }
    }

    async fn update_stack(
        &self,
        region: &Region,
        name: &StackName,
        _template_body: &str,
    ) -> Result<(), ProvisionApiError> {
        self.record(CloudCall::UpdateStack {
            region: region.to_string(),
            stack: name.to_string(),
        });
        Ok(())
    }

    async fn stack_status(
        &self,
        region: &Region,
        name: &StackName,
    ) -> Result<StackStatus, ProvisionApiError> {
        self.record(CloudCall::StackStatus {
            region: region.to_string(),
            stack: name.to_string(),
        });

        let mut statuses = self.statuses.lock();
        let status = if statuses.len() > 1 {
            statuses.pop_front().expect("queue is non-empty")
        } else {
            statuses.front().copied().unwrap_or(StackStatus::Complete)
        };
        Ok(status)
    }

    async fn stack_outputs(
        &self,
        region: &Region,
        name: &StackName,
    ) -> Result<Vec<StackOutput>, ProvisionApiError> {
        self.record(CloudCall::StackOutputs {
            region: region.to_string(),
            stack: name.to_string(),
        });

        let by_region = self.region_outputs.lock();
        Ok(by_region
            .get(region.as_str())
            .cloned()
            .unwrap_or_else(|| self.default_outputs.clone()))
    }
}

#[async_trait]
impl StorageOps for FakeCloud {
    async fn put_file(
        &self,
        region: &Region,
        bucket: &BucketName,
        key: &str,
        _path: &Path,
    ) -> Result<(), StorageError> {
        self.record(CloudCall::PutFile {
            region: region.to_string(),
            bucket: bucket.to_string(),
            key: key.to_string(),
        });

        match &self.fail_put_key {
            Some(k) if k == key => Err(StorageError::Api("upload rejected".to_string())),
            _ => Ok(()),
        }
    }
}

/// Fake verifier recording the URLs it was asked to check.
pub struct FakeVerifier {
    urls: Mutex<Vec<String>>,
    succeed: bool,
}

impl FakeVerifier {
    pub fn passing() -> Self {
        Self {
            urls: Mutex::new(Vec::new()),
            succeed: true,
        }
    }

    pub fn failing() -> Self {
        Self {
            urls: Mutex::new(Vec::new()),
            succeed: false,
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

#[async_trait]
impl VerifierOps for FakeVerifier {
    async fn verify(&self, entry_url: &str) -> Result<VerifierReport, VerifyError> {
        self.urls.lock().push(entry_url.to_string());
        Ok(VerifierReport {
            success: self.succeed,
            exit_code: Some(if self.succeed { 0 } else { 1 }),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}
