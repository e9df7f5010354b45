// ABOUTME: Validated S3 bucket name, derivable from a website endpoint URL.
// ABOUTME: The derivation replaces the unguarded split the aws CLI output used to get.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BucketNameError {
    #[error("bucket name cannot be empty")]
    Empty,

    #[error("invalid character in bucket name: '{0}'")]
    InvalidChar(char),

    #[error("website URL has no protocol prefix: {0}")]
    MissingProtocol(String),

    #[error("website URL has no host: {0}")]
    MissingHost(String),
}

/// An S3 bucket name, used as the upload destination for site assets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    pub fn new(value: &str) -> Result<Self, BucketNameError> {
        if value.is_empty() {
            return Err(BucketNameError::Empty);
        }

        for c in value.chars() {
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' && c != '.' {
                return Err(BucketNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    /// Derive the bucket name from an S3 website endpoint URL.
    ///
    /// The bucket is the first DNS label of the host, e.g.
    /// `http://mybucket.s3-website-us-east-1.amazonaws.com/` -> `mybucket`.
    pub fn from_website_url(url: &str) -> Result<Self, BucketNameError> {
        let rest = url
            .split_once("//")
            .map(|(_, rest)| rest)
            .ok_or_else(|| BucketNameError::MissingProtocol(url.to_string()))?;

        let label = rest
            .split(['.', '/'])
            .next()
            .filter(|label| !label.is_empty())
            .ok_or_else(|| BucketNameError::MissingHost(url.to_string()))?;

        Self::new(label)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
