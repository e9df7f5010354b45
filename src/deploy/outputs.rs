// ABOUTME: Resolution of stack outputs into the values later stages need.
// ABOUTME: Selects the entry URL and derives the bucket with a checked parse.

use crate::cloud::StackOutput;
use crate::types::{BucketName, BucketNameError};
use thiserror::Error;

/// Output key under which the stack exports the CDN entry domain.
pub const ENTRY_URL_OUTPUT: &str = "CloudFrontDistributionDomainName";

/// Output key under which the stack exports the website endpoint URL.
pub const WEBSITE_URL_OUTPUT: &str = "WebsiteURL";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("stack exports no output named {0}")]
    MissingOutput(&'static str),

    #[error("website URL output is malformed: {0}")]
    MalformedWebsiteUrl(#[from] BucketNameError),
}

/// The two values the pipeline consumes from a provisioned stack:
/// the entry endpoint URL and the derived upload bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOutputs {
    entry_url: String,
    bucket: BucketName,
}

impl StackOutputs {
    /// Resolve the raw exported output set.
    ///
    /// The bucket is not exported directly; it is derived from the
    /// website URL's first host label.
    pub fn from_raw(raw: &[StackOutput]) -> Result<Self, OutputError> {
        let entry_url = select(raw, ENTRY_URL_OUTPUT)?;
        let website_url = select(raw, WEBSITE_URL_OUTPUT)?;
        let bucket = BucketName::from_website_url(website_url)?;

        Ok(Self {
            entry_url: entry_url.to_string(),
            bucket,
        })
    }

    pub fn entry_url(&self) -> &str {
        &self.entry_url
    }

    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }
}

fn select<'a>(raw: &'a [StackOutput], key: &'static str) -> Result<&'a str, OutputError> {
    raw.iter()
        .find(|o| o.key == key)
        .map(|o| o.value.as_str())
        .ok_or(OutputError::MissingOutput(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: &[(&str, &str)]) -> Vec<StackOutput> {
        entries
            .iter()
            .map(|(k, v)| StackOutput {
                key: k.to_string(),
                value: v.to_string(),
            })
            .collect()
    }

    #[test]
    fn resolves_entry_url_and_derives_bucket() {
        let outputs = StackOutputs::from_raw(&raw(&[
            (ENTRY_URL_OUTPUT, "https://d111.cloudfront.net"),
            (
                WEBSITE_URL_OUTPUT,
                "http://mybucket.s3-website-us-east-1.amazonaws.com/",
            ),
        ]))
        .unwrap();

        assert_eq!(outputs.entry_url(), "https://d111.cloudfront.net");
        assert_eq!(outputs.bucket().as_str(), "mybucket");
    }

    #[test]
    fn missing_entry_url_is_an_error() {
        let err = StackOutputs::from_raw(&raw(&[(
            WEBSITE_URL_OUTPUT,
            "http://mybucket.example.com/",
        )]))
        .unwrap_err();

        assert!(matches!(err, OutputError::MissingOutput(ENTRY_URL_OUTPUT)));
    }

    #[test]
    fn missing_website_url_is_an_error() {
        let err = StackOutputs::from_raw(&raw(&[(ENTRY_URL_OUTPUT, "https://d111.cloudfront.net")]))
            .unwrap_err();

        assert!(matches!(err, OutputError::MissingOutput(WEBSITE_URL_OUTPUT)));
    }

    #[test]
    fn website_url_without_protocol_is_an_error() {
        let err = StackOutputs::from_raw(&raw(&[
            (ENTRY_URL_OUTPUT, "https://d111.cloudfront.net"),
            (WEBSITE_URL_OUTPUT, "mybucket.example.com"),
        ]))
        .unwrap_err();

        assert!(matches!(err, OutputError::MalformedWebsiteUrl(_)));
    }
}
