// ABOUTME: Validated CloudFormation stack name.
// ABOUTME: Must start with a letter and contain only alphanumerics and hyphens.

use super::deployment_id::DeploymentId;
use std::fmt;
use thiserror::Error;

const MAX_STACK_NAME_LEN: usize = 128;

#[derive(Debug, Error)]
pub enum StackNameError {
    #[error("stack name cannot be empty")]
    Empty,

    #[error("stack name exceeds maximum length of {MAX_STACK_NAME_LEN} characters")]
    TooLong,

    #[error("stack name must start with a letter")]
    BadFirstChar,

    #[error("invalid character in stack name: '{0}'")]
    InvalidChar(char),
}

/// The name under which a stack is created and later addressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackName(String);

impl StackName {
    pub fn new(value: &str) -> Result<Self, StackNameError> {
        let mut chars = value.chars();
        match chars.next() {
            None => return Err(StackNameError::Empty),
            Some(c) if !c.is_ascii_alphabetic() => return Err(StackNameError::BadFirstChar),
            Some(_) => {}
        }

        if value.len() > MAX_STACK_NAME_LEN {
            return Err(StackNameError::TooLong);
        }

        for c in chars {
            if !c.is_ascii_alphanumeric() && c != '-' {
                return Err(StackNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    /// Compose the stack name for one deployment run: `<prefix>-<id>`.
    pub fn for_deployment(prefix: &str, id: &DeploymentId) -> Result<Self, StackNameError> {
        Self::new(&format!("{prefix}-{id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
