// ABOUTME: Validated AWS region identifier.
// ABOUTME: Accepts lowercase alphanumeric labels separated by hyphens, e.g. us-east-1.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("region cannot be empty")]
    Empty,

    #[error("region cannot start or end with a hyphen")]
    EdgeHyphen,

    #[error("invalid character in region: '{0}'")]
    InvalidChar(char),
}

/// A cloud region identifier such as `us-east-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Region(String);

impl Region {
    pub fn new(value: &str) -> Result<Self, RegionError> {
        if value.is_empty() {
            return Err(RegionError::Empty);
        }

        if value.starts_with('-') || value.ends_with('-') {
            return Err(RegionError::EdgeHyphen);
        }

        for c in value.chars() {
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(RegionError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Region::new(&value).map_err(serde::de::Error::custom)
    }
}
