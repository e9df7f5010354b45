// ABOUTME: Per-run deployment identifier derived from the wall clock.
// ABOUTME: Generated once at process start and shared read-only by every stage.

use chrono::Utc;
use std::fmt;

/// Identifies one deployment run. Stack names embed this value, so two
/// runs generated within the same millisecond would target the same
/// stack name. The id is immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeploymentId(String);

impl DeploymentId {
    /// Generate an id from the current wall-clock time.
    pub fn generate() -> Self {
        Self::from_timestamp_millis(Utc::now().timestamp_millis())
    }

    /// Build an id from an explicit timestamp. Used by `generate` and by
    /// tests that need to control the clock.
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
