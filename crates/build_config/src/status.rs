//! Build outcome statuses and canonical status sets.
//!
//! CodeBuild reports a build's overall outcome through a fixed status
//! vocabulary. Subscriptions select the subset of statuses they care about;
//! that subset is always normalized to a canonical (sorted, deduplicated)
//! form before it is compared or used as a grouping key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;

/// Overall outcome status of a CodeBuild build.
///
/// Serialized in the SCREAMING_SNAKE_CASE form used by the CloudWatch
/// `CodeBuild Build State Change` event payload.
///
/// # Examples
///
/// ```rust
/// use build_config::BuildStatus;
///
/// let status: BuildStatus = "FAILED".parse().unwrap();
/// assert_eq!(status, BuildStatus::Failed);
/// assert_eq!(status.as_str(), "FAILED");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
    /// The build failed.
    Failed,
    /// The build faulted.
    Fault,
    /// The build is still in progress.
    InProgress,
    /// The build was stopped.
    Stopped,
    /// The build succeeded.
    Succeeded,
    /// The build timed out.
    TimedOut,
}

impl BuildStatus {
    /// Returns the wire-format name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::Failed => "FAILED",
            BuildStatus::Fault => "FAULT",
            BuildStatus::InProgress => "IN_PROGRESS",
            BuildStatus::Stopped => "STOPPED",
            BuildStatus::Succeeded => "SUCCEEDED",
            BuildStatus::TimedOut => "TIMED_OUT",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildStatus {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FAILED" => Ok(BuildStatus::Failed),
            "FAULT" => Ok(BuildStatus::Fault),
            "IN_PROGRESS" => Ok(BuildStatus::InProgress),
            "STOPPED" => Ok(BuildStatus::Stopped),
            "SUCCEEDED" => Ok(BuildStatus::Succeeded),
            "TIMED_OUT" => Ok(BuildStatus::TimedOut),
            other => Err(ConfigError::InvalidConfiguration {
                field: "status".to_string(),
                reason: format!("'{}' is not a known build status", other),
            }),
        }
    }
}

/// Normalizes a status list to its canonical form: sorted and deduplicated.
///
/// Two status lists describe the same status set exactly when their
/// canonical forms are element-wise equal, so this is the grouping key used
/// whenever subscriptions are partitioned by status set.
///
/// # Examples
///
/// ```rust
/// use build_config::{canonical_status_set, BuildStatus};
///
/// let canonical = canonical_status_set(&[
///     BuildStatus::Stopped,
///     BuildStatus::Failed,
///     BuildStatus::Stopped,
/// ]);
/// assert_eq!(canonical, vec![BuildStatus::Failed, BuildStatus::Stopped]);
/// ```
pub fn canonical_status_set(statuses: &[BuildStatus]) -> Vec<BuildStatus> {
    let mut canonical = statuses.to_vec();
    canonical.sort();
    canonical.dedup();
    canonical
}
