//! Fleet manifest loading.
//!
//! A fleet can be described in a single TOML manifest:
//!
//! ```text
//! [defaults.params]
//! branch = "main"
//!
//! [subscriptions]
//! config = { channel = "#builds" }
//!
//! [subscriptions.build_types.ci]
//! status = ["FAILED"]
//!
//! [[projects]]
//! name = "billing-service"
//!
//! [[projects]]
//! name = "api-gateway"
//! [projects.subscriptions.ci]
//! status = ["FAILED", "STOPPED"]
//! ```
//!
//! The manifest is purely a convenience for callers that prefer files over
//! building the structures in code; both paths produce identical inputs to
//! the resolver.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ConfigError, ConfigResult};
use crate::project_spec::{ProjectDefaults, ProjectSpec};
use crate::subscriptions::SubscriptionDefaults;

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;

/// A whole fleet description: defaults, projects, and optional subscription
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetManifest {
    /// Fleet-wide project defaults.
    #[serde(default)]
    pub defaults: ProjectDefaults,

    /// The projects in the fleet.
    #[serde(default)]
    pub projects: Vec<ProjectSpec>,

    /// Subscription defaults; absent when the fleet requests no
    /// notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriptions: Option<SubscriptionDefaults>,
}

impl FleetManifest {
    /// Parses a manifest from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] when the content is not valid
    /// TOML or does not match the manifest shape.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            reason: e.to_string(),
        })
    }

    /// Loads a manifest from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileNotFound`] when the file does not exist,
    /// [`ConfigError::FileAccessError`] when it cannot be read, and
    /// [`ConfigError::ParseError`] when its content does not parse.
    pub fn load_from_path(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileAccessError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let manifest = Self::from_toml_str(&content)?;
        debug!(
            path = %path.display(),
            projects = manifest.projects.len(),
            "loaded fleet manifest"
        );
        Ok(manifest)
    }
}
