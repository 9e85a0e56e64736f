//! Subscription option types and the single options-merge function.
//!
//! Notification behavior is configured in three layers:
//!
//! 1. A global callback `config` value shared by the whole fleet.
//! 2. Per-build-type defaults ([`BuildTypeSubscriptionDefaults`]): the status
//!    set and optional config for every project building that build type.
//! 3. Per-project overrides ([`SubscriptionOverride`]): optional status set
//!    and config for one project and build type.
//!
//! [`resolve_subscription_options`] is the only place these layers are
//! combined. Both the setup path (computing effective subscriptions for
//! grouping) and the dispatch path (building the options handed to the
//! callback) go through it, so the precedence (project override, then
//! build-type default, then global config, applied independently per field)
//! cannot diverge between the two.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::status::{canonical_status_set, BuildStatus};

#[cfg(test)]
#[path = "subscriptions_tests.rs"]
mod tests;

/// Per-project, per-build-type subscription override.
///
/// Both fields are optional and override the build-type defaults
/// independently: an override that sets only `status` keeps the default
/// `config`, and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionOverride {
    /// Statuses to notify on, replacing the build-type default status list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<BuildStatus>>,

    /// Opaque callback configuration, replacing the default config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

/// Default subscription options for one build type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildTypeSubscriptionDefaults {
    /// Statuses to notify on when a project does not override them.
    pub status: Vec<BuildStatus>,

    /// Optional build-type-level callback configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

/// Fleet-wide subscription defaults.
///
/// `config` is the global opaque value handed to the callback when neither
/// the build type nor the project overrides it. `build_types` keys the
/// per-build-type defaults by build-type key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionDefaults {
    /// Global callback configuration, the lowest-precedence config layer.
    #[serde(default)]
    pub config: serde_json::Value,

    /// Per-build-type default status sets and configs.
    #[serde(default)]
    pub build_types: BTreeMap<String, BuildTypeSubscriptionDefaults>,
}

/// Fully resolved subscription options, as handed to the callback.
///
/// The status list is always canonical (sorted, deduplicated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionOptions {
    /// Canonical set of statuses this subscription fires on.
    pub status: Vec<BuildStatus>,

    /// Opaque callback configuration.
    pub config: serde_json::Value,
}

/// Resolves the effective subscription options for one project and build
/// type.
///
/// Field-by-field precedence, highest first:
///
/// - `status`: project override, else build-type default, else empty.
/// - `config`: project override, else build-type default config, else the
///   global `defaults.config`.
///
/// An empty resolved status list means the subscription is inert: it joins
/// no status group and produces no event rule.
///
/// # Examples
///
/// ```rust
/// use build_config::{
///     resolve_subscription_options, BuildStatus, BuildTypeSubscriptionDefaults,
///     SubscriptionDefaults, SubscriptionOverride,
/// };
/// use std::collections::BTreeMap;
///
/// let defaults = SubscriptionDefaults {
///     config: serde_json::json!({"channel": "#builds"}),
///     build_types: BTreeMap::from([(
///         "ci".to_string(),
///         BuildTypeSubscriptionDefaults {
///             status: vec![BuildStatus::Failed],
///             config: None,
///         },
///     )]),
/// };
/// let overrides = SubscriptionOverride {
///     status: Some(vec![BuildStatus::Stopped, BuildStatus::Failed]),
///     config: None,
/// };
///
/// let options = resolve_subscription_options(&defaults, "ci", Some(&overrides));
/// assert_eq!(options.status, vec![BuildStatus::Failed, BuildStatus::Stopped]);
/// assert_eq!(options.config, serde_json::json!({"channel": "#builds"}));
/// ```
pub fn resolve_subscription_options(
    defaults: &SubscriptionDefaults,
    build_type: &str,
    overrides: Option<&SubscriptionOverride>,
) -> SubscriptionOptions {
    let build_type_defaults = defaults.build_types.get(build_type);

    let status = overrides
        .and_then(|o| o.status.as_deref())
        .or_else(|| build_type_defaults.map(|d| d.status.as_slice()))
        .unwrap_or(&[]);

    let config = overrides
        .and_then(|o| o.config.as_ref())
        .or_else(|| build_type_defaults.and_then(|d| d.config.as_ref()))
        .unwrap_or(&defaults.config);

    SubscriptionOptions {
        status: canonical_status_set(status),
        config: config.clone(),
    }
}
