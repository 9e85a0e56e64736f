//! Project specifications and the fleet-wide default layer.
//!
//! A fleet is described as a list of [`ProjectSpec`]s plus one
//! [`ProjectDefaults`] that supplies the values a project does not set
//! itself. Merging is shallow and field-by-field: a key present on the
//! project always wins over the default for that key, even when its value is
//! empty or null. There is no deep merging of individual values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::subscriptions::SubscriptionOverride;

#[cfg(test)]
#[path = "project_spec_tests.rs"]
mod tests;

/// Specification of one logical project in the fleet.
///
/// The `params` map carries the opaque, caller-defined build parameters the
/// build-setup strategy consumes (branch filters, buildspec paths, image
/// overrides, and so on); this crate never interprets them. The
/// `subscriptions` map carries per-build-type notification overrides.
///
/// Specs are immutable once handed to the resolver.
///
/// # Examples
///
/// ```rust
/// use build_config::ProjectSpec;
///
/// let spec: ProjectSpec = toml::from_str(
///     r#"
///     name = "billing-service"
///
///     [params]
///     repository = "example/billing-service"
///
///     [subscriptions.ci]
///     status = ["FAILED", "STOPPED"]
///     "#,
/// )
/// .unwrap();
/// assert_eq!(spec.name, "billing-service");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpec {
    /// Name of the project - used to derive the build configuration names.
    pub name: String,

    /// Opaque per-project parameters consumed by the build-setup strategy.
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,

    /// Per-build-type notification overrides.
    #[serde(default)]
    pub subscriptions: BTreeMap<String, SubscriptionOverride>,
}

/// Fleet-wide defaults applied underneath every [`ProjectSpec`].
///
/// Structurally a partial project spec: the same `params` and
/// `subscriptions` maps, without a name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDefaults {
    /// Default build parameters, overridden per-key by project params.
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,

    /// Default per-build-type notification overrides, overridden per
    /// build-type key by project subscriptions.
    #[serde(default)]
    pub subscriptions: BTreeMap<String, SubscriptionOverride>,
}

/// Merges fleet defaults and a project's own spec.
///
/// The merge is shallow: for each key of `params` and each build-type key of
/// `subscriptions`, an entry present on the project replaces the default
/// entry wholesale. Entries only the defaults define are kept. The project's
/// name is never defaulted.
///
/// # Examples
///
/// ```rust
/// use build_config::{merge_project_spec, ProjectDefaults, ProjectSpec};
/// use std::collections::BTreeMap;
///
/// let defaults = ProjectDefaults {
///     params: BTreeMap::from([
///         ("branch".to_string(), serde_json::json!("main")),
///         ("timeout".to_string(), serde_json::json!(30)),
///     ]),
///     subscriptions: BTreeMap::new(),
/// };
/// let project = ProjectSpec {
///     name: "api".to_string(),
///     params: BTreeMap::from([("branch".to_string(), serde_json::json!("develop"))]),
///     subscriptions: BTreeMap::new(),
/// };
///
/// let merged = merge_project_spec(&defaults, &project);
/// assert_eq!(merged.params["branch"], serde_json::json!("develop"));
/// assert_eq!(merged.params["timeout"], serde_json::json!(30));
/// ```
pub fn merge_project_spec(defaults: &ProjectDefaults, project: &ProjectSpec) -> ProjectSpec {
    let mut params = defaults.params.clone();
    for (key, value) in &project.params {
        params.insert(key.clone(), value.clone());
    }

    let mut subscriptions = defaults.subscriptions.clone();
    for (build_type, overrides) in &project.subscriptions {
        subscriptions.insert(build_type.clone(), overrides.clone());
    }

    ProjectSpec {
        name: project.name.clone(),
        params,
        subscriptions,
    }
}
