//! Configuration resolution: from project specs to concrete build
//! configurations and effective subscriptions.
//!
//! Resolution is a setup-time, synchronous, side-effect-free pass:
//!
//! 1. Fleet defaults are merged underneath each project spec
//!    (field-by-field, the project wins).
//! 2. The caller's [`BuildSetup`] strategy is invoked once per merged spec,
//!    producing the named build configurations for that project.
//! 3. Subscription overrides are validated against the strategy output: an
//!    override naming a build type the strategy did not produce is a
//!    configuration error, caught here before anything is declared.
//!
//! [`effective_subscriptions`] then derives the per-build-name subscription
//! tuples used both for event-rule grouping and for dispatch-time lookup.

use std::collections::BTreeMap;

use tracing::debug;

use build_config::{
    merge_project_spec, resolve_subscription_options, BuildStatus, ConfigError, ConfigResult,
    ProjectDefaults, ProjectSpec, SubscriptionDefaults, SubscriptionOverride,
};
use provisioning::{BuildProjectProperties, WebhookFilterGroup};

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

/// One named build configuration produced by the build-setup strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfiguration {
    /// The build project declaration, with its static name.
    pub build: BuildProjectProperties,

    /// Webhook trigger filters; `None` declares no webhook for this build.
    pub webhook_filter_groups: Option<Vec<WebhookFilterGroup>>,
}

/// The build-setup strategy: maps a merged project spec to its build
/// configurations, keyed by build-type key.
///
/// Returning an empty map is allowed and declares nothing for that project.
/// Implemented for any matching closure, so callers can pass a plain `fn` or
/// closure:
///
/// ```rust,ignore
/// let setup = |spec: &ProjectSpec| standard_builds(spec);
/// ```
pub trait BuildSetup {
    fn build_configurations(&self, spec: &ProjectSpec) -> BTreeMap<String, BuildConfiguration>;
}

impl<F> BuildSetup for F
where
    F: Fn(&ProjectSpec) -> BTreeMap<String, BuildConfiguration>,
{
    fn build_configurations(&self, spec: &ProjectSpec) -> BTreeMap<String, BuildConfiguration> {
        self(spec)
    }
}

/// A project after resolution: its merged spec and the build configurations
/// the strategy produced for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProject {
    /// The spec with fleet defaults merged in.
    pub spec: ProjectSpec,

    /// Build configurations keyed by build-type key.
    pub builds: BTreeMap<String, BuildConfiguration>,
}

/// The resolved subscription tuple for one project and build type.
///
/// Keyed by the build configuration's static name, which is what the
/// inbound event's `project-name` field carries. Only produced for non-empty
/// status sets; a subscription that resolves to an empty set joins no group
/// and receives no notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveSubscription {
    /// Static name of the build configuration; the dispatch lookup key.
    pub build_name: String,

    /// Build-type key within the owning project.
    pub build_type: String,

    /// Canonical (sorted, deduplicated) status set; the grouping key.
    pub status: Vec<BuildStatus>,

    /// The project's override for this build type, if any. Kept so that
    /// dispatch re-resolves options through the same merge function used
    /// here.
    pub project_override: Option<SubscriptionOverride>,
}

/// Resolves every project of the fleet.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownBuildType`] when a merged spec carries a
/// subscription override for a build type the strategy did not produce.
/// Stale overrides are rejected at setup time rather than silently ignored.
pub fn resolve_projects(
    projects: &[ProjectSpec],
    defaults: &ProjectDefaults,
    setup: &dyn BuildSetup,
) -> ConfigResult<Vec<ResolvedProject>> {
    let mut resolved = Vec::with_capacity(projects.len());
    for project in projects {
        let spec = merge_project_spec(defaults, project);
        let builds = setup.build_configurations(&spec);

        for build_type in spec.subscriptions.keys() {
            if !builds.contains_key(build_type) {
                return Err(ConfigError::UnknownBuildType {
                    project: spec.name.clone(),
                    build_type: build_type.clone(),
                });
            }
        }

        debug!(
            project = %spec.name,
            builds = builds.len(),
            "resolved project build configurations"
        );
        resolved.push(ResolvedProject { spec, builds });
    }
    Ok(resolved)
}

/// Derives the effective subscriptions of a resolved fleet.
///
/// One entry per project × build type whose resolved status set is
/// non-empty, in deterministic (project order, then build-type key) order.
pub fn effective_subscriptions(
    resolved: &[ResolvedProject],
    defaults: &SubscriptionDefaults,
) -> Vec<EffectiveSubscription> {
    let mut subscriptions = Vec::new();
    for project in resolved {
        for (build_type, configuration) in &project.builds {
            let overrides = project.spec.subscriptions.get(build_type);
            let options = resolve_subscription_options(defaults, build_type, overrides);
            if options.status.is_empty() {
                continue;
            }
            subscriptions.push(EffectiveSubscription {
                build_name: configuration.build.name.clone(),
                build_type: build_type.clone(),
                status: options.status,
                project_override: overrides.cloned(),
            });
        }
    }
    subscriptions
}
