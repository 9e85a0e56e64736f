//! Configuration model for BuildFleet.
//!
//! This crate owns the data types a fleet is described with (project specs,
//! fleet-wide defaults, and subscription options) together with the two
//! merge operations the rest of the system relies on:
//!
//! - [`merge_project_spec`]: shallow, field-by-field merge of fleet defaults
//!   underneath one project's spec (the project always wins per key).
//! - [`resolve_subscription_options`]: the single options-merge function with
//!   precedence project override > build-type default > global config,
//!   applied independently for `status` and `config`.
//!
//! Everything here is plain data plus pure functions; declaring resources and
//! dispatching events live in `fleet_core`.

pub mod errors;
pub mod manifest;
pub mod project_spec;
pub mod status;
pub mod subscriptions;

// Re-export for convenient access
pub use errors::{ConfigError, ConfigResult};
pub use manifest::FleetManifest;
pub use project_spec::{merge_project_spec, ProjectDefaults, ProjectSpec};
pub use status::{canonical_status_set, BuildStatus};
pub use subscriptions::{
    resolve_subscription_options, BuildTypeSubscriptionDefaults, SubscriptionDefaults,
    SubscriptionOptions, SubscriptionOverride,
};
