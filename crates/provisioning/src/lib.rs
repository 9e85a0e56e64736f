//! Resource declaration surface for BuildFleet.
//!
//! The provisioning engine, the external system that tracks resource state,
//! computes create/update/delete plans, and talks to the cloud, sits behind
//! the single-operation [`ResourceEngine`] trait defined here. This crate
//! also carries the typed property payloads for every resource kind a fleet
//! declares (build projects, webhooks, IAM plumbing, event rules and
//! targets) and a [`RecordingEngine`] that captures declarations in memory
//! for tests and plan inspection.

pub mod engine;
pub mod errors;
pub mod iam;
pub mod recording;
pub mod resources;

// Re-export for convenient access
pub use engine::{ResourceEngine, ResourceHandle, ResourceKind, ResourceProperties};
pub use errors::{EngineError, EngineResult};
pub use iam::{assume_role_policy_for_service, PolicyDocument, PolicyStatement, Principal};
pub use recording::{DeclaredResource, RecordingEngine};
pub use resources::{
    BuildProjectProperties, ComputeType, EnvironmentVariable, EventRuleProperties,
    EventTargetProperties, FunctionProperties, ProjectArtifacts, ProjectEnvironment,
    ProjectSource, RolePolicyAttachmentProperties, RolePolicyProperties, RoleProperties,
    WebhookFilter, WebhookFilterGroup, WebhookFilterType, WebhookProperties,
};
