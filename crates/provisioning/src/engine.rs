//! The narrow interface between fleet composition and the provisioning
//! engine.
//!
//! Everything the fleet does to the cloud funnels through one operation:
//! [`ResourceEngine::declare`]. The engine behind the trait owns state
//! tracking, diffing, and create/update/delete plans; callers only describe
//! the resources that should exist and receive opaque handles back. This
//! keeps the resolver and grouper logic testable without a live backend;
//! see [`crate::RecordingEngine`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::EngineResult;
use crate::resources::{
    BuildProjectProperties, EventRuleProperties, EventTargetProperties, FunctionProperties,
    RolePolicyAttachmentProperties, RolePolicyProperties, RoleProperties, WebhookProperties,
};

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

/// The kinds of resource a fleet declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Logical grouping node that parents every other resource of a fleet.
    Component,
    BuildProject,
    Webhook,
    Role,
    RolePolicy,
    RolePolicyAttachment,
    Function,
    EventRule,
    EventTarget,
}

impl ResourceKind {
    /// Returns a stable name for the kind, used in handle ids and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Component => "component",
            ResourceKind::BuildProject => "build-project",
            ResourceKind::Webhook => "webhook",
            ResourceKind::Role => "role",
            ResourceKind::RolePolicy => "role-policy",
            ResourceKind::RolePolicyAttachment => "role-policy-attachment",
            ResourceKind::Function => "function",
            ResourceKind::EventRule => "event-rule",
            ResourceKind::EventTarget => "event-target",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-tagged declaration payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResourceProperties {
    Component,
    BuildProject(BuildProjectProperties),
    Webhook(WebhookProperties),
    Role(RoleProperties),
    RolePolicy(RolePolicyProperties),
    RolePolicyAttachment(RolePolicyAttachmentProperties),
    Function(FunctionProperties),
    EventRule(EventRuleProperties),
    EventTarget(EventTargetProperties),
}

impl ResourceProperties {
    /// The resource kind this payload describes.
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceProperties::Component => ResourceKind::Component,
            ResourceProperties::BuildProject(_) => ResourceKind::BuildProject,
            ResourceProperties::Webhook(_) => ResourceKind::Webhook,
            ResourceProperties::Role(_) => ResourceKind::Role,
            ResourceProperties::RolePolicy(_) => ResourceKind::RolePolicy,
            ResourceProperties::RolePolicyAttachment(_) => ResourceKind::RolePolicyAttachment,
            ResourceProperties::Function(_) => ResourceKind::Function,
            ResourceProperties::EventRule(_) => ResourceKind::EventRule,
            ResourceProperties::EventTarget(_) => ResourceKind::EventTarget,
        }
    }
}

/// Opaque reference to a declared resource.
///
/// Handles are how declarations refer to each other (a policy to its role, a
/// target to its rule) and how a parent/child hierarchy is expressed. The
/// `id` is engine-assigned and meaningful only to that engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHandle {
    /// Engine-assigned identifier.
    pub id: String,

    pub kind: ResourceKind,

    /// The caller-chosen declaration name.
    pub name: String,
}

/// A provisioning engine: the external collaborator that turns declarations
/// into cloud state.
///
/// # Examples
///
/// ```rust
/// use provisioning::{RecordingEngine, ResourceEngine, ResourceKind, ResourceProperties};
///
/// # async fn example() -> Result<(), provisioning::EngineError> {
/// let engine = RecordingEngine::new();
/// let root = engine
///     .declare(ResourceKind::Component, "fleet", ResourceProperties::Component, None)
///     .await?;
/// assert_eq!(root.kind, ResourceKind::Component);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ResourceEngine: Send + Sync {
    /// Declares that a resource of `kind` with `name` and `properties`
    /// should exist, optionally parented under another declared resource.
    ///
    /// Declaring is idempotent from the caller's point of view: the same
    /// inputs on a later run describe the same resource, and reconciling the
    /// difference is the engine's job.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError`] when the engine rejects the
    /// declaration.
    async fn declare(
        &self,
        kind: ResourceKind,
        name: &str,
        properties: ResourceProperties,
        parent: Option<&ResourceHandle>,
    ) -> EngineResult<ResourceHandle>;
}
