//! Typed property payloads for every resource kind the fleet declares.
//!
//! These are declaration inputs, not cloud state: an engine receives one of
//! these payloads through [`crate::ResourceEngine::declare`] and owns
//! everything from there. The field surface is deliberately limited to what
//! fleet provisioning needs; it is not a complete model of the underlying
//! cloud schemas.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::iam::PolicyDocument;

#[cfg(test)]
#[path = "resources_tests.rs"]
mod tests;

/// Compute size of a build environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComputeType {
    BuildGeneral1Small,
    BuildGeneral1Medium,
    BuildGeneral1Large,
}

/// One environment variable of a build environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

/// Source location of a build project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSource {
    /// Source type, e.g. `GITHUB` or `CODEPIPELINE`.
    #[serde(rename = "type")]
    pub source_type: String,

    /// Repository or bucket location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Inline buildspec or path to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buildspec: Option<String>,
}

/// Execution environment of a build project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEnvironment {
    pub compute_type: ComputeType,

    /// Builder image, e.g. `aws/codebuild/standard:7.0`.
    pub image: String,

    /// Environment type, e.g. `LINUX_CONTAINER`.
    #[serde(rename = "type")]
    pub environment_type: String,

    #[serde(default)]
    pub privileged_mode: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment_variables: Vec<EnvironmentVariable>,
}

/// Artifact configuration of a build project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectArtifacts {
    /// Artifact type, e.g. `NO_ARTIFACTS` or `S3`.
    #[serde(rename = "type")]
    pub artifacts_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Declaration payload for one build project.
///
/// The name is static and caller-chosen; the fleet derives it from the
/// project name and build type, and event subscriptions later key on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildProjectProperties {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// ARN of the role builds run under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_role: Option<String>,

    pub source: ProjectSource,
    pub environment: ProjectEnvironment,
    pub artifacts: ProjectArtifacts,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_timeout_minutes: Option<u32>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

/// The field a webhook filter matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebhookFilterType {
    Event,
    HeadRef,
    BaseRef,
    FilePath,
    CommitMessage,
    ActorAccountId,
}

/// One filter of a webhook filter group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookFilter {
    #[serde(rename = "type")]
    pub filter_type: WebhookFilterType,

    /// Pattern the field must match, e.g. `PUSH` or `^refs/heads/main$`.
    pub pattern: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_matched_pattern: Option<bool>,
}

/// A conjunction of webhook filters; a webhook fires when any one of its
/// groups matches completely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookFilterGroup {
    pub filters: Vec<WebhookFilter>,
}

/// Declaration payload for a build project webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookProperties {
    /// Name of the build project the webhook triggers.
    pub project_name: String,

    pub filter_groups: Vec<WebhookFilterGroup>,
}

/// Declaration payload for an IAM role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleProperties {
    pub assume_role_policy: PolicyDocument,
}

/// Declaration payload for an inline role policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePolicyProperties {
    /// Handle id of the role the policy attaches to.
    pub role: String,

    pub policy: PolicyDocument,
}

/// Declaration payload for a managed policy attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePolicyAttachmentProperties {
    /// Handle id of the role the policy attaches to.
    pub role: String,

    /// ARN of the managed policy.
    pub policy_arn: String,
}

/// Declaration payload for the shared notification handler function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionProperties {
    /// Handle id of the execution role.
    pub role: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Declaration payload for an event-pattern-matching rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRuleProperties {
    /// The event pattern, as the JSON document the event bus matches on.
    pub event_pattern: serde_json::Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Declaration payload connecting an event rule to a handler function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTargetProperties {
    /// Handle id of the rule.
    pub rule: String,

    /// Handle id of the handler function.
    pub function: String,
}
