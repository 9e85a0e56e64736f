//! The consumed CloudWatch event schema.
//!
//! These types model the `CodeBuild Build State Change` payload as the event
//! bus delivers it. The schema is owned by the event source, not by this
//! crate; field names are the wire's kebab-case names and unknown fields are
//! ignored. Only the pieces the dispatcher and callbacks need are typed;
//! anything deeper stays `serde_json::Value`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use build_config::BuildStatus;

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;

/// Event source field of build state change events.
pub const EVENT_SOURCE: &str = "aws.codebuild";

/// Detail-type field of build state change events.
pub const BUILD_STATE_CHANGE_DETAIL_TYPE: &str = "CodeBuild Build State Change";

/// The envelope the event bus wraps every delivered event in.
///
/// `detail` is kept raw; the dispatcher deserializes it into
/// [`BuildStateChangeDetail`] when the event is handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRuleEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub id: String,

    #[serde(rename = "detail-type")]
    pub detail_type: String,

    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,

    pub detail: serde_json::Value,
}

/// Build lifecycle phase identifiers, including the terminal `COMPLETED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseKind {
    Submitted,
    Queued,
    Provisioning,
    DownloadSource,
    Install,
    PreBuild,
    Build,
    PostBuild,
    UploadArtifacts,
    Finalizing,
    Completed,
}

/// Outcome status of one build phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseStatus {
    Failed,
    Fault,
    InProgress,
    Queued,
    Stopped,
    Succeeded,
    TimedOut,
}

/// Marker for the terminal phase record, which carries `phase-type:
/// "COMPLETED"` and nothing but an optional start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletedMarker {
    #[serde(rename = "COMPLETED")]
    Completed,
}

/// The terminal entry of a phase history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CompletedPhase {
    pub phase_type: CompletedMarker,

    /// E.g. `Sep 1, 2017 4:12:29 PM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
}

/// A non-terminal entry of a phase history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildPhase {
    pub phase_type: PhaseKind,
    pub phase_status: PhaseStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phase_context: Vec<serde_json::Value>,

    /// E.g. `Sep 1, 2017 4:12:29 PM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_seconds: Option<f64>,
}

/// One entry of a build's phase history.
///
/// Terminal entries carry only the `COMPLETED` marker; everything else is a
/// full [`BuildPhase`] record. The untagged representation tries the
/// terminal shape first, so a record with a phase status always lands in
/// [`Phase::InFlight`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Phase {
    Completed(CompletedPhase),
    InFlight(BuildPhase),
}

/// Artifact summary of a finished build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub md5sum: String,
    pub sha256sum: String,
    pub location: String,
}

/// Environment the build ran in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EnvironmentInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileged_mode: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_type: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub environment_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_variables: Option<Vec<serde_json::Value>>,
}

/// Input source reference of the build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
}

/// Log stream references of the build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LogsInfo {
    pub group_name: String,
    pub stream_name: String,
    pub deep_link: String,
}

/// The `additional-information` block of a state change detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdditionalInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<ArtifactInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_in_minutes: Option<u32>,

    #[serde(default)]
    pub build_complete: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiator: Option<String>,

    /// E.g. `Sep 1, 2017 4:12:29 PM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<LogsInfo>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phases: Vec<Phase>,
}

/// The detail payload of a `CodeBuild Build State Change` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildStateChangeDetail {
    pub build_status: BuildStatus,

    /// Name of the build project the state change belongs to. This is the
    /// dispatch key: it matches the static name of one declared build
    /// configuration.
    pub project_name: String,

    /// Build ARN, e.g.
    /// `arn:aws:codebuild:us-west-2:123456789012:build/my-sample-project:8745a7a9-...`.
    pub build_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<AdditionalInformation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<PhaseKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_phase_context: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// What a subscription callback receives: the envelope plus the parsed
/// detail.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionEvent {
    pub event: EventRuleEvent,
    pub detail: BuildStateChangeDetail,
}
