//! Fleet orchestration error types.

use thiserror::Error;

use build_config::ConfigError;
use provisioning::EngineError;

/// Boxed error type callbacks may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced while provisioning a fleet.
///
/// Setup-time failures are either configuration problems (surfaced before
/// any resource is declared) or declarations the provisioning engine
/// rejected. Partial-declaration recovery is the engine's concern, not ours.
#[derive(Error, Debug)]
pub enum FleetError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type alias for fleet operations.
pub type FleetResult<T> = Result<T, FleetError>;

/// Errors surfaced while dispatching one build-state-change event.
///
/// Each error is local to a single invocation; the event-delivery layer
/// decides whether to retry.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The event payload could not be read as a build state change.
    #[error("Event detail is not a build state change: {reason}")]
    InvalidDetail { reason: String },

    /// The inbound project name matches no effective subscription. Never
    /// swallowed: the event is surfaced as a failed invocation.
    #[error("No subscription matches project '{project}'")]
    UnknownProject { project: String },

    /// The user callback failed; propagated unchanged, with no retry layer.
    #[error("Subscription callback failed")]
    CallbackFailed {
        #[source]
        source: BoxError,
    },
}
