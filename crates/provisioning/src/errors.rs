//! Provisioning engine error types.

use thiserror::Error;

/// Errors surfaced by a provisioning engine while declaring resources.
///
/// An engine owns all diffing, creation, and lifecycle concerns; the only
/// failures this crate models are a declaration the engine rejected and a
/// declaration whose properties do not match the declared resource kind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Failed to declare {kind} '{name}': {reason}")]
    DeclarationFailed {
        kind: String,
        name: String,
        reason: String,
    },

    #[error("Properties for '{name}' do not describe a {kind} resource")]
    PropertyMismatch { kind: String, name: String },
}

/// Result type alias for provisioning operations.
pub type EngineResult<T> = Result<T, EngineError>;
