//! Errors surfaced by `fire`.

use thiserror::Error;

/// Errors that can occur during a transition attempt.
///
/// The engine itself only produces `InvalidEvent` and `PendingTransition`,
/// both before any bookkeeping or hook has run. Anything a hook returns is
/// handed back to the caller unchanged after the attempt is reverted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Event '{event}' is not valid in state '{state}'")]
    InvalidEvent { event: String, state: String },

    #[error("Event '{event}' rejected: previous transition pending in state '{state}'")]
    PendingTransition { event: String, state: String },

    #[error("Hook '{hook}' failed: {message}")]
    HookFailed { hook: String, message: String },
}

impl TransitionError {
    /// Convenience constructor for hook implementations.
    pub fn hook_failed(hook: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HookFailed {
            hook: hook.into(),
            message: message.into(),
        }
    }

    /// True for errors raised by the engine before the attempt began.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidEvent { .. } | Self::PendingTransition { .. }
        )
    }
}
