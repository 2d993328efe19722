//! Problems found while validating a machine configuration.

use thiserror::Error;

/// A single configuration problem.
///
/// Validation reports every violation it finds instead of stopping at the
/// first one, so a configuration can be fixed in one pass.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("Event #{index} has an empty name")]
    EmptyEventName { index: usize },

    #[error("Event '{event}' declares no from-states")]
    NoFromStates { event: String },

    #[error("Event '{event}' mentions a state with an empty name")]
    EmptyStateName { event: String },

    #[error("Event '{event}' uses the wildcard '*' as a target state")]
    WildcardTarget { event: String },

    #[error("Initial state must not be empty or the wildcard")]
    InvalidInitialState,

    #[error("Callback '{name}' does not refer to any declared state or event")]
    UnknownCallback { name: String },
}
