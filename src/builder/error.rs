//! Build errors for state machine construction.

use crate::config::ConfigViolation;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid machine configuration ({} violation(s))", .violations.len())]
    Invalid { violations: Vec<ConfigViolation> },

    #[error("Machine configuration could not be parsed: {0}")]
    Config(#[from] serde_json::Error),
}

impl BuildError {
    /// Violations behind an `Invalid` error; empty for parse failures.
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            Self::Invalid { violations } => violations,
            Self::Config(_) => &[],
        }
    }
}
