//! Classification of transition attempts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a transition attempt relates the machine's current state to its target.
///
/// Every attempt is classified exactly once from its `(from, to)` pair and
/// whether the target was resolved through a wildcard declaration. The kind
/// decides which guard rule applies and which bookkeeping the engine performs.
///
/// # Example
///
/// ```rust
/// use hookstate::core::TransitionKind;
///
/// assert_eq!(
///     TransitionKind::classify("running", Some("running"), false),
///     TransitionKind::NoChange
/// );
/// assert_eq!(
///     TransitionKind::classify("running", None, false),
///     TransitionKind::NoChange
/// );
/// assert_eq!(
///     TransitionKind::classify("running", Some("paused"), true),
///     TransitionKind::Wildcard
/// );
/// assert_eq!(
///     TransitionKind::classify("running", Some("paused"), false),
///     TransitionKind::Direct
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Target equals the current state, or no target is declared.
    /// Hooks run but the current state never changes.
    NoChange,

    /// Ordinary declared move to a different state.
    Direct,

    /// Move to a different state permitted by a wildcard declaration.
    Wildcard,
}

impl TransitionKind {
    /// Classify an attempt (pure).
    pub fn classify(from: &str, to: Option<&str>, via_wildcard: bool) -> Self {
        match to {
            None => Self::NoChange,
            Some(to) if to == from => Self::NoChange,
            Some(_) if via_wildcard => Self::Wildcard,
            Some(_) => Self::Direct,
        }
    }

    /// True for attempts that leave the current state untouched.
    pub fn is_no_change(&self) -> bool {
        matches!(self, Self::NoChange)
    }

    /// True for attempts that move the machine to another state.
    pub fn changes_state(&self) -> bool {
        !self.is_no_change()
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NoChange => "no-change",
            Self::Direct => "direct",
            Self::Wildcard => "wildcard",
        };
        f.write_str(label)
    }
}
