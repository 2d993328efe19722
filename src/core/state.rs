//! State naming conventions.
//!
//! States are plain names. Two names are reserved by convention: the
//! sentinel a machine starts in when no initial state is configured, and the
//! wildcard that stands for "any state" in an event's from-list.

/// State a machine starts in when the configuration names no initial state.
pub const DEFAULT_INITIAL_STATE: &str = "none";

/// From-state marker matching whatever the machine's current state is.
///
/// The wildcard is never recorded as a state of its own.
pub const WILDCARD: &str = "*";

/// Check whether a from-state name is the wildcard marker.
///
/// # Example
///
/// ```rust
/// use hookstate::core::is_wildcard;
///
/// assert!(is_wildcard("*"));
/// assert!(!is_wildcard("running"));
/// ```
pub fn is_wildcard(name: &str) -> bool {
    name == WILDCARD
}
