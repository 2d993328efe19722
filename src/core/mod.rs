//! Core value types shared by every layer of the engine.
//!
//! This module contains the pieces of a transition attempt that carry no
//! behaviour of their own:
//! - State name conventions (initial sentinel, wildcard)
//! - Transition classification (`TransitionKind`)
//! - The per-attempt `TransitionContext`
//!
//! Everything here is pure. Mutation of live machine state happens only in
//! the engine.

mod context;
mod kind;
mod state;

pub use context::TransitionContext;
pub use kind::TransitionKind;
pub use state::{is_wildcard, DEFAULT_INITIAL_STATE, WILDCARD};
