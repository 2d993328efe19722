//! Transition engine.
//!
//! This module is the only place live machine state is mutated:
//! - `StateMachine::fire` drives one attempt through validation, the guard,
//!   the hook chain and the final commit
//! - Bookkeeping (current state, in-flight flag, no-change counters) is
//!   reverted whenever a stage after the guard fails
//!
//! Execution is cooperative: attempts are futures, and several may be polled
//! concurrently on one task. Conflicting attempts are rejected, not queued.

mod bookkeeping;
mod error;
mod machine;

pub use bookkeeping::MachineSnapshot;
pub use error::TransitionError;
pub use machine::{EventHandle, StateMachine};
