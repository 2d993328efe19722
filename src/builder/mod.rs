//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder and a declaration macro for creating
//! state machines with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;

use crate::config::MachineConfig;
use crate::engine::StateMachine;

/// Build a hook-less machine straight from a configuration.
///
/// # Example
///
/// ```
/// use hookstate::builder::from_config;
/// use hookstate::config::MachineConfig;
/// use hookstate::events;
/// use hookstate::query::StateQuery;
///
/// let machine = from_config(MachineConfig {
///     events: events! { start: none => running },
///     ..MachineConfig::default()
/// })
/// .unwrap();
///
/// assert!(machine.can("start"));
/// ```
pub fn from_config(config: MachineConfig) -> Result<StateMachine, BuildError> {
    StateMachineBuilder::new().config(config).build()
}

/// Parse a JSON configuration and build a hook-less machine from it.
pub fn from_json(json: &str) -> Result<StateMachine, BuildError> {
    from_config(MachineConfig::from_json(json)?)
}
