//! Hookstate: a finite state machine engine with guarded, hooked transitions
//!
//! A machine is declared as a list of events (name, permitted from-states,
//! target state) and augmented with optional asynchronous hooks that run in a
//! fixed order on every transition attempt. The engine validates each
//! attempt, rejects attempts that would overlap a state change already in
//! flight, and reverts its bookkeeping whenever a hook fails.
//!
//! # Core Concepts
//!
//! - **Registry**: Immutable event and state tables built once from the configuration
//! - **Hooks**: `onleave<State>`, `on<Event>`, `onenter<State>` callbacks bound to a host value
//! - **Engine**: `StateMachine::fire` runs one attempt and resolves to its context
//! - **Queries**: `current`, `is`, `can`, `cannot` via the `StateQuery` trait
//!
//! # Example
//!
//! ```rust
//! use futures::FutureExt;
//! use hookstate::builder::StateMachineBuilder;
//! use hookstate::events;
//! use hookstate::query::StateQuery;
//!
//! # futures::executor::block_on(async {
//! let machine = StateMachineBuilder::new()
//!     .events(events! {
//!         start: none => running,
//!         pause: running => paused,
//!         resume: paused => running,
//!     })
//!     .on_leave("running", |_host, ctx| {
//!         async move {
//!             println!("leaving running via {}", ctx.event);
//!             Ok(())
//!         }
//!         .boxed()
//!     })
//!     .build()
//!     .unwrap();
//!
//! machine.fire("start", vec![]).await.unwrap();
//! assert!(machine.is("running"));
//!
//! machine.fire("pause", vec![]).await.unwrap();
//! assert_eq!(machine.current(), "paused");
//! assert!(machine.cannot("pause"));
//! # });
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod hooks;
pub mod query;
pub mod registry;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use config::{EventDecl, FromStates, MachineConfig};
pub use crate::core::{TransitionContext, TransitionKind};
pub use engine::{MachineSnapshot, StateMachine, TransitionError};
pub use query::StateQuery;
