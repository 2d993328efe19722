//! Read-only queries over a machine's live state.

use crate::engine::StateMachine;

/// Read access to the active state and event permissions.
///
/// Queries never mutate and never suspend.
///
/// # Example
///
/// ```rust
/// use hookstate::builder::StateMachineBuilder;
/// use hookstate::config::EventDecl;
/// use hookstate::query::StateQuery;
///
/// let machine = StateMachineBuilder::new()
///     .initial("green")
///     .event(EventDecl::new("warn", "green", "yellow"))
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current(), "green");
/// assert!(machine.is("green"));
/// assert!(machine.can("warn"));
/// assert!(machine.cannot("stop"));
/// ```
pub trait StateQuery {
    /// Name of the active state.
    fn current(&self) -> String;

    fn is(&self, state: &str) -> bool {
        self.current() == state
    }

    /// True iff `event` may be fired from the active state.
    fn can(&self, event: &str) -> bool;

    fn cannot(&self, event: &str) -> bool {
        !self.can(event)
    }
}

impl<H> StateQuery for StateMachine<H> {
    fn current(&self) -> String {
        self.current_state()
    }

    fn can(&self, event: &str) -> bool {
        self.registry().permitted(event, &self.current_state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateMachineBuilder;
    use crate::config::{EventDecl, FromStates};

    fn machine() -> StateMachine {
        StateMachineBuilder::new()
            .initial("idle")
            .events(vec![
                EventDecl::new("start", "idle", "busy"),
                EventDecl::new("finish", vec!["busy", "stalled"], "idle"),
                EventDecl::new("panic", FromStates::any(), "stalled"),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn is_compares_with_current() {
        let machine = machine();
        assert!(machine.is("idle"));
        assert!(!machine.is("busy"));
    }

    #[test]
    fn can_follows_from_states() {
        let machine = machine();
        assert!(machine.can("start"));
        assert!(machine.cannot("finish"));
    }

    #[test]
    fn wildcard_events_are_always_available() {
        assert!(machine().can("panic"));
    }

    #[test]
    fn undeclared_events_cannot_fire() {
        let machine = machine();
        assert!(!machine.can("teleport"));
        assert!(machine.cannot("teleport"));
    }

    #[tokio::test]
    async fn queries_track_transitions() {
        let machine = machine();
        machine.fire("start", vec![]).await.unwrap();

        assert!(machine.is("busy"));
        assert!(machine.can("finish"));
        assert!(machine.cannot("start"));
    }
}
