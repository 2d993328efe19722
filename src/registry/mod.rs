//! Configuration registry: the immutable event and state tables.
//!
//! Built once when a machine is constructed and never modified afterwards.
//! The engine consults it to resolve targets and permissions; it holds no
//! live state of its own.

mod table;

pub use table::{EventTable, Resolution, StateTable};

use crate::config::EventDecl;

/// Owner of the event and state tables for one machine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigurationRegistry {
    events: EventTable,
    states: StateTable,
}

impl ConfigurationRegistry {
    /// Build both tables from an ordered list of declarations.
    ///
    /// The initial state is always present in the state table, even when no
    /// event mentions it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hookstate::config::EventDecl;
    /// use hookstate::registry::ConfigurationRegistry;
    ///
    /// let registry = ConfigurationRegistry::register(
    ///     &[
    ///         EventDecl::new("start", "none", "running"),
    ///         EventDecl::new("stop", vec!["running", "paused"], "stopped"),
    ///     ],
    ///     "none",
    /// );
    ///
    /// assert_eq!(registry.resolve("stop", "paused"), Some("stopped"));
    /// assert!(registry.permitted("start", "none"));
    /// assert!(!registry.permitted("start", "running"));
    /// assert_eq!(registry.states().len(), 4);
    /// ```
    pub fn register(declarations: &[EventDecl], initial: &str) -> Self {
        let mut events = EventTable::default();
        let mut states = StateTable::default();

        states.insert(initial);
        for decl in declarations {
            let to = decl.to.as_deref();
            for from in decl.from.names() {
                events.insert(&decl.name, from, to);
                states.insert(from);
            }
            if let Some(to) = to {
                states.insert(to);
            }
        }

        Self { events, states }
    }

    /// Target state of `event` fired from `from`, if one is declared.
    pub fn resolve(&self, event: &str, from: &str) -> Option<&str> {
        self.events.resolve(event, from).and_then(|r| r.to)
    }

    pub fn permitted(&self, event: &str, from: &str) -> bool {
        self.events.permitted(event, from)
    }

    pub fn events(&self) -> &EventTable {
        &self.events
    }

    pub fn states(&self) -> &StateTable {
        &self.states
    }

    /// Consume the registry, yielding the tables.
    pub fn into_tables(self) -> (EventTable, StateTable) {
        (self.events, self.states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FromStates;

    fn lifecycle() -> ConfigurationRegistry {
        ConfigurationRegistry::register(
            &[
                EventDecl::new("start", "none", "running"),
                EventDecl::new("pause", "running", "paused"),
                EventDecl::new("resume", "paused", "running"),
                EventDecl::new("heartbeat", "running", "running"),
                EventDecl::new("abort", FromStates::any(), "failed"),
            ],
            "none",
        )
    }

    #[test]
    fn register_collects_every_state() {
        let registry = lifecycle();
        let names: Vec<_> = registry.states().names().collect();
        assert_eq!(names, vec!["failed", "none", "paused", "running"]);
    }

    #[test]
    fn initial_state_is_registered_when_unmentioned() {
        let registry =
            ConfigurationRegistry::register(&[EventDecl::new("go", "a", "b")], "limbo");
        assert!(registry.states().contains("limbo"));
    }

    #[test]
    fn wildcard_permits_every_state() {
        let registry = lifecycle();
        for state in ["none", "running", "paused", "failed", "unknown"] {
            assert!(registry.permitted("abort", state));
            assert_eq!(registry.resolve("abort", state), Some("failed"));
        }
    }

    #[test]
    fn merged_declarations_share_one_event() {
        let registry = ConfigurationRegistry::register(
            &[
                EventDecl::new("finish", "a", "done"),
                EventDecl::new("finish", "b", "done"),
                EventDecl::new("finish", "a", "archived"),
            ],
            "a",
        );

        assert_eq!(registry.events().len(), 1);
        assert_eq!(registry.resolve("finish", "a"), Some("archived"));
        assert_eq!(registry.resolve("finish", "b"), Some("done"));
    }

    #[test]
    fn into_tables_hands_back_both() {
        let (events, states) = lifecycle().into_tables();
        assert!(events.contains("heartbeat"));
        assert!(states.contains("paused"));
    }
}
