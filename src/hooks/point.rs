//! Named positions in the hook chain.

use crate::registry::ConfigurationRegistry;
use std::fmt;

const LEAVE_PREFIX: &str = "onleave";
const ENTER_PREFIX: &str = "onenter";
const EVENT_PREFIX: &str = "on";

/// Where a user callback runs within a transition attempt.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// `onleave<state>`: first hook, runs while leaving `state`
    Leave(String),
    /// `on<event>`: runs between leave and enter
    Event(String),
    /// `onenter<state>`: last hook, runs before the state is committed
    Enter(String),
}

impl HookPoint {
    /// Conventional callback name, e.g. `onleaverunning`.
    pub fn callback_name(&self) -> String {
        match self {
            Self::Leave(state) => format!("{LEAVE_PREFIX}{state}"),
            Self::Event(event) => format!("{EVENT_PREFIX}{event}"),
            Self::Enter(state) => format!("{ENTER_PREFIX}{state}"),
        }
    }

    /// Interpret a conventional callback name against a registry.
    ///
    /// A name such as `onleavex` could mean "leave state x" or "event leavex";
    /// the first reading the registry knows about wins, checked in the order
    /// leave, enter, event.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hookstate::config::EventDecl;
    /// use hookstate::hooks::HookPoint;
    /// use hookstate::registry::ConfigurationRegistry;
    ///
    /// let registry = ConfigurationRegistry::register(
    ///     &[EventDecl::new("start", "none", "running")],
    ///     "none",
    /// );
    ///
    /// assert_eq!(
    ///     HookPoint::resolve("onenterrunning", &registry),
    ///     Some(HookPoint::Enter("running".to_string()))
    /// );
    /// assert_eq!(
    ///     HookPoint::resolve("onstart", &registry),
    ///     Some(HookPoint::Event("start".to_string()))
    /// );
    /// assert_eq!(HookPoint::resolve("onfinish", &registry), None);
    /// ```
    pub fn resolve(name: &str, registry: &ConfigurationRegistry) -> Option<Self> {
        let states = registry.states();
        if let Some(state) = name.strip_prefix(LEAVE_PREFIX) {
            if states.contains(state) {
                return Some(Self::Leave(state.to_string()));
            }
        }
        if let Some(state) = name.strip_prefix(ENTER_PREFIX) {
            if states.contains(state) {
                return Some(Self::Enter(state.to_string()));
            }
        }
        name.strip_prefix(EVENT_PREFIX)
            .filter(|event| registry.events().contains(event))
            .map(|event| Self::Event(event.to_string()))
    }

    /// True when the registry declares the state or event this point names.
    pub fn is_known(&self, registry: &ConfigurationRegistry) -> bool {
        match self {
            Self::Leave(state) | Self::Enter(state) => registry.states().contains(state),
            Self::Event(event) => registry.events().contains(event),
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.callback_name())
    }
}
