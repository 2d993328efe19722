//! Declarative machine configuration.
//!
//! A configuration is plain data: an ordered list of event declarations and
//! the state the machine starts in. It can be written in code or loaded from
//! JSON. Callbacks are code, so they are attached through
//! [`StateMachineBuilder`](crate::builder::StateMachineBuilder) instead.
//!
//! # Example
//!
//! ```rust
//! use hookstate::config::MachineConfig;
//!
//! let config = MachineConfig::from_json(r#"{
//!     "initial": "idle",
//!     "events": [
//!         { "name": "start", "from": "idle", "to": "running" },
//!         { "name": "stop", "from": ["running", "paused"], "to": "idle" },
//!         { "name": "reset", "from": "*", "to": "idle" }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(config.initial, "idle");
//! assert!(config.events[2].from.is_any());
//! assert!(config.validate().is_success());
//! ```

mod violations;

pub use violations::ConfigViolation;

use crate::builder::BuildError;
use crate::core::{is_wildcard, DEFAULT_INITIAL_STATE, WILDCARD};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Accumulated outcome of a configuration check.
pub type ConfigValidation = Validation<(), NonEmptyVec<ConfigViolation>>;

/// The states an event may be fired from.
///
/// Serialized untagged, so JSON accepts either `"state"` or
/// `["a", "b"]`. The wildcard is written as `"*"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FromStates {
    One(String),
    Many(Vec<String>),
}

impl FromStates {
    /// From-set matching any current state.
    pub fn any() -> Self {
        Self::One(WILDCARD.to_string())
    }

    /// True when this from-set is exactly the wildcard.
    pub fn is_any(&self) -> bool {
        matches!(self, Self::One(name) if is_wildcard(name))
    }

    /// Names in declaration order (the wildcard included, if present).
    pub fn names(&self) -> &[String] {
        match self {
            Self::One(name) => std::slice::from_ref(name),
            Self::Many(names) => names,
        }
    }
}

impl From<&str> for FromStates {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<Vec<&str>> for FromStates {
    fn from(names: Vec<&str>) -> Self {
        Self::Many(names.into_iter().map(str::to_string).collect())
    }
}

/// One event declaration.
///
/// Several declarations may share a name; their from/to pairs are merged
/// into a single event when the machine is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDecl {
    pub name: String,
    pub from: FromStates,
    /// Absent target makes the event a no-change event from these states
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl EventDecl {
    /// Declare an event moving from `from` to `to`.
    pub fn new(name: &str, from: impl Into<FromStates>, to: &str) -> Self {
        Self {
            name: name.to_string(),
            from: from.into(),
            to: Some(to.to_string()),
        }
    }

    /// Declare an event without a target state.
    pub fn no_change(name: &str, from: impl Into<FromStates>) -> Self {
        Self {
            name: name.to_string(),
            from: from.into(),
            to: None,
        }
    }

    fn validate(&self, index: usize) -> ConfigValidation {
        let mut checks = Vec::new();

        checks.push(require(
            !self.name.is_empty(),
            ConfigViolation::EmptyEventName { index },
        ));

        checks.push(require(
            !self.from.names().is_empty(),
            ConfigViolation::NoFromStates {
                event: self.name.clone(),
            },
        ));

        let empty_state = self.from.names().iter().any(String::is_empty)
            || self.to.as_deref().is_some_and(str::is_empty);
        checks.push(require(
            !empty_state,
            ConfigViolation::EmptyStateName {
                event: self.name.clone(),
            },
        ));

        checks.push(require(
            !self.to.as_deref().is_some_and(is_wildcard),
            ConfigViolation::WildcardTarget {
                event: self.name.clone(),
            },
        ));

        Validation::all_vec(checks).map(|_| ())
    }
}

fn default_initial() -> String {
    DEFAULT_INITIAL_STATE.to_string()
}

/// Complete declarative description of a machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    #[serde(default)]
    pub events: Vec<EventDecl>,

    #[serde(default = "default_initial")]
    pub initial: String,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            initial: default_initial(),
        }
    }
}

impl MachineConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every declaration, accumulating ALL violations.
    pub fn validate(&self) -> ConfigValidation {
        let mut checks: Vec<ConfigValidation> = self
            .events
            .iter()
            .enumerate()
            .map(|(index, event)| event.validate(index))
            .collect();

        checks.push(require(
            !self.initial.is_empty() && !is_wildcard(&self.initial),
            ConfigViolation::InvalidInitialState,
        ));

        Validation::all_vec(checks).map(|_| ())
    }
}

pub(crate) fn require(condition: bool, violation: ConfigViolation) -> ConfigValidation {
    if condition {
        Validation::success(())
    } else {
        Validation::fail(violation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violations(result: ConfigValidation) -> Vec<ConfigViolation> {
        match result {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    #[test]
    fn initial_defaults_to_sentinel() {
        let config = MachineConfig::from_json(r#"{ "events": [] }"#).unwrap();
        assert_eq!(config.initial, DEFAULT_INITIAL_STATE);
        assert_eq!(MachineConfig::default().initial, DEFAULT_INITIAL_STATE);
    }

    #[test]
    fn from_accepts_single_list_and_wildcard() {
        let config = MachineConfig::from_json(
            r#"{ "events": [
                { "name": "a", "from": "x", "to": "y" },
                { "name": "b", "from": ["x", "y"], "to": "z" },
                { "name": "c", "from": "*", "to": "x" },
                { "name": "d", "from": "x" }
            ] }"#,
        )
        .unwrap();

        assert_eq!(config.events[0].from, FromStates::from("x"));
        assert_eq!(config.events[1].from.names(), ["x", "y"]);
        assert!(config.events[2].from.is_any());
        assert_eq!(config.events[3].to, None);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let result = MachineConfig::from_json(r#"{ "events": 7 }"#);
        assert!(matches!(result, Err(BuildError::Config(_))));
    }

    #[test]
    fn valid_config_passes() {
        let config = MachineConfig {
            events: vec![
                EventDecl::new("start", "none", "running"),
                EventDecl::new("reset", FromStates::any(), "none"),
                EventDecl::no_change("tick", vec!["running", "paused"]),
            ],
            initial: "none".to_string(),
        };
        assert!(config.validate().is_success());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let config = MachineConfig {
            events: vec![
                EventDecl::new("", "a", "b"),
                EventDecl {
                    name: "empty".to_string(),
                    from: FromStates::Many(vec![]),
                    to: Some("b".to_string()),
                },
                EventDecl::new("blank", "", "b"),
                EventDecl::new("everywhere", "a", "*"),
            ],
            initial: String::new(),
        };

        let found = violations(config.validate());
        assert_eq!(found.len(), 5);
        assert!(found.contains(&ConfigViolation::EmptyEventName { index: 0 }));
        assert!(found.contains(&ConfigViolation::NoFromStates {
            event: "empty".to_string()
        }));
        assert!(found.contains(&ConfigViolation::EmptyStateName {
            event: "blank".to_string()
        }));
        assert!(found.contains(&ConfigViolation::WildcardTarget {
            event: "everywhere".to_string()
        }));
        assert!(found.contains(&ConfigViolation::InvalidInitialState));
    }

    #[test]
    fn wildcard_initial_state_is_rejected() {
        let config = MachineConfig {
            events: vec![],
            initial: "*".to_string(),
        };
        assert_eq!(
            violations(config.validate()),
            vec![ConfigViolation::InvalidInitialState]
        );
    }

    #[test]
    fn missing_target_is_omitted_when_serialized() {
        let json = serde_json::to_string(&EventDecl::no_change("tick", "running")).unwrap();
        assert_eq!(json, r#"{"name":"tick","from":"running"}"#);
    }
}
