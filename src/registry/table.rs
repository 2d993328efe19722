//! Immutable lookup tables built from event declarations.

use crate::core::{is_wildcard, WILDCARD};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Outcome of looking up an event from a given state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// Declared target, `None` for events without one from this state
    pub to: Option<&'a str>,
    /// Whether the permission came from a wildcard declaration
    pub via_wildcard: bool,
}

/// Event name → from-state → to-state.
///
/// The wildcard from-state is stored under its own key and only consulted
/// when no exact entry exists for the current state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EventTable {
    order: Vec<String>,
    entries: HashMap<String, HashMap<String, Option<String>>>,
}

impl EventTable {
    /// Record one from/to pair.
    ///
    /// A later target for the same pair replaces the earlier one; a missing
    /// target never clears one that was declared before.
    pub(crate) fn insert(&mut self, event: &str, from: &str, to: Option<&str>) {
        if !self.entries.contains_key(event) {
            self.order.push(event.to_string());
        }
        let targets = self.entries.entry(event.to_string()).or_default();
        let slot = targets.entry(from.to_string()).or_default();
        if let Some(to) = to {
            *slot = Some(to.to_string());
        }
    }

    /// Look up `event` as fired from `from`.
    pub fn resolve(&self, event: &str, from: &str) -> Option<Resolution<'_>> {
        let targets = self.entries.get(event)?;
        if let Some(to) = targets.get(from) {
            return Some(Resolution {
                to: to.as_deref(),
                via_wildcard: is_wildcard(from),
            });
        }
        targets.get(WILDCARD).map(|to| Resolution {
            to: to.as_deref(),
            via_wildcard: true,
        })
    }

    /// True iff an entry exists for the pair, directly or via the wildcard.
    pub fn permitted(&self, event: &str, from: &str) -> bool {
        self.resolve(event, from).is_some()
    }

    pub fn contains(&self, event: &str) -> bool {
        self.entries.contains_key(event)
    }

    /// Distinct event names in first-declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Every state name seen in the configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StateTable {
    names: BTreeSet<String>,
}

impl StateTable {
    pub(crate) fn insert(&mut self, name: &str) {
        if !is_wildcard(name) {
            self.names.insert(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Fresh no-change counters, all zero.
    pub fn counters(&self) -> BTreeMap<String, usize> {
        self.names.iter().map(|name| (name.clone(), 0)).collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
