//! Live machine state and the concurrency guard.
//!
//! Guard evaluation and the leave bookkeeping it protects happen under one
//! lock acquisition, so no other attempt can start between the two.

use super::error::TransitionError;
use crate::core::{TransitionContext, TransitionKind};
use crate::registry::StateTable;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Owned copy of a machine's live bookkeeping, for diagnostics.
///
/// Mutating a snapshot has no effect on the machine it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub current: String,
    pub transition_in_flight: bool,
    /// No-change attempts currently in flight, per state
    pub counters: BTreeMap<String, usize>,
}

impl MachineSnapshot {
    pub fn counter(&self, state: &str) -> usize {
        self.counters.get(state).copied().unwrap_or(0)
    }

    /// True when no attempt of any kind is in flight.
    pub fn is_idle(&self) -> bool {
        !self.transition_in_flight && self.counters.values().all(|count| *count == 0)
    }
}

/// The parts of a context that bookkeeping needs after admission.
#[derive(Clone, Debug)]
struct Ticket {
    event: String,
    kind: TransitionKind,
    from: String,
    to: Option<String>,
}

impl Ticket {
    fn of(context: &TransitionContext) -> Self {
        Self {
            event: context.event.clone(),
            kind: context.kind,
            from: context.from.clone(),
            to: context.to.clone(),
        }
    }
}

/// `current`, the in-flight flag, and the per-state no-change counters.
#[derive(Debug)]
pub(crate) struct Bookkeeping {
    current: String,
    in_flight: bool,
    counters: BTreeMap<String, usize>,
}

impl Bookkeeping {
    pub(crate) fn new(initial: &str, states: &StateTable) -> Self {
        let mut counters = states.counters();
        counters.entry(initial.to_string()).or_insert(0);
        Self {
            current: initial.to_string(),
            in_flight: false,
            counters,
        }
    }

    pub(crate) fn current(&self) -> &str {
        &self.current
    }

    fn counter(&self, state: &str) -> usize {
        self.counters.get(state).copied().unwrap_or(0)
    }

    /// Apply the guard rule for an attempt that has not yet begun.
    ///
    /// No-change attempts only conflict with a real transition in flight.
    /// State-changing attempts additionally conflict with any no-change
    /// attempt still running on the current state.
    pub(crate) fn check(&self, context: &TransitionContext) -> Result<(), TransitionError> {
        let blocked = match context.kind {
            TransitionKind::NoChange => self.in_flight,
            TransitionKind::Direct | TransitionKind::Wildcard => {
                self.in_flight || self.counter(&self.current) > 0
            }
        };

        if blocked {
            return Err(TransitionError::PendingTransition {
                event: context.event.clone(),
                state: context.from.clone(),
            });
        }
        Ok(())
    }

    fn leave(&mut self, ticket: &Ticket) {
        if ticket.kind.is_no_change() {
            *self.counters.entry(ticket.from.clone()).or_insert(0) += 1;
        } else {
            self.in_flight = true;
        }
    }

    fn undo_leave(&mut self, ticket: &Ticket) {
        if ticket.kind.is_no_change() {
            if let Some(count) = self.counters.get_mut(&ticket.from) {
                *count = count.saturating_sub(1);
            }
        } else {
            self.in_flight = false;
        }
    }

    fn enter(&mut self, ticket: &Ticket) {
        self.undo_leave(ticket);
        if ticket.kind.changes_state() {
            if let Some(to) = &ticket.to {
                self.current = to.clone();
            }
        }
    }

    pub(crate) fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            current: self.current.clone(),
            transition_in_flight: self.in_flight,
            counters: self.counters.clone(),
        }
    }
}

/// An attempt that passed the guard and has had its leave bookkeeping applied.
///
/// Settled exactly once, by `commit` or `revert`. Dropping an unsettled
/// admission (the `fire` future was dropped mid-chain) reverts it.
pub(crate) struct Admission<'a> {
    live: &'a Mutex<Bookkeeping>,
    ticket: Ticket,
    settled: bool,
}

impl<'a> Admission<'a> {
    /// Check the guard and apply leave bookkeeping in one step.
    pub(crate) fn admit(
        live: &'a Mutex<Bookkeeping>,
        state: &mut Bookkeeping,
        context: &TransitionContext,
    ) -> Result<Self, TransitionError> {
        state.check(context)?;
        let ticket = Ticket::of(context);
        state.leave(&ticket);
        Ok(Self {
            live,
            ticket,
            settled: false,
        })
    }

    /// Apply enter bookkeeping; the only place `current` changes.
    pub(crate) fn commit(mut self) {
        self.live.lock().enter(&self.ticket);
        self.settled = true;
    }

    /// Undo the leave bookkeeping. `current` is left untouched.
    pub(crate) fn revert(mut self) {
        self.live.lock().undo_leave(&self.ticket);
        self.settled = true;
    }
}

impl Drop for Admission<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!(
                event = %self.ticket.event,
                from = %self.ticket.from,
                "transition dropped before completion; reverting bookkeeping"
            );
            self.live.lock().undo_leave(&self.ticket);
        }
    }
}
