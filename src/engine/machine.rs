//! State machine that executes guarded, hooked transitions.

use super::bookkeeping::{Admission, Bookkeeping, MachineSnapshot};
use super::error::TransitionError;
use crate::core::TransitionContext;
use crate::hooks::{Callbacks, HookChain};
use crate::registry::ConfigurationRegistry;
use parking_lot::Mutex;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

/// State machine bound to a host value `H`.
///
/// Built with [`StateMachineBuilder`](crate::builder::StateMachineBuilder).
/// Hooks receive `&H` on every call.
pub struct StateMachine<H = ()> {
    registry: ConfigurationRegistry,
    callbacks: Callbacks<H>,
    host: H,
    live: Mutex<Bookkeeping>,
}

impl<H> StateMachine<H> {
    pub(crate) fn from_parts(
        registry: ConfigurationRegistry,
        callbacks: Callbacks<H>,
        host: H,
        initial: &str,
    ) -> Self {
        let live = Mutex::new(Bookkeeping::new(initial, registry.states()));
        Self {
            registry,
            callbacks,
            host,
            live,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn registry(&self) -> &ConfigurationRegistry {
        &self.registry
    }

    /// Distinct event names in declaration order.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.registry.events().names()
    }

    /// Handle for firing one declared event.
    pub fn event<'a>(&'a self, name: &'a str) -> Option<EventHandle<'a, H>> {
        self.registry
            .events()
            .contains(name)
            .then_some(EventHandle {
                machine: self,
                name,
            })
    }

    /// Copy of the live bookkeeping. Diagnostics only.
    pub fn snapshot(&self) -> MachineSnapshot {
        self.live.lock().snapshot()
    }

    pub(crate) fn current_state(&self) -> String {
        self.live.lock().current().to_string()
    }

    /// Fire `event` with the given arguments.
    ///
    /// Nothing happens until the returned future is first polled. The
    /// attempt then runs strictly in order: build context, validate, guard,
    /// leave bookkeeping, `onleave<from>`, `on<event>`, `onenter<to>`, enter
    /// bookkeeping. Any failure after the guard reverts the bookkeeping and
    /// is returned unchanged. `current` changes only in the final step.
    ///
    /// Attempts that conflict with one already in flight are rejected with
    /// [`TransitionError::PendingTransition`], never queued.
    pub async fn fire(
        &self,
        event: &str,
        args: Vec<Value>,
    ) -> Result<TransitionContext, TransitionError> {
        let (context, admission) = self.begin(event, args)?;

        let chain = HookChain::for_attempt(&self.callbacks, &context);
        match chain.run(&self.host, &context).await {
            Ok(()) => {
                admission.commit();
                debug!(
                    attempt = %context.attempt_id,
                    event = %context.event,
                    state = %context.target(),
                    elapsed = ?context.elapsed(),
                    "transition complete"
                );
                Ok(context)
            }
            Err(error) => {
                admission.revert();
                warn!(
                    attempt = %context.attempt_id,
                    event = %context.event,
                    from = %context.from,
                    %error,
                    "transition failed; bookkeeping reverted"
                );
                Err(error)
            }
        }
    }

    /// Build the context, validate, guard and apply leave bookkeeping
    /// without releasing the lock in between.
    fn begin(
        &self,
        event: &str,
        args: Vec<Value>,
    ) -> Result<(TransitionContext, Admission<'_>), TransitionError> {
        let mut live = self.live.lock();
        let from = live.current().to_string();
        let resolution = self.registry.events().resolve(event, &from);

        let context = TransitionContext::new(
            event,
            &from,
            resolution.and_then(|r| r.to),
            resolution.is_some_and(|r| r.via_wildcard),
            args,
        );
        debug!(
            attempt = %context.attempt_id,
            event = %context.event,
            from = %context.from,
            to = ?context.to,
            kind = %context.kind,
            "transition requested"
        );

        if resolution.is_none() {
            warn!(event, state = %from, "invalid event in current state");
            return Err(TransitionError::InvalidEvent {
                event: event.to_string(),
                state: from,
            });
        }

        match Admission::admit(&self.live, &mut live, &context) {
            Ok(admission) => Ok((context, admission)),
            Err(error) => {
                warn!(attempt = %context.attempt_id, %error, "transition rejected");
                Err(error)
            }
        }
    }
}

impl<H> fmt::Debug for StateMachine<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("live", &self.snapshot())
            .field("events", &self.registry.events().len())
            .field("callbacks", &self.callbacks.len())
            .finish_non_exhaustive()
    }
}

/// Callable for one declared event of a machine.
pub struct EventHandle<'a, H> {
    machine: &'a StateMachine<H>,
    name: &'a str,
}

impl<'a, H> EventHandle<'a, H> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub async fn fire(&self, args: Vec<Value>) -> Result<TransitionContext, TransitionError> {
        self.machine.fire(self.name, args).await
    }
}
