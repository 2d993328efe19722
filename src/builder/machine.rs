//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::{require, ConfigValidation, ConfigViolation, EventDecl, MachineConfig};
use crate::core::TransitionContext;
use crate::engine::StateMachine;
use crate::hooks::{hook_fn, Callbacks, Hook, HookFuture, HookPoint};
use crate::registry::ConfigurationRegistry;
use stillwater::validation::Validation;
use tracing::debug;

/// Where a registered hook should attach once the tables exist.
enum HookTarget {
    Point(HookPoint),
    /// Conventional name such as `onenterrunning`, resolved at build time
    Named(String),
}

/// Builder for constructing state machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use futures::FutureExt;
/// use hookstate::builder::StateMachineBuilder;
/// use hookstate::config::EventDecl;
///
/// let machine = StateMachineBuilder::new()
///     .event(EventDecl::new("start", "none", "running"))
///     .on_enter("running", |_host, ctx| {
///         async move {
///             println!("running (was {})", ctx.from);
///             Ok(())
///         }
///         .boxed()
///     })
///     .build()
///     .unwrap();
/// ```
pub struct StateMachineBuilder<H = ()> {
    config: MachineConfig,
    hooks: Vec<(HookTarget, Hook<H>)>,
    host: H,
}

impl StateMachineBuilder<()> {
    /// Create a new builder with no host value.
    pub fn new() -> Self {
        Self::with_host(())
    }
}

impl Default for StateMachineBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: 'static> StateMachineBuilder<H> {
    /// Create a builder whose hooks will be bound to `host`.
    pub fn with_host(host: H) -> Self {
        Self {
            config: MachineConfig::default(),
            hooks: Vec::new(),
            host,
        }
    }

    /// Replace events and initial state with a complete configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initial state (defaults to `"none"`).
    pub fn initial(mut self, state: &str) -> Self {
        self.config.initial = state.to_string();
        self
    }

    /// Add one event declaration.
    pub fn event(mut self, decl: EventDecl) -> Self {
        self.config.events.push(decl);
        self
    }

    /// Add multiple event declarations at once.
    pub fn events(mut self, decls: Vec<EventDecl>) -> Self {
        self.config.events.extend(decls);
        self
    }

    /// Attach a pre-built hook at an explicit point.
    pub fn hook(mut self, point: HookPoint, hook: Hook<H>) -> Self {
        self.hooks.push((HookTarget::Point(point), hook));
        self
    }

    /// Run `f` when leaving `state` (`onleave<state>`).
    pub fn on_leave<F>(self, state: &str, f: F) -> Self
    where
        F: for<'a> Fn(&'a H, &'a TransitionContext) -> HookFuture<'a> + Send + Sync + 'static,
    {
        self.hook(HookPoint::Leave(state.to_string()), hook_fn(f))
    }

    /// Run `f` whenever `event` fires (`on<event>`).
    pub fn on_event<F>(self, event: &str, f: F) -> Self
    where
        F: for<'a> Fn(&'a H, &'a TransitionContext) -> HookFuture<'a> + Send + Sync + 'static,
    {
        self.hook(HookPoint::Event(event.to_string()), hook_fn(f))
    }

    /// Run `f` when entering `state` (`onenter<state>`).
    pub fn on_enter<F>(self, state: &str, f: F) -> Self
    where
        F: for<'a> Fn(&'a H, &'a TransitionContext) -> HookFuture<'a> + Send + Sync + 'static,
    {
        self.hook(HookPoint::Enter(state.to_string()), hook_fn(f))
    }

    /// Attach a hook by conventional name (`onleave<State>`, `on<Event>`,
    /// `onenter<State>`). The name is resolved against the declared states
    /// and events when the machine is built.
    pub fn callback<F>(mut self, name: &str, f: F) -> Self
    where
        F: for<'a> Fn(&'a H, &'a TransitionContext) -> HookFuture<'a> + Send + Sync + 'static,
    {
        self.hooks
            .push((HookTarget::Named(name.to_string()), hook_fn(f)));
        self
    }

    /// Build the state machine.
    ///
    /// Every configuration problem and every hook that names an unknown
    /// state or event is reported together in [`BuildError::Invalid`].
    pub fn build(self) -> Result<StateMachine<H>, BuildError> {
        let registry = ConfigurationRegistry::register(&self.config.events, &self.config.initial);

        let mut checks: Vec<ConfigValidation> = vec![self.config.validate()];
        let mut callbacks = Callbacks::new();
        for (target, hook) in self.hooks {
            let (point, name) = match target {
                HookTarget::Point(point) => {
                    let name = point.callback_name();
                    (point.is_known(&registry).then_some(point), name)
                }
                HookTarget::Named(name) => (HookPoint::resolve(&name, &registry), name),
            };
            checks.push(require(
                point.is_some(),
                ConfigViolation::UnknownCallback { name },
            ));
            if let Some(point) = point {
                callbacks.insert(point, hook);
            }
        }

        if let Validation::Failure(errors) = Validation::all_vec(checks) {
            return Err(BuildError::Invalid {
                violations: errors.iter().cloned().collect(),
            });
        }

        debug!(
            events = registry.events().len(),
            states = registry.states().len(),
            callbacks = callbacks.len(),
            initial = %self.config.initial,
            "state machine built"
        );
        Ok(StateMachine::from_parts(
            registry,
            callbacks,
            self.host,
            &self.config.initial,
        ))
    }
}
