//! User callbacks and the per-attempt hook chain.
//!
//! A hook is an optional asynchronous callback bound to the machine's host
//! value. For each attempt the engine assembles a [`HookChain`] of at most
//! three hooks (`onleave<from>`, `on<event>`, `onenter<to>`) and runs them
//! strictly in that order between its own bookkeeping steps.

mod point;

pub use point::HookPoint;

use crate::core::TransitionContext;
use crate::engine::TransitionError;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// What every hook resolves to.
pub type HookResult = Result<(), TransitionError>;

/// Boxed future returned by a hook. It may keep borrowing the host and the
/// context until it resolves.
pub type HookFuture<'a> = BoxFuture<'a, HookResult>;

/// Type alias for hook functions.
/// Hooks create a fresh future on each invocation.
pub type Hook<H> =
    Arc<dyn for<'a> Fn(&'a H, &'a TransitionContext) -> HookFuture<'a> + Send + Sync>;

/// Wrap a closure as a [`Hook`].
///
/// The closure returns a boxed future, usually `async move { .. }.boxed()`,
/// that can await and still use `host` and `ctx` afterwards.
///
/// # Example
///
/// ```
/// use futures::FutureExt;
/// use hookstate::hooks::{hook_fn, Hook};
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// let hook: Hook<AtomicU32> = hook_fn(|hits: &AtomicU32, _ctx| {
///     async move {
///         futures::future::ready(()).await;
///         hits.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     }
///     .boxed()
/// });
/// # let _ = hook;
/// ```
pub fn hook_fn<H, F>(f: F) -> Hook<H>
where
    F: for<'a> Fn(&'a H, &'a TransitionContext) -> HookFuture<'a> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Hooks registered for one machine, keyed by hook point.
pub struct Callbacks<H> {
    hooks: HashMap<HookPoint, Hook<H>>,
}

impl<H> Callbacks<H> {
    pub fn new() -> Self {
        Self {
            hooks: HashMap::new(),
        }
    }

    /// Register a hook, replacing any earlier one at the same point.
    pub fn insert(&mut self, point: HookPoint, hook: Hook<H>) {
        self.hooks.insert(point, hook);
    }

    pub fn get(&self, point: &HookPoint) -> Option<&Hook<H>> {
        self.hooks.get(point)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl<H> Default for Callbacks<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Clone for Callbacks<H> {
    fn clone(&self) -> Self {
        Self {
            hooks: self.hooks.clone(),
        }
    }
}

/// Ordered hooks for a single transition attempt.
///
/// Absent hooks are simply skipped.
pub struct HookChain<H> {
    steps: Vec<(HookPoint, Hook<H>)>,
}

impl<H> HookChain<H> {
    /// Select the hooks that apply to `context`.
    ///
    /// The enter hook is only looked up when the attempt has a target state.
    pub fn for_attempt(callbacks: &Callbacks<H>, context: &TransitionContext) -> Self {
        let mut points = vec![
            HookPoint::Leave(context.from.clone()),
            HookPoint::Event(context.event.clone()),
        ];
        if let Some(to) = &context.to {
            points.push(HookPoint::Enter(to.clone()));
        }

        let steps = points
            .into_iter()
            .filter_map(|point| {
                let hook = callbacks.get(&point)?;
                Some((point, Arc::clone(hook)))
            })
            .collect();

        Self { steps }
    }

    /// Hook points that will run, in order.
    pub fn points(&self) -> impl Iterator<Item = &HookPoint> {
        self.steps.iter().map(|(point, _)| point)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every hook in order, stopping at the first failure.
    pub async fn run(self, host: &H, context: &TransitionContext) -> HookResult {
        for (point, hook) in self.steps {
            trace!(attempt = %context.attempt_id, hook = %point, "running hook");
            hook(host, context).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::FutureExt;
    use parking_lot::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    fn recording(log: &Log, label: &'static str) -> Hook<()> {
        let log = Arc::clone(log);
        hook_fn(move |_host, _ctx| {
            log.lock().push(label.to_string());
            async { Ok(()) }.boxed()
        })
    }

    fn failing(message: &'static str) -> Hook<()> {
        hook_fn(move |_host, ctx| {
            async move {
                Err(TransitionError::HookFailed {
                    hook: format!("on{}", ctx.event),
                    message: message.to_string(),
                })
            }
            .boxed()
        })
    }

    fn context(to: Option<&str>) -> TransitionContext {
        TransitionContext::new("pause", "running", to, false, vec![])
    }

    #[test]
    fn chain_runs_hooks_in_order() {
        let log: Log = Arc::default();
        let mut callbacks = Callbacks::new();
        callbacks.insert(HookPoint::Enter("paused".into()), recording(&log, "enter"));
        callbacks.insert(HookPoint::Event("pause".into()), recording(&log, "event"));
        callbacks.insert(HookPoint::Leave("running".into()), recording(&log, "leave"));

        let ctx = context(Some("paused"));
        let chain = HookChain::for_attempt(&callbacks, &ctx);
        assert_eq!(chain.len(), 3);

        block_on(chain.run(&(), &ctx)).unwrap();
        assert_eq!(*log.lock(), vec!["leave", "event", "enter"]);
    }

    #[test]
    fn missing_hooks_are_skipped() {
        let log: Log = Arc::default();
        let mut callbacks = Callbacks::new();
        callbacks.insert(HookPoint::Event("pause".into()), recording(&log, "event"));
        callbacks.insert(HookPoint::Leave("paused".into()), recording(&log, "unrelated"));

        let ctx = context(Some("paused"));
        let chain = HookChain::for_attempt(&callbacks, &ctx);
        assert_eq!(
            chain.points().cloned().collect::<Vec<_>>(),
            vec![HookPoint::Event("pause".into())]
        );

        block_on(chain.run(&(), &ctx)).unwrap();
        assert_eq!(*log.lock(), vec!["event"]);
    }

    #[test]
    fn hooks_keep_borrowing_the_host_after_suspending() {
        let mut callbacks: Callbacks<Mutex<Vec<String>>> = Callbacks::new();
        callbacks.insert(
            HookPoint::Event("pause".into()),
            hook_fn(|host: &Mutex<Vec<String>>, ctx| {
                async move {
                    futures::future::ready(()).await;
                    host.lock().push(format!("{} from {}", ctx.event, ctx.from));
                    Ok(())
                }
                .boxed()
            }),
        );

        let host = Mutex::new(Vec::new());
        let ctx = context(Some("paused"));
        block_on(HookChain::for_attempt(&callbacks, &ctx).run(&host, &ctx)).unwrap();

        assert_eq!(*host.lock(), vec!["pause from running"]);
    }

    #[test]
    fn no_enter_hook_without_target() {
        let log: Log = Arc::default();
        let mut callbacks = Callbacks::new();
        callbacks.insert(HookPoint::Enter("running".into()), recording(&log, "enter"));

        let chain = HookChain::for_attempt(&callbacks, &context(None));
        assert!(chain.is_empty());
    }

    #[test]
    fn failure_halts_the_chain() {
        let log: Log = Arc::default();
        let mut callbacks = Callbacks::new();
        callbacks.insert(HookPoint::Leave("running".into()), recording(&log, "leave"));
        callbacks.insert(HookPoint::Event("pause".into()), failing("disk full"));
        callbacks.insert(HookPoint::Enter("paused".into()), recording(&log, "enter"));

        let ctx = context(Some("paused"));
        let result = block_on(HookChain::for_attempt(&callbacks, &ctx).run(&(), &ctx));

        assert_eq!(
            result,
            Err(TransitionError::HookFailed {
                hook: "onpause".to_string(),
                message: "disk full".to_string(),
            })
        );
        assert_eq!(*log.lock(), vec!["leave"]);
    }
}
