//! Context describing one transition attempt.

use super::kind::TransitionKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

/// Ephemeral record built once per `fire` call and handed to every hook.
///
/// `from` is the machine's current state at the moment the attempt started;
/// `to` is the target resolved from the event table for that state, or
/// `None` when the event declares no target from there.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionContext {
    /// Correlates log lines belonging to the same attempt
    pub attempt_id: Uuid,
    pub event: String,
    pub from: String,
    pub to: Option<String>,
    pub kind: TransitionKind,
    /// Arguments passed by the caller of `fire`, untouched
    pub args: Vec<Value>,
    pub started_at: DateTime<Utc>,
}

impl TransitionContext {
    pub(crate) fn new(
        event: &str,
        from: &str,
        to: Option<&str>,
        via_wildcard: bool,
        args: Vec<Value>,
    ) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            event: event.to_string(),
            from: from.to_string(),
            to: to.map(str::to_string),
            kind: TransitionKind::classify(from, to, via_wildcard),
            args,
            started_at: Utc::now(),
        }
    }

    /// State the machine will be in once the attempt succeeds.
    pub fn target(&self) -> &str {
        match (&self.kind, &self.to) {
            (TransitionKind::NoChange, _) | (_, None) => &self.from,
            (_, Some(to)) => to,
        }
    }

    /// Calculate elapsed time since the attempt started (pure)
    pub fn elapsed(&self) -> Duration {
        let now = Utc::now();
        now.signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn context_classifies_on_construction() {
        let ctx = TransitionContext::new("pause", "running", Some("paused"), false, vec![]);
        assert_eq!(ctx.kind, TransitionKind::Direct);
        assert_eq!(ctx.target(), "paused");

        let ctx = TransitionContext::new("ping", "running", None, false, vec![]);
        assert_eq!(ctx.kind, TransitionKind::NoChange);
        assert_eq!(ctx.target(), "running");
    }

    #[test]
    fn context_keeps_arguments_in_order() {
        let ctx = TransitionContext::new(
            "start",
            "none",
            Some("running"),
            false,
            vec![json!(1), json!("two")],
        );
        assert_eq!(ctx.args, vec![json!(1), json!("two")]);
    }

    #[test]
    fn attempts_get_distinct_ids() {
        let a = TransitionContext::new("start", "none", Some("running"), false, vec![]);
        let b = TransitionContext::new("start", "none", Some("running"), false, vec![]);
        assert_ne!(a.attempt_id, b.attempt_id);
    }

    #[test]
    fn elapsed_is_never_negative() {
        let mut ctx = TransitionContext::new("start", "none", Some("running"), false, vec![]);
        ctx.started_at = Utc::now() + chrono::Duration::seconds(30);
        assert_eq!(ctx.elapsed(), Duration::ZERO);
    }

    #[test]
    fn context_round_trips_through_json() {
        let ctx = TransitionContext::new("resume", "paused", Some("running"), true, vec![json!({"k": 1})]);
        let json = serde_json::to_string(&ctx).unwrap();
        let back: TransitionContext = serde_json::from_str(&json).unwrap();
        assert_eq!(ctx, back);
    }
}
