//! Macros for ergonomic event declaration.

/// Declare a list of events with `name: from => to` syntax.
///
/// `from` is a single state, a bracketed list of states, or `*` for any
/// state. Leaving out `=> to` declares an event without a target state,
/// which never changes the current state. Produces a `Vec<EventDecl>`.
///
/// # Example
///
/// ```
/// use hookstate::events;
///
/// let events = events! {
///     start: none => running,
///     stop: [running, paused] => stopped,
///     fail: * => failed,
///     ping: running,
/// };
///
/// assert_eq!(events.len(), 4);
/// assert!(events[2].from.is_any());
/// assert_eq!(events[3].to, None);
/// ```
#[macro_export]
macro_rules! events {
    (@decl $name:ident, *, $to:ident) => {
        $crate::config::EventDecl::new(
            stringify!($name),
            $crate::config::FromStates::any(),
            stringify!($to),
        )
    };
    (@decl $name:ident, [$($from:ident),+ $(,)?], $to:ident) => {
        $crate::config::EventDecl::new(
            stringify!($name),
            vec![$(stringify!($from)),+],
            stringify!($to),
        )
    };
    (@decl $name:ident, $from:ident, $to:ident) => {
        $crate::config::EventDecl::new(stringify!($name), stringify!($from), stringify!($to))
    };
    (@decl $name:ident, *) => {
        $crate::config::EventDecl::no_change(stringify!($name), $crate::config::FromStates::any())
    };
    (@decl $name:ident, [$($from:ident),+ $(,)?]) => {
        $crate::config::EventDecl::no_change(stringify!($name), vec![$(stringify!($from)),+])
    };
    (@decl $name:ident, $from:ident) => {
        $crate::config::EventDecl::no_change(stringify!($name), stringify!($from))
    };
    ($($name:ident : $from:tt $(=> $to:ident)?),* $(,)?) => {
        vec![$($crate::events!(@decl $name, $from $(, $to)?)),*]
    };
}

#[cfg(test)]
mod tests {
    use crate::config::{EventDecl, FromStates};

    #[test]
    fn events_macro_builds_declarations() {
        let events = events! {
            start: none => running,
            heartbeat: running => running,
        };

        assert_eq!(
            events,
            vec![
                EventDecl::new("start", "none", "running"),
                EventDecl::new("heartbeat", "running", "running"),
            ]
        );
    }

    #[test]
    fn events_macro_supports_lists_and_wildcards() {
        let events = events! {
            stop: [running, paused] => stopped,
            reset: * => idle
        };

        assert_eq!(events[0].from, FromStates::from(vec!["running", "paused"]));
        assert_eq!(events[1].from, FromStates::any());
        assert_eq!(events[1].to.as_deref(), Some("idle"));
    }

    #[test]
    fn events_macro_declares_targetless_events() {
        let events = events! {
            start: none => running,
            ping: running,
            status: [running, paused],
            poke: *,
        };

        assert_eq!(events[1], EventDecl::no_change("ping", "running"));
        assert_eq!(
            events[2],
            EventDecl::no_change("status", vec!["running", "paused"])
        );
        assert_eq!(events[3], EventDecl::no_change("poke", FromStates::any()));
    }
}
