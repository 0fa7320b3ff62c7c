//! Event model shared between hosts and components

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::key::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer activation (mouse click, tap)
    Click,
    /// Key press while an element has focus
    KeyDown,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An event delivered by the host to a listener.
#[derive(Debug, Clone)]
pub struct DomEvent<N> {
    pub kind: EventKind,
    /// Element the event originated on (not necessarily the listener's scope)
    pub target: N,
    /// Set for `KeyDown` events
    pub key: Option<Key>,
}

impl<N> DomEvent<N> {
    pub fn click(target: N) -> Self {
        Self {
            kind: EventKind::Click,
            target,
            key: None,
        }
    }

    pub fn key_down(target: N, key: impl Into<Key>) -> Self {
        Self {
            kind: EventKind::KeyDown,
            target,
            key: Some(key.into()),
        }
    }
}

/// What a listener did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The listener intercepted the event; the host should prevent its default action.
    Handled,
    /// The listener did not act on the event.
    Ignored,
}

impl EventOutcome {
    pub fn is_handled(self) -> bool {
        matches!(self, EventOutcome::Handled)
    }

    /// Combine outcomes of several listeners: handled if any of them handled it.
    pub fn merge(self, other: EventOutcome) -> EventOutcome {
        if self.is_handled() || other.is_handled() {
            EventOutcome::Handled
        } else {
            EventOutcome::Ignored
        }
    }
}

pub type Listener<N> = Arc<dyn Fn(&DomEvent<N>) -> EventOutcome + Send + Sync>;

/// Handle returned by `Host::subscribe`, used to detach the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
