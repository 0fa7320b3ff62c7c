//! Starter Kit DOM Layer
//!
//! Components never touch a browser document directly. They talk to a [`Host`],
//! a narrow capability interface:
//! - query descendants of a scope (by role or class)
//! - read and write attributes, classes, focus order
//! - subscribe and unsubscribe event listeners
//! - move input focus
//!
//! [`VirtualDocument`] is the headless host used by tests and tooling.

mod document;
mod error;
mod event;
mod host;
mod key;
mod parse;

pub use document::{NodeId, VirtualDocument};
pub use error::DomError;
pub use event::{DomEvent, EventKind, EventOutcome, Listener, ListenerId};
pub use host::Host;
pub use key::Key;

pub type Result<T> = std::result::Result<T, DomError>;
