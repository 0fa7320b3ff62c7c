//! Starter Kit Tabs
//!
//! A tab set is a fixed, ordered list of (tab, panel) pairs inside one container.
//! Exactly one pair is active at a time:
//! - pointer activation selects the clicked tab
//! - arrow keys move the selection and focus, wrapping at both ends
//! - the observer is told after every activation

mod controller;
mod error;
mod options;
mod tab_set;

pub use controller::{ChangeObserver, TabController, PANEL_ROLE, TABLIST_ROLE, TAB_ROLE};
pub use error::TabError;
pub use options::{Direction, Orientation, TabsOptions};
pub use tab_set::TabSet;

pub type Result<T> = std::result::Result<T, TabError>;
