//! Starter Kit Core
//!
//! Configuration, logging setup, and [`Kit`], which mounts components on every
//! matching container of a document once it is ready.

mod config;
mod error;
mod kit;

pub use config::Config;
pub use error::CoreError;
pub use kit::Kit;

// Re-export components
pub use starter_dom::{
    DomError, DomEvent, EventKind, EventOutcome, Host, Key, Listener, ListenerId, NodeId,
    VirtualDocument,
};
pub use starter_tabs::{
    ChangeObserver, Direction, Orientation, TabController, TabError, TabSet, TabsOptions,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed by the embedding application
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
