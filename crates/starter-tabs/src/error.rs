//! Tab error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TabError {
    #[error("Tab container has no tabs")]
    EmptyTabSet,

    #[error("Tab {index} has no matching panel")]
    MissingPanel { index: usize },
}
