//! DOM error types

use thiserror::Error;

use crate::document::NodeId;

#[derive(Error, Debug)]
pub enum DomError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    #[error("HTML parse error: {0}")]
    Parse(String),
}
