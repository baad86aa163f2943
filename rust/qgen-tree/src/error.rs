//! Error types for tree reading and editing.

use thiserror::Error;

use crate::NodeId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    #[error("empty tree text")]
    Empty,

    #[error("unbalanced brackets at offset {offset}")]
    Unbalanced { offset: usize },

    #[error("expected {expected} at offset {offset}, found {found}")]
    Expected {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("node {0:?} does not belong to this tree")]
    UnknownNode(NodeId),

    #[error("cannot {operation} the root node")]
    RootEdit { operation: &'static str },

    #[error("cannot move node {node:?} beneath itself")]
    Cycle { node: NodeId },

    #[error("auxiliary tree has no foot node")]
    MissingFoot,
}
