//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Domain errors represent violated tree preconditions.
/// Boundary moves and unknown keys are not errors and never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("empty tree: at least one top-level item is required")]
    EmptyTree,

    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("the synthetic root cannot hold the cursor")]
    RootNotSelectable,

    #[error("cycle detected in hierarchy at node: {0}")]
    CycleDetected(NodeId),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
