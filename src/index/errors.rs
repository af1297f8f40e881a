//! Structural invariant violations reported by `RangeTree::check_invariants`
//!
//! Index operations themselves never fail. These errors only surface when a
//! tree is audited, which the test suites do after every insert.

use thiserror::Error;

use super::rbtree::NodeId;

/// A broken red-black or ordering invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("sentinel is colored red")]
    RedSentinel,

    #[error("root is colored red")]
    RedRoot,

    #[error("red node {child} has red parent {parent}")]
    RedRedEdge { parent: NodeId, child: NodeId },

    #[error("black-height differs under {node}: left {left}, right {right}")]
    BlackHeightMismatch {
        node: NodeId,
        left: usize,
        right: usize,
    },

    #[error("key at {node} breaks in-order ordering")]
    OutOfOrder { node: NodeId },

    #[error("parent link of {node} does not point back to its parent")]
    BrokenParentLink { node: NodeId },

    #[error("node {node} has an empty identifier set")]
    EmptyIdSet { node: NodeId },

    #[error("{allocated} nodes allocated but {reachable} reachable in order")]
    UnreachableNodes { allocated: usize, reachable: usize },
}

impl InvariantViolation {
    /// Stable code for logs and test diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            InvariantViolation::RedSentinel => "REEL_INDEX_RED_SENTINEL",
            InvariantViolation::RedRoot => "REEL_INDEX_RED_ROOT",
            InvariantViolation::RedRedEdge { .. } => "REEL_INDEX_RED_RED",
            InvariantViolation::BlackHeightMismatch { .. } => "REEL_INDEX_BLACK_HEIGHT",
            InvariantViolation::OutOfOrder { .. } => "REEL_INDEX_OUT_OF_ORDER",
            InvariantViolation::BrokenParentLink { .. } => "REEL_INDEX_PARENT_LINK",
            InvariantViolation::EmptyIdSet { .. } => "REEL_INDEX_EMPTY_IDS",
            InvariantViolation::UnreachableNodes { .. } => "REEL_INDEX_UNREACHABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let node = NodeId::NIL;
        let all = [
            InvariantViolation::RedSentinel,
            InvariantViolation::RedRoot,
            InvariantViolation::RedRedEdge { parent: node, child: node },
            InvariantViolation::BlackHeightMismatch { node, left: 1, right: 2 },
            InvariantViolation::OutOfOrder { node },
            InvariantViolation::BrokenParentLink { node },
            InvariantViolation::EmptyIdSet { node },
            InvariantViolation::UnreachableNodes { allocated: 2, reachable: 1 },
        ];
        let codes: std::collections::HashSet<_> = all.iter().map(|v| v.code()).collect();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn test_display_names_nodes() {
        let err = InvariantViolation::BlackHeightMismatch {
            node: NodeId::NIL,
            left: 2,
            right: 3,
        };
        let display = err.to_string();
        assert!(display.contains("#0"));
        assert!(display.contains("left 2"));
    }
}
