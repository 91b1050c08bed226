//! Error types shared across the workspace.

use thiserror::Error;

use crate::id::{CellPos, NodeId};

/// Errors raised while discovering or re-splicing shoreline topology.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// A landmass boundary neither closes on itself nor reaches a grid edge.
    #[error("invalid grid: trace starting at {start} {reason}")]
    InvalidGrid {
        /// Cell where the failing trace started.
        start: CellPos,
        /// What went wrong.
        reason: String,
    },
    /// A local re-trace could not reconnect to its downstream node.
    ///
    /// Recoverable: callers fall back to a full re-trace.
    #[error("splice around node {node} failed: {reason}")]
    SpliceFailed {
        /// Node whose neighbourhood was being re-spliced.
        node: NodeId,
        /// What went wrong.
        reason: String,
    },
    /// Chain linkage or enrolment does not hold (asymmetric links, a
    /// drained cell still enrolled, a missing sentinel).
    ///
    /// Recoverable: callers fall back to a full re-trace.
    #[error("inconsistent shoreline at node {node}: {reason}")]
    Inconsistent {
        /// First node found violating the invariant.
        node: NodeId,
        /// Which invariant failed.
        reason: String,
    },
    /// A node handle whose arena slot has since been freed or reused.
    #[error("stale node handle {node}")]
    StaleNode {
        /// The stale handle.
        node: NodeId,
    },
    /// Storage for chains or nodes could not be grown.
    #[error("could not allocate storage for {requested} shoreline entries")]
    Allocation {
        /// Number of entries requested.
        requested: usize,
    },
}

impl TopologyError {
    /// Whether a full re-trace may recover from this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SpliceFailed { .. } | Self::Inconsistent { .. } | Self::StaleNode { .. }
        )
    }
}

/// Errors that abort a simulation step.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StepError {
    /// Topology could not be restored, even by a full re-trace.
    #[error("topology unrecoverable: {0}")]
    Topology(#[from] TopologyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splice_failures_are_recoverable() {
        let err = TopologyError::SpliceFailed {
            node: NodeId::new(1, 0),
            reason: "closed loop".into(),
        };
        assert!(err.is_recoverable());
        let fatal = TopologyError::InvalidGrid {
            start: CellPos::new(2, 0),
            reason: "does not terminate".into(),
        };
        assert!(!fatal.is_recoverable());
    }

    #[test]
    fn step_error_wraps_topology_error() {
        let err: StepError = TopologyError::Allocation { requested: 8 }.into();
        assert_eq!(
            err.to_string(),
            "topology unrecoverable: could not allocate storage for 8 shoreline entries"
        );
    }
}
