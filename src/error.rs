//! Error types for building and running the ring.

use crate::ring::Direction;

/// Errors raised while validating, wiring or running the ring.
#[derive(Debug, thiserror::Error)]
pub enum RingError {
    #[error("node count must be at least 1, got {0}")]
    InvalidNodeCount(usize),

    #[error("recipient {recipient} is outside a ring of {node_count} nodes")]
    RecipientOutOfRange { recipient: usize, node_count: usize },

    /// A node was left without one of its link ends during wiring.
    #[error("node {node_id} has no {direction} link bound")]
    Unbound { node_id: usize, direction: Direction },

    /// A node found its link end disconnected while running.
    #[error("configuration fault at node {node_id}: {direction} link is disconnected")]
    Configuration { node_id: usize, direction: Direction },

    #[error("node worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
