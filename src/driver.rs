//! Ring driver.
//!
//! Builds the ring, starts nodes `1..n` as tokio tasks, injects the token at
//! node 0 and runs node 0's loop on the calling task. Every worker's result is
//! collected through a `JoinSet`, so a fault at any node ends the run.

use crate::error::RingError;
use crate::ring::{EventSink, Node, Ring, Stop, Token};
use std::future::Future;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Validated inputs of one ring run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingParams {
    pub node_count: usize,
    pub initial_ttl: i64,
    pub recipient_id: usize,
    pub message: String,
}

impl RingParams {
    pub fn validate(&self) -> Result<(), RingError> {
        if self.node_count == 0 {
            return Err(RingError::InvalidNodeCount(self.node_count));
        }
        if self.recipient_id >= self.node_count {
            return Err(RingError::RecipientOutOfRange {
                recipient: self.recipient_id,
                node_count: self.node_count,
            });
        }
        Ok(())
    }

    /// The token node 0 injects.
    pub fn token(&self) -> Token {
        Token::new(self.message.clone(), self.recipient_id, self.initial_ttl)
    }
}

/// Run the ring until `stop` fires or a node faults.
///
/// Nodes keep waiting for tokens after delivery or expiry, so without a stop
/// signal this never returns.
pub async fn run(params: &RingParams, events: EventSink, stop: Stop) -> Result<(), RingError> {
    params.validate()?;

    let ring = Ring::build(params.node_count, events)?;
    info!(
        nodes = ring.len(),
        recipient = params.recipient_id,
        ttl = params.initial_ttl,
        "Starting ring"
    );

    run_nodes(ring.into_nodes(), params.token(), stop).await
}

/// Start every node but the first as a worker and run the first as origin.
async fn run_nodes(nodes: Vec<Node>, token: Token, stop: Stop) -> Result<(), RingError> {
    let mut nodes = nodes.into_iter();
    let Some(origin) = nodes.next() else {
        return Err(RingError::InvalidNodeCount(0));
    };

    let mut workers = JoinSet::new();
    for node in nodes {
        debug!(node = node.id(), "Spawning node worker");
        workers.spawn(node.wait(stop.clone()));
    }

    supervise(origin.initiate(token, stop), workers).await
}

/// Drive the origin's loop while collecting worker results.
///
/// The first fault from either side is returned; dropping `workers` on the
/// way out aborts whatever is still running.
async fn supervise<F>(
    origin: F,
    mut workers: JoinSet<Result<(), RingError>>,
) -> Result<(), RingError>
where
    F: Future<Output = Result<(), RingError>>,
{
    tokio::pin!(origin);

    loop {
        tokio::select! {
            result = &mut origin => {
                result?;
                break;
            }
            Some(joined) = workers.join_next() => joined??,
        }
    }

    // Node 0 only returns cleanly once stopped; the others follow
    while let Some(joined) = workers.join_next().await {
        joined??;
    }

    info!("Ring stopped");
    Ok(())
}
