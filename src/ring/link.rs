//! Single-slot links between adjacent nodes.
//!
//! A link is a bounded channel with room for exactly one token. Sending into
//! an occupied link suspends the sender until the receiver drains the slot,
//! which keeps at most one token in transit per link.
//!
//! Neither end is `Clone`, so every link has exactly one producer and one
//! consumer.

use super::token::Token;
use std::fmt;
use tokio::sync::mpsc;

/// Number of tokens a link can hold.
pub const LINK_CAPACITY: usize = 1;

/// Which side of a node a link is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inbound => write!(f, "inbound"),
            Direction::Outbound => write!(f, "outbound"),
        }
    }
}

/// Link operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// The other end of the link has been dropped.
    #[error("link {0} is disconnected")]
    Disconnected(usize),
}

/// Create link `index`, returning its sending and receiving ends.
pub fn link(index: usize) -> (Outbound, Inbound) {
    let (tx, rx) = mpsc::channel(LINK_CAPACITY);
    (Outbound { index, tx }, Inbound { index, rx })
}

/// Sending end of a link.
#[derive(Debug)]
pub struct Outbound {
    index: usize,
    tx: mpsc::Sender<Token>,
}

impl Outbound {
    /// Position of this link in the ring.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Place a token in the link, waiting while the slot is occupied.
    pub async fn send(&self, token: Token) -> Result<(), LinkError> {
        self.tx
            .send(token)
            .await
            .map_err(|_| LinkError::Disconnected(self.index))
    }
}

/// Receiving end of a link.
#[derive(Debug)]
pub struct Inbound {
    index: usize,
    rx: mpsc::Receiver<Token>,
}

impl Inbound {
    /// Position of this link in the ring.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Wait for a token and take it out of the link.
    pub async fn recv(&mut self) -> Result<Token, LinkError> {
        self.rx.recv().await.ok_or(LinkError::Disconnected(self.index))
    }
}
