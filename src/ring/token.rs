//! The token circulating through the ring.

/// The single message unit passed from node to node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Message payload.
    pub data: String,
    /// Id of the node the message is addressed to.
    pub recipient: usize,
    /// Remaining hop budget.
    pub ttl: i64,
}

impl Token {
    /// Create a new token.
    pub fn new(data: impl Into<String>, recipient: usize, ttl: i64) -> Self {
        Self {
            data: data.into(),
            recipient,
            ttl,
        }
    }

    /// Whether the token is addressed to `node_id`.
    pub fn is_for(&self, node_id: usize) -> bool {
        self.recipient == node_id
    }

    /// Spend one hop of the budget and return what is left.
    ///
    /// The budget may go negative when the token was injected without any.
    pub fn spend_hop(&mut self) -> i64 {
        self.ttl -= 1;
        self.ttl
    }

    /// Whether the token may still be forwarded.
    pub fn has_hops_left(&self) -> bool {
        self.ttl > 0
    }
}
