//! Events emitted by ring nodes.
//!
//! Nodes never format output themselves; they push [`RingEvent`]s into an
//! [`EventSink`] and whoever drains the matching [`EventStream`] decides how
//! to present them.

use super::link::Direction;
use tokio::sync::mpsc;
use tracing::trace;

/// Something observable that happened at a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingEvent {
    /// The token reached its recipient.
    Delivered { node_id: usize, data: String },
    /// The token passed through a node that is not its recipient.
    Forwarded { node_id: usize, remaining_ttl: i64 },
    /// The token ran out of hops at this node and was dropped.
    Expired { node_id: usize },
    /// A node found one of its links unusable.
    ConfigurationFault { node_id: usize, direction: Direction },
}

impl RingEvent {
    /// Whether the token's journey ends with this event.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RingEvent::Forwarded { .. })
    }
}

/// Receiving side of the event channel.
pub type EventStream = mpsc::UnboundedReceiver<RingEvent>;

/// Create a connected sink/stream pair.
pub fn channel() -> (EventSink, EventStream) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSink { tx }, rx)
}

/// Sending side of the event channel, cloned into every node.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<RingEvent>,
}

impl EventSink {
    /// Publish an event. Events are discarded once the stream is gone.
    pub fn emit(&self, event: RingEvent) {
        trace!(?event, "Ring event");
        let _ = self.tx.send(event);
    }
}
