//! Ring node and its receive/forward/deliver state machine.
//!
//! A node waits on its inbound link, and for every token that arrives either
//! delivers it (the node is the recipient), forwards it with one hop less, or
//! drops it once the hop budget is spent. The loop never ends on its own; it
//! only returns when the stop signal fires or a link turns out to be unusable.

use super::event::{EventSink, RingEvent};
use super::link::{Direction, Inbound, Outbound};
use super::shutdown::Stop;
use super::token::Token;
use crate::error::RingError;
use tracing::{debug, error, trace};

/// State of the receive loop.
#[derive(Debug)]
enum NodeState {
    /// Parked on the inbound link.
    AwaitingToken,
    /// Holding a token that has not been handled yet.
    Processing(Token),
}

/// What processing a token decided.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    /// Token reached its recipient.
    Deliver,
    /// Token continues to the next node.
    Forward(Token),
    /// Token ran out of hops.
    Expire,
}

/// A node in the ring.
///
/// Nodes are only created by the topology builder, fully wired.
#[derive(Debug)]
pub struct Node {
    pub(super) id: usize,
    pub(super) inbound: Inbound,
    pub(super) outbound: Outbound,
    events: EventSink,
}

impl Node {
    pub(super) fn new(id: usize, inbound: Inbound, outbound: Outbound, events: EventSink) -> Self {
        Self {
            id,
            inbound,
            outbound,
            events,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Put `token` on the ring, then keep serving like every other node.
    pub async fn initiate(self, token: Token, stop: Stop) -> Result<(), RingError> {
        debug!(
            node = self.id,
            recipient = token.recipient,
            ttl = token.ttl,
            "Injecting token"
        );
        self.forward(token, &stop).await?;
        self.wait(stop).await
    }

    /// Run the receive loop until stopped or faulted.
    pub async fn wait(mut self, mut stop: Stop) -> Result<(), RingError> {
        let mut state = NodeState::AwaitingToken;

        loop {
            state = match state {
                NodeState::AwaitingToken => {
                    tokio::select! {
                        biased;

                        _ = stop.stopped() => {
                            debug!(node = self.id, "Node stopped");
                            return Ok(());
                        }

                        received = self.inbound.recv() => match received {
                            Ok(token) => {
                                trace!(node = self.id, link = self.inbound.index(), "Token received");
                                NodeState::Processing(token)
                            }
                            // Neighbour already gone because the ring is shutting down
                            Err(_) if stop.is_stopping() => return Ok(()),
                            Err(_) => return Err(self.fault(Direction::Inbound)),
                        },
                    }
                }
                NodeState::Processing(token) => {
                    if let Step::Forward(token) = self.process(token) {
                        self.forward(token, &stop).await?;
                    }
                    NodeState::AwaitingToken
                }
            };
        }
    }

    /// Apply the delivery policy to a received token.
    fn process(&self, mut token: Token) -> Step {
        trace!(node = self.id, recipient = token.recipient, ttl = token.ttl, "Processing token");

        if token.is_for(self.id) {
            self.events.emit(RingEvent::Delivered {
                node_id: self.id,
                data: token.data,
            });
            return Step::Deliver;
        }

        let remaining_ttl = token.spend_hop();
        self.events.emit(RingEvent::Forwarded {
            node_id: self.id,
            remaining_ttl,
        });

        if token.has_hops_left() {
            Step::Forward(token)
        } else {
            self.events.emit(RingEvent::Expired { node_id: self.id });
            Step::Expire
        }
    }

    async fn forward(&self, token: Token, stop: &Stop) -> Result<(), RingError> {
        trace!(node = self.id, link = self.outbound.index(), "Sending token");
        match self.outbound.send(token).await {
            Ok(()) => Ok(()),
            Err(_) if stop.is_stopping() => Ok(()),
            Err(_) => Err(self.fault(Direction::Outbound)),
        }
    }

    fn fault(&self, direction: Direction) -> RingError {
        error!(node = self.id, %direction, "Link disconnected");
        self.events.emit(RingEvent::ConfigurationFault {
            node_id: self.id,
            direction,
        });
        RingError::Configuration {
            node_id: self.id,
            direction,
        }
    }
}
