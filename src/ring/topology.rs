//! Ring topology builder.
//!
//! Allocates the nodes and links of a ring and wires link `i` as node `i`'s
//! outbound and node `(i + 1) % n`'s inbound. Wiring goes through write-once
//! slots that are checked before any node exists, so a running node always
//! has both of its links.

use super::event::EventSink;
use super::link::{link, Direction, Inbound, Outbound};
use super::node::Node;
use crate::error::RingError;
use tracing::debug;

/// Wiring state of one node before validation.
#[derive(Debug)]
struct Slot {
    id: usize,
    inbound: Option<Inbound>,
    outbound: Option<Outbound>,
}

impl Slot {
    fn new(id: usize) -> Self {
        Self {
            id,
            inbound: None,
            outbound: None,
        }
    }

    fn bind_inbound(&mut self, inbound: Inbound) {
        debug_assert!(self.inbound.is_none(), "inbound bound twice");
        self.inbound = Some(inbound);
    }

    fn bind_outbound(&mut self, outbound: Outbound) {
        debug_assert!(self.outbound.is_none(), "outbound bound twice");
        self.outbound = Some(outbound);
    }

    /// Turn a fully wired slot into a node.
    fn into_node(self, events: EventSink) -> Result<Node, RingError> {
        let inbound = self.inbound.ok_or(RingError::Unbound {
            node_id: self.id,
            direction: Direction::Inbound,
        })?;
        let outbound = self.outbound.ok_or(RingError::Unbound {
            node_id: self.id,
            direction: Direction::Outbound,
        })?;
        Ok(Node::new(self.id, inbound, outbound, events))
    }
}

/// A fully wired ring of nodes, ordered by id.
#[derive(Debug)]
pub struct Ring {
    nodes: Vec<Node>,
}

impl Ring {
    /// Build a ring of `node_count` nodes reporting into `events`.
    pub fn build(node_count: usize, events: EventSink) -> Result<Self, RingError> {
        if node_count == 0 {
            return Err(RingError::InvalidNodeCount(node_count));
        }

        let mut slots: Vec<Slot> = (0..node_count).map(Slot::new).collect();
        for index in 0..node_count {
            let (outbound, inbound) = link(index);
            slots[index].bind_outbound(outbound);
            slots[(index + 1) % node_count].bind_inbound(inbound);
        }

        let nodes = slots
            .into_iter()
            .map(|slot| slot.into_node(events.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(nodes = node_count, "Ring wired");
        Ok(Self { nodes })
    }

    /// Number of nodes (and links) in the ring.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::event;
    use crate::ring::token::Token;

    fn build(node_count: usize) -> Ring {
        let (events, _stream) = event::channel();
        Ring::build(node_count, events).unwrap()
    }

    #[test]
    fn test_zero_nodes_rejected() {
        let (events, _stream) = event::channel();
        assert!(matches!(
            Ring::build(0, events),
            Err(RingError::InvalidNodeCount(0))
        ));
    }

    #[test]
    fn test_links_form_one_cycle() {
        for node_count in 1..=8 {
            let ring = build(node_count);
            assert_eq!(ring.len(), node_count);

            for (i, node) in ring.nodes().iter().enumerate() {
                assert_eq!(node.id(), i);
                assert_eq!(node.outbound.index(), i);
                let previous = (i + node_count - 1) % node_count;
                assert_eq!(node.inbound.index(), previous);
            }

            // Following outbound links from node 0 visits every node once
            let mut visited = vec![false; node_count];
            let mut current = 0;
            for _ in 0..node_count {
                assert!(!visited[current]);
                visited[current] = true;
                let link = ring.nodes()[current].outbound.index();
                current = ring
                    .nodes()
                    .iter()
                    .position(|node| node.inbound.index() == link)
                    .unwrap();
            }
            assert_eq!(current, 0);
            assert!(visited.iter().all(|seen| *seen));
        }
    }

    #[tokio::test]
    async fn test_tokens_travel_to_next_node() {
        let mut nodes = build(4).into_nodes();

        for i in 0..4 {
            nodes[i]
                .outbound
                .send(Token::new(format!("from {i}"), 0, 1))
                .await
                .unwrap();
            let next = (i + 1) % 4;
            let token = nodes[next].inbound.recv().await.unwrap();
            assert_eq!(token.data, format!("from {i}"));
        }
    }

    #[tokio::test]
    async fn test_single_node_is_a_self_loop() {
        let mut nodes = build(1).into_nodes();
        let node = &mut nodes[0];

        node.outbound.send(Token::new("solo", 0, 0)).await.unwrap();
        assert_eq!(node.inbound.recv().await.unwrap().data, "solo");
    }

    #[test]
    fn test_unbound_slot_rejected() {
        let (events, _stream) = event::channel();
        let (outbound, inbound) = link(0);

        let mut slot = Slot::new(5);
        slot.bind_outbound(outbound);
        assert!(matches!(
            slot.into_node(events.clone()),
            Err(RingError::Unbound {
                node_id: 5,
                direction: Direction::Inbound
            })
        ));

        let mut slot = Slot::new(6);
        slot.bind_inbound(inbound);
        assert!(matches!(
            slot.into_node(events),
            Err(RingError::Unbound {
                node_id: 6,
                direction: Direction::Outbound
            })
        ));
    }
}
