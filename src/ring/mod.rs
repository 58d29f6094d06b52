//! Token-ring core.
//!
//! Building blocks, leaves first:
//! - `Token`: the message circulating through the ring
//! - `Inbound`/`Outbound`: the two ends of a single-slot link
//! - `RingEvent`/`EventSink`: what nodes report while handling the token
//! - `Shutdown`/`Stop`: the signal that lets the ring wind down
//! - `Node`: the receive/forward/deliver state machine
//! - `Ring`: the builder that wires nodes into one cycle

pub mod event;
mod link;
mod node;
mod shutdown;
mod token;
mod topology;

pub use event::{EventSink, EventStream, RingEvent};
pub use link::Direction;
pub use node::Node;
pub use shutdown::{Shutdown, Stop};
pub use token::Token;
pub use topology::Ring;
