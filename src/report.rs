//! Event reporting.
//!
//! Drains the ring's event stream, logs each event and keeps a summary of the
//! token's journey. In settle mode the first terminal event triggers shutdown.

use crate::ring::{EventStream, RingEvent, Shutdown};
use tracing::{error, info, warn};

/// Outcome of a run as seen through its events.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Nodes the token passed through without being delivered.
    pub hops: usize,
    /// Node that received the message, if any.
    pub delivered_at: Option<usize>,
    /// Node where the token ran out of hops, if any.
    pub expired_at: Option<usize>,
    /// Configuration faults reported by nodes.
    pub faults: usize,
}

impl RunSummary {
    fn record(&mut self, event: &RingEvent) {
        match event {
            RingEvent::Delivered { node_id, .. } => self.delivered_at = Some(*node_id),
            RingEvent::Forwarded { .. } => self.hops += 1,
            RingEvent::Expired { node_id } => self.expired_at = Some(*node_id),
            RingEvent::ConfigurationFault { .. } => self.faults += 1,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.delivered_at.is_some() || self.expired_at.is_some() || self.faults > 0
    }
}

fn log_event(event: &RingEvent) {
    match event {
        RingEvent::Delivered { node_id, data } => {
            info!(node = node_id, message = %data, "Message delivered")
        }
        RingEvent::Forwarded {
            node_id,
            remaining_ttl,
        } => info!(node = node_id, remaining_ttl, "Token forwarded"),
        RingEvent::Expired { node_id } => warn!(node = node_id, "Token expired"),
        RingEvent::ConfigurationFault { node_id, direction } => {
            error!(node = node_id, %direction, "Configuration fault")
        }
    }
}

/// Consume events until every sink is gone.
///
/// With `exit_when_settled`, shutdown is triggered once the token is
/// delivered, expires, or a node faults.
pub async fn report(
    mut events: EventStream,
    shutdown: Shutdown,
    exit_when_settled: bool,
) -> RunSummary {
    let mut summary = RunSummary::default();

    while let Some(event) = events.recv().await {
        log_event(&event);
        summary.record(&event);

        if exit_when_settled && event.is_terminal() && !shutdown.is_triggered() {
            info!("Token settled, stopping ring");
            shutdown.trigger();
        }
    }

    summary
}
