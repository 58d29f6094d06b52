//! Stop signal shared by every node of a ring.
//!
//! Nodes wait for tokens forever unless someone triggers the [`Shutdown`]
//! handle. Dropping the handle without triggering it leaves them waiting.

use std::sync::Arc;
use tokio::sync::watch;

/// Trigger side of the stop signal.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    /// Create an untriggered signal.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Create a receiver for one worker.
    pub fn subscribe(&self) -> Stop {
        Stop {
            rx: self.tx.subscribe(),
        }
    }

    /// Ask every subscribed worker to stop.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Whether shutdown has been requested.
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of the stop signal, held by each node.
#[derive(Debug, Clone)]
pub struct Stop {
    rx: watch::Receiver<bool>,
}

impl Stop {
    /// Resolve once shutdown has been triggered.
    ///
    /// Never resolves if the [`Shutdown`] handle is dropped untriggered.
    pub async fn stopped(&mut self) {
        let triggered = self.rx.wait_for(|stopping| *stopping).await.map(|_| ());
        if triggered.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// Whether shutdown has been requested, without waiting.
    pub fn is_stopping(&self) -> bool {
        *self.rx.borrow()
    }
}
