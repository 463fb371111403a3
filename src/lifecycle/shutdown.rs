//! Stop signal shared by the HTTP server and the test harness.
//!
//! `main` owns one `Shutdown`, hands a receiver to `HttpServer::run` and
//! triggers it once SIGINT or SIGTERM arrives. Integration tests do the same
//! for each service instance they start.

use tokio::sync::broadcast;

pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver for a server loop; it resolves once `trigger` is called.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Tell every subscribed server to stop accepting and drain.
    ///
    /// Returns how many subscribers were notified. Triggering with nobody
    /// listening, or more than once, is a no-op.
    pub fn trigger(&self) -> usize {
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::info!(servers = notified, "Shutdown triggered");
        notified
    }

    pub fn listeners(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
