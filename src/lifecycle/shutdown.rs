//! Shutdown coordination for the service.
//!
//! One `Shutdown` lives in `main` (or a test harness). The HTTP server holds a
//! `ShutdownSignal` and starts draining once it fires.

use tokio::sync::watch;

/// Owner side: flips the process into shutdown exactly once.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// A signal for one task to wait on.
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Start shutdown. Later calls are no-ops.
    pub fn trigger(&self) {
        self.tx.send_if_modified(|fired| !std::mem::replace(fired, true));
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Waiter side, handed to the server.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve once shutdown is triggered, or once the `Shutdown` is gone.
    ///
    /// A signal taken after `trigger` resolves immediately.
    pub async fn fired(mut self) {
        // Err means the sender was dropped; nobody can keep us running.
        let _ = self.rx.wait_for(|fired| *fired).await;
    }
}
