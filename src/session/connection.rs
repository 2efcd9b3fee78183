//! Session identity and lifetime accounting.
//!
//! Every upgraded socket gets a `conn-N` tag that appears on each log line of
//! its session, and a `SessionGuard` that keeps `ws_active_connections` equal
//! to the number of live sessions.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::observability::metrics;

// Only uniqueness matters, so relaxed ordering is enough.
static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Tag of one upgraded connection, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new() -> Self {
        Self(NEXT_SESSION.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Held by a session task for as long as it owns its socket.
///
/// Counts the session as active on open. Dropping it, on any exit path
/// including unwind, removes it from the gauge and logs how long it lived.
#[derive(Debug)]
pub struct SessionGuard {
    id: ConnectionId,
    opened: Instant,
}

impl SessionGuard {
    /// Open a session under a fresh connection ID.
    pub fn open() -> Self {
        metrics::record_connection_opened();
        Self {
            id: ConnectionId::new(),
            opened: Instant::now(),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn age(&self) -> Duration {
        self.opened.elapsed()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        metrics::record_connection_closed();
        tracing::debug!(
            connection_id = %self.id,
            lived_ms = self.age().as_millis() as u64,
            "Session released"
        );
    }
}
