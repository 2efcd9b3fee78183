//! Health reporting subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health
//!     → probe.rs (cancellable datastore ping, bounded by timeout)
//!     → snapshot.rs (one instant → time + uptime, identity fields)
//!     → JSON response, always 200
//! ```
//!
//! # Design Decisions
//! - Probe failure is data (`databasePing: false`), never an error response
//! - Snapshots are built fresh per request and never cached
//! - Uptime comes from a monotonic clock so it never goes backwards

pub mod probe;
pub mod snapshot;
pub mod uptime;

pub use probe::probe_datastore;
pub use snapshot::{HealthSnapshot, ServiceIdentity, StartTime};
pub use uptime::format_uptime;
