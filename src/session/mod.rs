//! Per-connection echo sessions.
//!
//! # Data Flow
//! ```text
//! Upgraded WebSocket
//!     → connection.rs (assign ConnectionId, open SessionGuard)
//!     → echo.rs (read → log → write back, until close or error)
//!     → guard dropped, connection released
//! ```
//!
//! # Design Decisions
//! - One task per connection, spawned by the upgrade
//! - Sessions share nothing; there is no registry of live connections
//! - A failing session returns an error to its own task only
//! - No idle timeout: a silent client holds its task open indefinitely

pub mod connection;
pub mod echo;

pub use connection::{ConnectionId, SessionGuard};
pub use echo::{run_echo, MessageKind, SessionError, Termination};
