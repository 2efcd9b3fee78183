//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → wait_for_shutdown() resolves
//!
//! Shutdown (shutdown.rs):
//!     trigger() → ShutdownSignal::fired() resolves → HTTP server stops accepting → in-flight requests drain → exit
//! ```
//!
//! # Design Decisions
//! - Startup is fail fast: config, bind and exporter errors abort before serving
//! - Upgraded connections are not drained; their tasks end with the process

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
