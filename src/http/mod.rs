//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → GET /health    → health.rs
//!     → GET /ws        → websocket.rs (origin policy, upgrade) → session::run_echo
//!     → GET /, /static → static_files.rs
//! ```

pub mod health;
pub mod request;
pub mod server;
pub mod static_files;
pub mod websocket;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppContext, AppState, HttpServer};
pub use websocket::{OriginPolicy, Upgrader};
