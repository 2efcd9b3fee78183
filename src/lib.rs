//! SawThat backend: health reporting and a WebSocket echo channel.

pub mod config;
pub mod datastore;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod session;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownSignal};
