//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the backend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Application identity reported by `/health`.
    pub app: AppIdentityConfig,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// WebSocket upgrade settings shared by every connection.
    pub websocket: WebSocketConfig,

    /// Dependency store probed by the health reporter.
    pub datastore: DatastoreConfig,

    /// Static root document and assets.
    pub static_files: StaticFilesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Application identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppIdentityConfig {
    /// Application name.
    pub name: String,

    /// Build identifier. Falls back to the `BUILD_HASH` env var at compile time.
    pub build: Option<String>,

    /// Force the container-mode flag instead of detecting it.
    pub docker: Option<bool>,
}

impl Default for AppIdentityConfig {
    fn default() -> Self {
        Self {
            name: "SawThat".to_string(),
            build: None,
            docker: None,
        }
    }
}

impl AppIdentityConfig {
    /// Resolve the build identifier.
    pub fn build_id(&self) -> String {
        self.build
            .clone()
            .or_else(|| option_env!("BUILD_HASH").map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// WebSocket upgrade configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebSocketConfig {
    /// Read buffer capacity in bytes.
    pub read_buffer_size: usize,

    /// Write buffer capacity in bytes.
    pub write_buffer_size: usize,

    /// Maximum accepted message size. Transport default when unset.
    pub max_message_size: Option<usize>,

    /// Origins allowed to upgrade. Empty accepts every origin.
    pub allowed_origins: Vec<String>,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: 1024,
            write_buffer_size: 1024,
            max_message_size: None,
            allowed_origins: Vec::new(),
        }
    }
}

/// Kind of dependency store to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatastoreKind {
    /// No store configured; the probe always reports unreachable.
    #[default]
    None,
    /// Reachability is a TCP connect to `address`.
    Tcp,
    /// Reachability is a successful GET on `address`.
    Http,
}

/// Dependency store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatastoreConfig {
    pub kind: DatastoreKind,

    /// `host:port` for tcp, a URL for http.
    pub address: String,

    /// Probe timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for DatastoreConfig {
    fn default() -> Self {
        Self {
            kind: DatastoreKind::None,
            address: String::new(),
            timeout_ms: 2000,
        }
    }
}

/// Static file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory holding `index.html` and assets.
    pub dir: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            dir: "public".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
