//! WebSocket upgrade handling.
//!
//! # Responsibilities
//! - Apply the origin policy to each upgrade attempt
//! - Complete the upgrade handshake with buffer sizes fixed at startup
//! - Hand each upgraded socket to its own echo session
//!
//! # Design Decisions
//! - The `Upgrader` is built once from config and shared read-only
//! - Every origin is accepted unless `websocket.allowed_origins` is set
//! - Upgrade failures end the attempt only; they are logged and counted

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header::ORIGIN, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::StreamExt;

use crate::config::WebSocketConfig;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::session::{run_echo, SessionGuard};

/// Which declared origins may upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginPolicy {
    /// No origin restriction.
    AcceptAll,
    /// Only these origins, compared case-insensitively. Requests without an
    /// `Origin` header come from non-browser clients and are accepted.
    AllowList(Vec<String>),
}

impl OriginPolicy {
    pub fn from_config(allowed: &[String]) -> Self {
        if allowed.is_empty() {
            Self::AcceptAll
        } else {
            Self::AllowList(allowed.iter().map(|o| o.trim().to_string()).collect())
        }
    }

    pub fn accepts(&self, origin: Option<&str>) -> bool {
        match (self, origin) {
            (Self::AcceptAll, _) | (Self::AllowList(_), None) => true,
            (Self::AllowList(allowed), Some(origin)) => {
                allowed.iter().any(|a| a.eq_ignore_ascii_case(origin))
            }
        }
    }
}

/// Immutable upgrade settings shared by every connection.
#[derive(Debug, Clone)]
pub struct Upgrader {
    read_buffer_size: usize,
    write_buffer_size: usize,
    max_message_size: Option<usize>,
    origin_policy: OriginPolicy,
}

impl Upgrader {
    pub fn from_config(config: &WebSocketConfig) -> Self {
        Self {
            read_buffer_size: config.read_buffer_size,
            write_buffer_size: config.write_buffer_size,
            max_message_size: config.max_message_size,
            origin_policy: OriginPolicy::from_config(&config.allowed_origins),
        }
    }

    pub fn origin_policy(&self) -> &OriginPolicy {
        &self.origin_policy
    }

    /// Check the origin and complete the handshake, spawning one echo session.
    pub fn upgrade(&self, ws: WebSocketUpgrade, origin: Option<&str>) -> Response {
        if !self.origin_policy.accepts(origin) {
            tracing::warn!(origin = ?origin, "WebSocket upgrade rejected: origin not allowed");
            metrics::record_upgrade_failure("origin");
            return (StatusCode::FORBIDDEN, "Origin not allowed").into_response();
        }

        let mut ws = ws
            .read_buffer_size(self.read_buffer_size)
            .write_buffer_size(self.write_buffer_size);
        if let Some(max) = self.max_message_size {
            ws = ws.max_message_size(max);
        }

        ws.on_failed_upgrade(|e| {
            tracing::warn!(error = %e, "WebSocket handshake failed");
            metrics::record_upgrade_failure("handshake");
        })
        .on_upgrade(handle_socket)
    }
}

/// `GET /ws`.
pub async fn ws_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Invalid WebSocket upgrade request");
            metrics::record_upgrade_failure("request");
            return rejection.into_response();
        }
    };

    let origin = headers.get(ORIGIN).and_then(|v| v.to_str().ok());
    state.upgrader.upgrade(ws, origin)
}

/// Own one upgraded connection until its echo loop ends.
async fn handle_socket(socket: WebSocket) {
    let guard = SessionGuard::open();
    let id = guard.id();
    tracing::info!(connection_id = %id, "Client successfully connected to WebSocket");

    let (outbound, inbound) = socket.split();
    match run_echo(id, inbound, outbound).await {
        Ok(termination) => {
            tracing::info!(connection_id = %id, termination = ?termination, "Connection closed");
        }
        Err(e) => {
            tracing::warn!(connection_id = %id, error = %e, "Connection terminated");
        }
    }
}
