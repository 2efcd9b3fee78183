//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ws_active_connections` (gauge): upgraded connections with a running echo loop
//! - `ws_messages_echoed_total` (counter): echoed messages by kind
//! - `ws_upgrade_failures_total` (counter): failed upgrades by reason
//! - `health_checks_total` (counter): health requests by datastore reachability

use std::net::SocketAddr;

use ::metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::session::MessageKind;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_connection_opened() {
    gauge!("ws_active_connections").increment(1.0);
}

pub fn record_connection_closed() {
    gauge!("ws_active_connections").decrement(1.0);
}

pub fn record_message_echoed(kind: MessageKind) {
    counter!("ws_messages_echoed_total", "kind" => kind.as_str()).increment(1);
}

pub fn record_upgrade_failure(reason: &'static str) {
    counter!("ws_upgrade_failures_total", "reason" => reason).increment(1);
}

pub fn record_health_check(database_ping: bool) {
    let database = if database_ping { "up" } else { "down" };
    counter!("health_checks_total", "database" => database).increment(1);
}
