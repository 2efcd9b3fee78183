//! `GET /health`.

use axum::{extract::State, Json};

use crate::health::{probe_datastore, HealthSnapshot};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Report identity, uptime and datastore reachability. Always 200.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthSnapshot> {
    let ctx = &state.context;
    let database_ping = probe_datastore(ctx.datastore.as_ref(), ctx.probe_timeout).await;
    metrics::record_health_check(database_ping);

    Json(HealthSnapshot::capture(&ctx.identity, &ctx.started, database_ping))
}
