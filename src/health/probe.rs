//! Datastore reachability probe.

use std::time::Duration;

use tokio::time;

use crate::datastore::{Datastore, StoreError};

/// Ping the store within `timeout`, reporting reachability as a boolean.
///
/// Errors and timeouts are logged and collapse to `false`. Dropping the
/// returned future cancels the in-flight ping.
pub async fn probe_datastore(store: &dyn Datastore, timeout: Duration) -> bool {
    match time::timeout(timeout, store.ping()).await {
        Ok(Ok(())) => true,
        Ok(Err(StoreError::NotConfigured)) => {
            tracing::debug!("Datastore probe skipped: not configured");
            false
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Datastore probe failed");
            false
        }
        Err(_) => {
            tracing::warn!(error = %StoreError::Timeout(timeout), "Datastore probe failed");
            false
        }
    }
}
