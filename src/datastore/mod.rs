//! Dependency store handle.
//!
//! The health reporter only needs to know whether the store answers, so the
//! seam is a single cancellable `ping`. Concrete stores decide what a ping is.

pub mod http;
pub mod tcp;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{DatastoreConfig, DatastoreKind};

pub use self::http::HttpDatastore;
pub use self::tcp::TcpDatastore;

/// Why a reachability probe failed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no datastore configured")]
    NotConfigured,

    #[error("connect to {address} failed: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("probe timed out after {0:?}")]
    Timeout(Duration),
}

/// A store whose reachability can be probed.
///
/// Dropping the returned future must abort the probe.
#[async_trait]
pub trait Datastore: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Stand-in used when no store is configured. Never reachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredDatastore;

#[async_trait]
impl Datastore for UnconfiguredDatastore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::NotConfigured)
    }
}

/// Build the store handle described by the configuration.
///
/// Expects a validated config; an unparsable HTTP address falls back to the
/// unconfigured store.
pub fn from_config(config: &DatastoreConfig) -> Arc<dyn Datastore> {
    match config.kind {
        DatastoreKind::None => Arc::new(UnconfiguredDatastore),
        DatastoreKind::Tcp => Arc::new(TcpDatastore::new(config.address.clone())),
        DatastoreKind::Http => match HttpDatastore::new(&config.address) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!(address = %config.address, error = %e, "Invalid datastore URL");
                Arc::new(UnconfiguredDatastore)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_never_answers() {
        let store = from_config(&DatastoreConfig::default());
        assert!(matches!(store.ping().await, Err(StoreError::NotConfigured)));
    }
}
