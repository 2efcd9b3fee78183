//! TCP reachability probe.

use async_trait::async_trait;
use tokio::net::TcpStream;

use super::{Datastore, StoreError};

/// A store that counts as reachable when its port accepts a connection.
#[derive(Debug, Clone)]
pub struct TcpDatastore {
    address: String,
}

impl TcpDatastore {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

#[async_trait]
impl Datastore for TcpDatastore {
    async fn ping(&self) -> Result<(), StoreError> {
        let stream = TcpStream::connect(&self.address)
            .await
            .map_err(|source| StoreError::Connect {
                address: self.address.clone(),
                source,
            })?;
        drop(stream);
        Ok(())
    }
}
