//! HTTP reachability probe.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::{Datastore, StoreError};

/// A store that exposes an HTTP status URL. Any 2xx counts as reachable.
#[derive(Debug, Clone)]
pub struct HttpDatastore {
    url: Url,
    client: Client,
}

impl HttpDatastore {
    pub fn new(url: &str) -> Result<Self, StoreError> {
        let client = Client::builder().no_proxy().build()?;
        Ok(Self {
            url: Url::parse(url)?,
            client,
        })
    }
}

#[async_trait]
impl Datastore for HttpDatastore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
