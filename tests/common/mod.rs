//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sawthat_backend::config::AppConfig;
use sawthat_backend::datastore::{Datastore, StoreError};
use sawthat_backend::{HttpServer, Shutdown};
use tokio::net::TcpListener;

/// A running server on an ephemeral port. Shuts down on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the real server with the given config and datastore.
pub async fn start_server(mut config: AppConfig, store: Arc<dyn Datastore>) -> TestServer {
    config.listener.bind_address = "127.0.0.1:0".into();
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signal();
    let server = HttpServer::with_datastore(config, store);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer { addr, shutdown }
}

/// Start the server with defaults and an always-reachable datastore.
pub async fn start_default_server() -> TestServer {
    start_server(AppConfig::default(), Arc::new(StaticStore(true))).await
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Datastore with a fixed answer.
pub struct StaticStore(pub bool);

#[async_trait]
impl Datastore for StaticStore {
    async fn ping(&self) -> Result<(), StoreError> {
        if self.0 {
            Ok(())
        } else {
            Err(StoreError::Connect {
                address: "127.0.0.1:27017".into(),
                source: std::io::ErrorKind::ConnectionRefused.into(),
            })
        }
    }
}

/// Datastore that never answers.
pub struct StalledStore;

#[async_trait]
impl Datastore for StalledStore {
    async fn ping(&self) -> Result<(), StoreError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

/// Parse a `1h2m3.5s` / `850ms` style duration into seconds.
pub fn parse_uptime(text: &str) -> f64 {
    let mut total = 0.0;
    let mut number = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            continue;
        }
        let value: f64 = number.parse().unwrap();
        number.clear();
        let scale = match c {
            'h' => 3600.0,
            'm' if chars.peek() == Some(&'s') => {
                chars.next();
                1e-3
            }
            'm' => 60.0,
            's' => 1.0,
            'µ' => {
                chars.next();
                1e-6
            }
            'n' => {
                chars.next();
                1e-9
            }
            other => panic!("unexpected unit {other:?} in {text:?}"),
        };
        total += value * scale;
    }
    total
}
