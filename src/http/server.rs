//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (timeout, request ID, tracing)
//! - Build the process-wide context handlers read from
//! - Bind server to listener with graceful shutdown

use axum::{body::Body, http::Request, routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Span;

use crate::config::AppConfig;
use crate::datastore::{self, Datastore};
use crate::health::{ServiceIdentity, StartTime};
use crate::lifecycle::ShutdownSignal;
use crate::http::health::health_handler;
use crate::http::request::{request_id_of, MakeRequestUuid};
use crate::http::static_files;
use crate::http::websocket::{ws_handler, Upgrader};

/// Process-wide, read-only inputs of the health reporter.
pub struct AppContext {
    pub identity: ServiceIdentity,
    pub started: StartTime,
    pub datastore: Arc<dyn Datastore>,
    pub probe_timeout: Duration,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<AppContext>,
    pub upgrader: Arc<Upgrader>,
}

/// HTTP server for the backend.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server, building the datastore from configuration.
    pub fn new(config: AppConfig) -> Self {
        let store = datastore::from_config(&config.datastore);
        Self::with_datastore(config, store)
    }

    /// Create a new HTTP server probing the given datastore.
    pub fn with_datastore(config: AppConfig, datastore: Arc<dyn Datastore>) -> Self {
        let context = AppContext {
            identity: ServiceIdentity::from_config(&config.app),
            started: StartTime::now(),
            datastore,
            probe_timeout: Duration::from_millis(config.datastore.timeout_ms),
        };

        let state = AppState {
            context: Arc::new(context),
            upgrader: Arc::new(Upgrader::from_config(&config.websocket)),
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/ws", get(ws_handler))
            .merge(static_files::routes(Path::new(&config.static_files.dir)))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.fired().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a clone of the router, for in-process requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id_of(request),
    )
}
