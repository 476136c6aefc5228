//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build one handler per configured version
//! - Mount the version middleware on header and route parameter paths
//! - Wire up middleware (tracing, timeout)
//! - Serve until shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::error::VersionError;
use crate::http::middleware::{version_middleware, VersionHandler, VersionRouter};
use crate::versioning::ApiVersion;

/// Body returned by the demo version handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoBody {
    pub label: String,
    pub version: Option<String>,
    pub path: String,
}

/// HTTP server for the versioned API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, VersionError> {
        let router = Self::build_router(&config)?;
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &ServiceConfig) -> Result<Router, VersionError> {
        let versions = Arc::new(VersionRouter::new(
            config
                .versions
                .iter()
                .map(|v| (v.range.clone(), echo_handler(v.label.clone()))),
            config.dispatch.clone(),
        )?);

        let mut api = Router::new().route("/api/{*rest}", any(unclaimed));
        if !config.dispatch.route_param.is_empty() {
            let path = format!("/{{{}}}/api/{{*rest}}", config.dispatch.route_param);
            api = api.route(&path, any(unclaimed));
        }

        Ok(api
            .route_layer(middleware::from_fn_with_state(versions, version_middleware))
            .route("/health", get(health))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http()))
    }

    /// Run the server until Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.serve(listener, shutdown_signal()).await
    }

    /// Run the server until `shutdown` completes.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for driving the service in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Handler that reports which version served the request.
fn echo_handler(label: String) -> VersionHandler {
    VersionHandler::from_fn(move |req: Request<Body>, _next: Next| {
        let label = label.clone();
        async move {
            Json(EchoBody {
                label,
                version: req.extensions().get::<ApiVersion>().map(|v| v.0.clone()),
                path: req.uri().path().to_string(),
            })
        }
    })
}

/// Reached only when a version handler passes the request on.
async fn unclaimed() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "No handler claimed this request")
}

async fn health() -> &'static str {
    "ok"
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
