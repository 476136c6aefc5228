//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::{body::Body, http::Request, response::Response, Router};
use tokio::net::TcpListener;
use tower::ServiceExt;

use version_dispatch::config::ServiceConfig;
use version_dispatch::HttpServer;

/// Start the service on an ephemeral port and return its address.
#[allow(dead_code)]
pub async fn start_server(mut config: ServiceConfig) -> SocketAddr {
    config.listener.bind_address = "127.0.0.1:0".to_string();
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.serve(listener, std::future::pending()).await;
    });

    addr
}

/// Send one request through a router in-process.
#[allow(dead_code)]
pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

/// Collect a response body as UTF-8.
#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
