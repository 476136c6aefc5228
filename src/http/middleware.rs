//! Version dispatch middleware.
//!
//! Mount with `route_layer` so path parameters are already extracted:
//!
//! ```ignore
//! let versions = Arc::new(VersionRouter::new(
//!     [("1.x", VersionHandler::from_service(v1)), ("2.x", VersionHandler::from_service(v2))],
//!     DispatchConfig::default(),
//! )?);
//!
//! Router::new()
//!     .route("/{version}/users", get(not_found))
//!     .route_layer(middleware::from_fn_with_state(versions, version_middleware));
//! ```

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, RawPathParams, State},
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures_util::future::{BoxFuture, FutureExt};
use tower::{Service, ServiceExt};

use crate::http::context::RequestView;
use crate::versioning::VersionDispatcher;

type HandlerFn = dyn Fn(Request<Body>, Next) -> BoxFuture<'static, Response> + Send + Sync;

/// Handler registered for one version range.
///
/// Receives the request and the continuation of the middleware stack.
#[derive(Clone)]
pub struct VersionHandler {
    inner: Arc<HandlerFn>,
}

impl VersionHandler {
    /// Wrap a function that may pass control on through `next`.
    pub fn from_fn<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request<Body>, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + 'static,
    {
        Self {
            inner: Arc::new(move |req: Request<Body>, next: Next| {
                f(req, next).map(IntoResponse::into_response).boxed()
            }),
        }
    }

    /// Wrap a terminal service, such as a per-version `axum::Router`.
    /// The continuation is not used.
    pub fn from_service<S>(service: S) -> Self
    where
        S: Service<Request<Body>, Error = Infallible> + Clone + Send + Sync + 'static,
        S::Response: IntoResponse,
        S::Future: Send + 'static,
    {
        Self::from_fn(move |req: Request<Body>, _next: Next| {
            let service = service.clone();
            async move {
                match service.oneshot(req).await {
                    Ok(response) => response.into_response(),
                    Err(never) => match never {},
                }
            }
        })
    }

    pub async fn call(&self, req: Request<Body>, next: Next) -> Response {
        (self.inner)(req, next).await
    }
}

impl fmt::Debug for VersionHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionHandler").finish_non_exhaustive()
    }
}

/// Dispatcher over axum handlers.
pub type VersionRouter = VersionDispatcher<VersionHandler>;

/// Select the handler for the requested version and run it.
///
/// Unsupported versions are answered with `400 Bad Request` before any
/// handler runs.
pub async fn version_middleware(
    State(router): State<Arc<VersionRouter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let params = RawPathParams::from_request_parts(&mut parts, &()).await.ok();

    let resolution = {
        let view = RequestView::new(&parts.headers, params.as_ref());
        match router.resolve(&view) {
            Ok(r) => r,
            Err(e) => return e.into_response(),
        }
    };

    resolution.record_state(&mut parts.extensions);
    let mut outgoing = HeaderMap::new();
    resolution.record_header(&mut outgoing);

    let handler = resolution.handler().clone();
    let mut response = handler.call(Request::from_parts(parts, body), next).await;

    // The header counts as set before the handler ran, so its own value wins.
    let headers = response.headers_mut();
    for (name, value) in outgoing.iter() {
        headers.entry(name).or_insert_with(|| value.clone());
    }

    response
}
