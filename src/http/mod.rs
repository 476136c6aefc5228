//! HTTP integration for the version dispatcher.
//!
//! # Data Flow
//! ```text
//! axum Router (path params extracted)
//!     → middleware.rs (version_middleware)
//!     → context.rs (RequestView over headers + RawPathParams)
//!     → VersionDispatcher::resolve
//!     → ApiVersion extension + response header
//!     → matched VersionHandler (request, next)
//! ```

pub mod context;
pub mod middleware;
pub mod server;

pub use context::RequestView;
pub use middleware::{version_middleware, VersionHandler, VersionRouter};
pub use server::{EchoBody, HttpServer};
