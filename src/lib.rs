//! API version dispatch for axum services.
//!
//! Picks, per request, which registered handler serves it, based on the
//! requested API version (route parameter or header) matched against
//! semantic-version ranges.

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod versioning;

pub use config::{DispatchConfig, ServiceConfig};
pub use error::VersionError;
pub use http::{version_middleware, HttpServer, VersionHandler, VersionRouter};
pub use versioning::{find_candidate, sort_candidates, ApiVersion, VersionDispatcher};
