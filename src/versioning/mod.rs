//! Version selection subsystem.
//!
//! # Data Flow
//! ```text
//! Setup:
//!     (range, handler) pairs + DispatchConfig
//!     → range.rs (parse ranges, derive nominal versions)
//!     → candidates.rs (sort latest first, ties by registration order)
//!     → dispatcher.rs (immutable VersionDispatcher)
//!
//! Per request:
//!     route param / request header / default version
//!     → dispatcher.rs (extract requested version)
//!     → candidates.rs (first satisfied range, or latest)
//!     → context.rs (record ApiVersion + response header)
//!     → matched handler, or 400 UnsupportedVersion
//! ```
//!
//! # Design Decisions
//! - Framework agnostic: requests are seen through the traits in `context.rs`
//! - `*` and a missing version both mean "latest"
//! - Deterministic: same registry and request always select the same handler

pub mod candidates;
pub mod context;
pub mod dispatcher;
pub mod range;

pub use candidates::{find_candidate, sort_candidates, Candidate};
pub use context::{ApiVersion, HeaderReader, HeaderWriter, RouteParams, StateWriter};
pub use dispatcher::{DispatcherBuilder, Resolution, VersionDispatcher};
pub use range::{VersionRange, WILDCARD};
