//! Error types for version dispatch.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors raised while building a dispatcher or resolving a request.
#[derive(Debug, Error)]
pub enum VersionError {
    /// No registered range accepts the requested version and no fallback applies.
    #[error("Version {} is not supported", display_requested(.requested))]
    UnsupportedVersion {
        status: StatusCode,
        requested: Option<String>,
    },

    /// A registered range key could not be parsed by the comparator.
    #[error("invalid version range `{range}`: {source}")]
    InvalidRange {
        range: String,
        #[source]
        source: semver::Error,
    },

    /// The same range key was registered twice.
    #[error("version range `{range}` registered more than once")]
    DuplicateRange { range: String },
}

impl VersionError {
    pub(crate) fn unsupported(requested: Option<&str>) -> Self {
        VersionError::UnsupportedVersion {
            status: StatusCode::BAD_REQUEST,
            requested: requested.map(str::to_string),
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            VersionError::UnsupportedVersion { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn display_requested(requested: &Option<String>) -> &str {
    requested.as_deref().unwrap_or("null")
}

impl IntoResponse for VersionError {
    fn into_response(self) -> Response {
        (self.status(), self.message()).into_response()
    }
}
