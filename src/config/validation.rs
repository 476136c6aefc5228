//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Header names must be valid HTTP header names
//! - Version ranges must parse and be unique
//! - Value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;

use crate::config::schema::{DispatchConfig, ServiceConfig};
use crate::versioning::VersionRange;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is not a valid header name: `{value}`")]
    InvalidHeaderName { field: &'static str, value: String },

    #[error("route_param must not contain '/': `{0}`")]
    InvalidRouteParam(String),

    #[error("invalid version range `{range}`: {reason}")]
    InvalidRange { range: String, reason: String },

    #[error("version range `{0}` listed more than once")]
    DuplicateRange(String),

    #[error("{field} is not a socket address: `{value}`")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a full service configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_dispatch(&config.dispatch, &mut errors);

    // An empty version list is allowed; every versioned request is then rejected.

    let mut seen = HashSet::new();
    for entry in config.versions.iter() {
        if let Err(e) = VersionRange::parse(entry.range.as_str()) {
            errors.push(ValidationError::InvalidRange {
                range: entry.range.clone(),
                reason: e.to_string(),
            });
        }
        if !seen.insert(entry.range.as_str()) {
            errors.push(ValidationError::DuplicateRange(entry.range.clone()));
        }
    }

    check_address("listener.bind_address", &config.listener.bind_address, &mut errors);
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_dispatch(config: &DispatchConfig, errors: &mut Vec<ValidationError>) {
    for (field, value) in [
        ("dispatch.request_header", &config.request_header),
        ("dispatch.response_header", &config.response_header),
    ] {
        if HeaderName::from_bytes(value.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidHeaderName {
                field,
                value: value.clone(),
            });
        }
    }

    if config.route_param.contains('/') {
        errors.push(ValidationError::InvalidRouteParam(config.route_param.clone()));
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
