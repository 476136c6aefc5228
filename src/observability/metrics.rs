//! Metrics collection and exposition.
//!
//! # Metrics
//! - `version_dispatch_resolved_total` (counter): requests served, by resolved version
//! - `version_dispatch_rejected_total` (counter): requests rejected as unsupported

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

pub const RESOLVED_TOTAL: &str = "version_dispatch_resolved_total";
pub const REJECTED_TOTAL: &str = "version_dispatch_rejected_total";

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_resolved(version: &str) {
    counter!(RESOLVED_TOTAL, "version" => version.to_string()).increment(1);
}

pub fn record_rejected() {
    counter!(REJECTED_TOTAL).increment(1);
}
