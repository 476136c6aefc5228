//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the versioned API service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Version dispatch options.
    pub dispatch: DispatchConfig,

    /// Versions served by the demo service, in registration order.
    pub versions: VersionsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Options controlling how a requested version is found and reported.
///
/// Build one by overlaying the fields you need on the defaults:
///
/// ```
/// use version_dispatch::config::DispatchConfig;
///
/// let config = DispatchConfig {
///     fallback_latest: true,
///     ..Default::default()
/// };
/// assert_eq!(config.request_header, "Accept-Version");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Header the requested version is read from.
    pub request_header: String,

    /// Header the resolved version is written to.
    pub response_header: String,

    /// Route parameter that takes priority over the header.
    /// Empty disables route parameter lookup.
    pub route_param: String,

    /// Serve the latest version instead of rejecting unmatched requests.
    pub fallback_latest: bool,

    /// Version assumed when the request names none.
    pub default_version: Option<String>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            request_header: "Accept-Version".to_string(),
            response_header: "X-Api-Version".to_string(),
            route_param: "version".to_string(),
            fallback_latest: false,
            default_version: None,
        }
    }
}

/// Ordered list of versions served by the demo service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VersionsConfig(pub Vec<VersionEntry>);

impl Default for VersionsConfig {
    fn default() -> Self {
        Self(vec![
            VersionEntry {
                range: "1.x".to_string(),
                label: "v1".to_string(),
            },
            VersionEntry {
                range: "2.x".to_string(),
                label: "v2".to_string(),
            },
        ])
    }
}

impl VersionsConfig {
    pub fn iter(&self) -> std::slice::Iter<'_, VersionEntry> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One served version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VersionEntry {
    /// Version range this handler accepts (e.g., "^2.0.0").
    pub range: String,

    /// Label echoed back by the handler, for identifying it in responses.
    #[serde(default)]
    pub label: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "version_dispatch=debug,tower_http=debug".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.dispatch, DispatchConfig::default());
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.versions.iter().count(), 2);
    }

    #[test]
    fn test_partial_dispatch_overlays_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [dispatch]
            fallback_latest = true
            default_version = "1.0.0"

            [[versions]]
            range = "^3.0.0"
            label = "three"
            "#,
        )
        .unwrap();

        assert!(config.dispatch.fallback_latest);
        assert_eq!(config.dispatch.default_version.as_deref(), Some("1.0.0"));
        assert_eq!(config.dispatch.request_header, "Accept-Version");
        assert_eq!(config.dispatch.route_param, "version");

        let versions: Vec<_> = config.versions.iter().map(|v| v.range.as_str()).collect();
        assert_eq!(versions, vec!["^3.0.0"]);
    }
}
