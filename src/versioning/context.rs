//! Request capabilities the dispatcher needs from its host framework.
//!
//! The dispatcher never sees a concrete request type. Hosts implement
//! these narrow traits over whatever they carry per request.

use std::borrow::Cow;
use std::collections::HashMap;

/// Read access to route parameters populated by the router.
pub trait RouteParams {
    fn route_param(&self, name: &str) -> Option<&str>;
}

/// Read access to inbound request headers.
///
/// A header that is present must come back as `Some`, even when its bytes
/// are not valid text, so it is matched (and rejected) like any other value.
pub trait HeaderReader {
    fn header(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Write access to outbound response headers.
pub trait HeaderWriter {
    fn set_header(&mut self, name: &str, value: &str);
}

/// Write access to request-scoped state visible to downstream handlers.
pub trait StateWriter {
    fn set_api_version(&mut self, version: ApiVersion);
}

/// Resolved version attached to the request.
///
/// Holds the range key of the matched candidate, not the literal version
/// the client asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersion(pub String);

impl ApiVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RouteParams for HashMap<String, String> {
    fn route_param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}
