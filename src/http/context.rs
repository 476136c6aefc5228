//! Request capabilities backed by `http` types.

use std::borrow::Cow;

use axum::extract::RawPathParams;
use axum::http::{Extensions, HeaderMap, HeaderName, HeaderValue};

use crate::versioning::{ApiVersion, HeaderReader, HeaderWriter, RouteParams, StateWriter};

/// Read-only view over the parts of a request the dispatcher inspects.
pub struct RequestView<'a> {
    headers: &'a HeaderMap,
    params: Option<&'a RawPathParams>,
}

impl<'a> RequestView<'a> {
    pub fn new(headers: &'a HeaderMap, params: Option<&'a RawPathParams>) -> Self {
        Self { headers, params }
    }
}

impl RouteParams for RequestView<'_> {
    fn route_param(&self, name: &str) -> Option<&str> {
        self.params?
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

impl HeaderReader for RequestView<'_> {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers.header(name)
    }
}

impl HeaderReader for HeaderMap {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| String::from_utf8_lossy(v.as_bytes()))
    }
}

impl HeaderWriter for HeaderMap {
    fn set_header(&mut self, name: &str, value: &str) {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.insert(name, value);
            }
            _ => tracing::warn!(header = %name, value = %value, "Skipping invalid response header"),
        }
    }
}

impl StateWriter for Extensions {
    fn set_api_version(&mut self, version: ApiVersion) {
        self.insert(version);
    }
}
