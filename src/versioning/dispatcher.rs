//! Version dispatcher.
//!
//! # Responsibilities
//! - Build and sort the candidate list once at setup
//! - Extract the requested version (route parameter, header, default)
//! - Select a candidate or reject with `UnsupportedVersion`
//! - Record the resolved version on request state and response headers
//!
//! # Design Decisions
//! - Immutable after `build()`; share it behind an `Arc`
//! - Generic over the handler type so any host can plug in its own
//! - Route parameter wins over the header, no merging of both sources

use std::borrow::Cow;
use std::collections::HashSet;

use crate::config::DispatchConfig;
use crate::error::VersionError;
use crate::observability::metrics;
use crate::versioning::candidates::{find_candidate, sort_candidates, Candidate};
use crate::versioning::context::{ApiVersion, HeaderReader, HeaderWriter, RouteParams, StateWriter};
use crate::versioning::range::VersionRange;

/// Selects a handler per request from a set of version ranges.
#[derive(Debug)]
pub struct VersionDispatcher<H> {
    config: DispatchConfig,
    candidates: Vec<Candidate<H>>,
}

/// Collects `(range, handler)` pairs in registration order.
#[derive(Debug)]
pub struct DispatcherBuilder<H> {
    config: DispatchConfig,
    entries: Vec<(String, H)>,
}

impl<H> DispatcherBuilder<H> {
    /// Register a handler for a range.
    pub fn version(mut self, range: impl Into<String>, handler: H) -> Self {
        self.entries.push((range.into(), handler));
        self
    }

    /// Parse every range, reject duplicates and sort the candidates.
    pub fn build(self) -> Result<VersionDispatcher<H>, VersionError> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        let mut candidates = Vec::with_capacity(self.entries.len());

        for (key, handler) in self.entries {
            if !seen.insert(key.clone()) {
                return Err(VersionError::DuplicateRange { range: key });
            }
            candidates.push(Candidate::new(VersionRange::parse(key)?, handler));
        }

        sort_candidates(&mut candidates);

        if candidates.is_empty() {
            tracing::warn!("Version dispatcher built without versions, every request will be rejected");
        } else {
            tracing::info!(
                order = ?candidates.iter().map(Candidate::version).collect::<Vec<_>>(),
                fallback_latest = self.config.fallback_latest,
                "Version dispatcher ready"
            );
        }

        Ok(VersionDispatcher {
            config: self.config,
            candidates,
        })
    }
}

/// Outcome of a successful lookup.
#[derive(Debug)]
pub struct Resolution<'a, H> {
    /// Version extracted from the request, after default substitution.
    pub requested: Option<String>,
    candidate: &'a Candidate<H>,
    response_header: &'a str,
}

impl<'a, H> Resolution<'a, H> {
    /// Range key of the matched candidate.
    pub fn version(&self) -> &'a str {
        self.candidate.version()
    }

    pub fn handler(&self) -> &'a H {
        &self.candidate.handler
    }

    /// Attach the resolved version to request state.
    pub fn record_state<S: StateWriter + ?Sized>(&self, state: &mut S) {
        state.set_api_version(ApiVersion(self.version().to_string()));
    }

    /// Write the resolved version to the configured response header.
    pub fn record_header<W: HeaderWriter + ?Sized>(&self, headers: &mut W) {
        headers.set_header(self.response_header, self.version());
    }
}

impl<H> VersionDispatcher<H> {
    pub fn builder(config: DispatchConfig) -> DispatcherBuilder<H> {
        DispatcherBuilder {
            config,
            entries: Vec::new(),
        }
    }

    /// Build from pairs in the order given.
    pub fn new<I, K>(versions: I, config: DispatchConfig) -> Result<Self, VersionError>
    where
        I: IntoIterator<Item = (K, H)>,
        K: Into<String>,
    {
        versions
            .into_iter()
            .fold(Self::builder(config), |builder, (range, handler)| {
                builder.version(range, handler)
            })
            .build()
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Candidates in dispatch order, latest first.
    pub fn candidates(&self) -> &[Candidate<H>] {
        &self.candidates
    }

    /// Version the request asks for, before matching.
    pub fn requested_version<C>(&self, ctx: &C) -> Option<String>
    where
        C: RouteParams + HeaderReader + ?Sized,
    {
        let from_route = if self.config.route_param.is_empty() {
            None
        } else {
            ctx.route_param(&self.config.route_param)
                .filter(|value| !value.is_empty())
        };

        let requested = match from_route {
            // Route parameters carry a one character prefix, as in `v2.0.0`.
            Some(value) => {
                let mut chars = value.chars();
                chars.next();
                Some(Cow::Borrowed(chars.as_str()))
            }
            None => ctx.header(&self.config.request_header),
        };

        match requested {
            Some(v) if !v.is_empty() => Some(v.into_owned()),
            _ => self.config.default_version.clone(),
        }
    }

    /// Select the candidate for an already extracted version.
    pub fn select(&self, requested: Option<&str>) -> Result<&Candidate<H>, VersionError> {
        find_candidate(requested, &self.candidates, self.config.fallback_latest)
            .ok_or_else(|| VersionError::unsupported(requested))
    }

    /// Extract and select without touching the request.
    pub fn resolve<C>(&self, ctx: &C) -> Result<Resolution<'_, H>, VersionError>
    where
        C: RouteParams + HeaderReader + ?Sized,
    {
        let requested = self.requested_version(ctx);
        let candidate = match self.select(requested.as_deref()) {
            Ok(c) => c,
            Err(e) => {
                metrics::record_rejected();
                return Err(e);
            }
        };

        tracing::debug!(
            requested = ?requested,
            resolved = %candidate.version(),
            "Resolved API version"
        );
        metrics::record_resolved(candidate.version());

        Ok(Resolution {
            requested,
            candidate,
            response_header: &self.config.response_header,
        })
    }

    /// Resolve, record the result on the context and hand back the handler
    /// to invoke.
    pub fn dispatch<C>(&self, ctx: &mut C) -> Result<&H, VersionError>
    where
        C: RouteParams + HeaderReader + HeaderWriter + StateWriter + ?Sized,
    {
        let resolution = self.resolve(&*ctx)?;
        resolution.record_state(&mut *ctx);
        resolution.record_header(&mut *ctx);
        Ok(resolution.handler())
    }
}
