//! Registered version ranges.
//!
//! # Responsibilities
//! - Parse a range key into comparator requirements
//! - Derive the nominal version used for ordering
//! - Test a requested version against the range
//!
//! # Design Decisions
//! - The original key string is kept verbatim; it is what gets reported
//!   back to clients as the resolved version
//! - Keys follow npm range syntax and are rewritten into `semver` crate
//!   requirements before parsing:
//!   - a bare full version is exact (`1.0.0` means `=1.0.0`)
//!   - a bare partial version is a wildcard (`1.2` means `1.2.*`)
//!   - whitespace separates comparators (`>=1.0.0 <2.0.0`)
//!   - `||` joins alternatives, `A - B` is an inclusive hyphen range
//! - Alternatives that already use commas are passed through untouched

use std::fmt;

use semver::{BuildMetadata, Version, VersionReq};

use crate::error::VersionError;

/// Literal that asks for the latest registered version.
pub const WILDCARD: &str = "*";

/// A range key registered with the dispatcher.
#[derive(Debug, Clone)]
pub struct VersionRange {
    key: String,
    alternatives: Vec<VersionReq>,
    nominal: Option<Version>,
}

impl VersionRange {
    /// Parse a range key.
    pub fn parse(key: impl Into<String>) -> Result<Self, VersionError> {
        let key = key.into();
        let alternatives = key
            .split("||")
            .map(|alt| VersionReq::parse(&normalize_alternative(alt)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| VersionError::InvalidRange {
                range: key.clone(),
                source,
            })?;
        let nominal = alternatives.first().and_then(nominal_version);

        Ok(Self {
            key,
            alternatives,
            nominal,
        })
    }

    /// The key exactly as registered.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Version this range sorts by: the lower bound named by the first
    /// comparator of its first alternative, missing components taken as zero.
    /// `None` for ranges without comparators, such as `*`.
    pub fn nominal(&self) -> Option<&Version> {
        self.nominal.as_ref()
    }

    /// Whether `version` falls inside any alternative of this range.
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl PartialEq for VersionRange {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for VersionRange {}

/// Parse a requested version, tolerating one leading `v` or `=` and
/// surrounding whitespace.
pub fn parse_requested(requested: &str) -> Option<Version> {
    let trimmed = requested.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('='))
        .unwrap_or(trimmed);
    Version::parse(trimmed).ok()
}

fn normalize_alternative(alt: &str) -> String {
    let alt = alt.trim();
    if alt.is_empty() {
        return WILDCARD.to_string();
    }
    if alt.contains(',') {
        return alt.to_string();
    }

    // Operators written apart from their version (`>= 1.0.0`) are glued back on.
    let mut tokens: Vec<String> = Vec::new();
    let mut pending_op = String::new();
    for token in alt.split_whitespace() {
        if token.chars().all(|c| matches!(c, '<' | '>' | '=' | '~' | '^')) {
            pending_op.push_str(token);
            continue;
        }
        tokens.push(format!("{}{}", std::mem::take(&mut pending_op), token));
    }
    if !pending_op.is_empty() {
        tokens.push(pending_op);
    }

    if let [low, dash, high] = tokens.as_slice() {
        if dash == "-" {
            return format!(">={}, <={}", strip_v(low), strip_v(high));
        }
    }

    tokens
        .iter()
        .map(|token| normalize_comparator(token))
        .collect::<Vec<_>>()
        .join(", ")
}

fn normalize_comparator(token: &str) -> String {
    let bare = strip_v(token);
    if !bare.starts_with(|c: char| c.is_ascii_digit()) {
        return token.to_string();
    }

    let core = bare.split(['-', '+']).next().unwrap_or(bare);
    let parts: Vec<&str> = core.split('.').collect();
    if parts.iter().any(|p| matches!(*p, "x" | "X" | "*")) {
        bare.to_string()
    } else if parts.len() >= 3 {
        format!("={}", bare)
    } else {
        format!("{}.*", bare)
    }
}

fn strip_v(token: &str) -> &str {
    token
        .strip_prefix('v')
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        .unwrap_or(token)
}

fn nominal_version(req: &VersionReq) -> Option<Version> {
    let first = req.comparators.first()?;
    Some(Version {
        major: first.major,
        minor: first.minor.unwrap_or(0),
        patch: first.patch.unwrap_or(0),
        pre: first.pre.clone(),
        build: BuildMetadata::EMPTY,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn satisfied(range: &VersionRange, requested: &str) -> bool {
        parse_requested(requested)
            .map(|v| range.matches(&v))
            .unwrap_or(false)
    }

    #[test]
    fn test_nominal_from_wildcard_minor() {
        let range = VersionRange::parse("3.x").unwrap();
        assert_eq!(range.nominal(), Some(&Version::new(3, 0, 0)));
        assert_eq!(range.as_str(), "3.x");
    }

    #[test]
    fn test_nominal_uses_first_comparator() {
        let range = VersionRange::parse(">=1.2.3, <2").unwrap();
        assert_eq!(range.nominal(), Some(&Version::new(1, 2, 3)));

        let caret = VersionRange::parse("^2.1").unwrap();
        assert_eq!(caret.nominal(), Some(&Version::new(2, 1, 0)));
    }

    #[test]
    fn test_star_has_no_nominal() {
        let range = VersionRange::parse(WILDCARD).unwrap();
        assert!(range.nominal().is_none());
        assert!(satisfied(&range, "42.0.0"));
    }

    #[test]
    fn test_satisfaction() {
        let range = VersionRange::parse("2.x").unwrap();
        assert!(satisfied(&range, "2.5.0"));
        assert!(satisfied(&range, "v2.0.1"));
        assert!(!satisfied(&range, "3.0.0"));
        assert!(!satisfied(&range, "two"));
        assert!(!satisfied(&range, ""));
    }

    #[test]
    fn test_bare_full_version_is_exact() {
        let range = VersionRange::parse("1.0.0").unwrap();
        assert!(satisfied(&range, "1.0.0"));
        assert!(!satisfied(&range, "1.5.0"));
        assert_eq!(range.nominal(), Some(&Version::new(1, 0, 0)));

        let prefixed = VersionRange::parse("v2.0.0").unwrap();
        assert!(satisfied(&prefixed, "2.0.0"));
        assert!(!satisfied(&prefixed, "2.0.1"));
    }

    #[test]
    fn test_bare_partial_version_is_wildcard() {
        let range = VersionRange::parse("1.2").unwrap();
        assert!(satisfied(&range, "1.2.9"));
        assert!(!satisfied(&range, "1.3.0"));

        let major = VersionRange::parse("3").unwrap();
        assert!(satisfied(&major, "3.7.1"));
        assert!(!satisfied(&major, "4.0.0"));
    }

    #[test]
    fn test_whitespace_separated_comparators() {
        let range = VersionRange::parse(">=1.0.0 <2.0.0").unwrap();
        assert!(satisfied(&range, "1.5.0"));
        assert!(!satisfied(&range, "2.0.0"));
        assert_eq!(range.nominal(), Some(&Version::new(1, 0, 0)));

        let spaced = VersionRange::parse(">= 1.2.0 < 1.4.0").unwrap();
        assert!(satisfied(&spaced, "1.3.0"));
        assert!(!satisfied(&spaced, "1.1.0"));
    }

    #[test]
    fn test_union_of_alternatives() {
        let range = VersionRange::parse("1.x || 2.x").unwrap();
        assert!(satisfied(&range, "1.0.0"));
        assert!(satisfied(&range, "2.3.0"));
        assert!(!satisfied(&range, "3.0.0"));
        assert_eq!(range.nominal(), Some(&Version::new(1, 0, 0)));
    }

    #[test]
    fn test_hyphen_range_is_inclusive() {
        let range = VersionRange::parse("1.0.0 - 2.0.0").unwrap();
        assert!(satisfied(&range, "1.0.0"));
        assert!(satisfied(&range, "2.0.0"));
        assert!(!satisfied(&range, "2.0.1"));
    }

    #[test]
    fn test_invalid_range_is_rejected() {
        let err = VersionRange::parse("not a range").unwrap_err();
        assert!(matches!(err, VersionError::InvalidRange { ref range, .. } if range == "not a range"));

        assert!(VersionRange::parse("1.x ||").is_ok());
        assert!(VersionRange::parse(">=").is_err());
    }

    #[test]
    fn test_parse_requested() {
        assert_eq!(parse_requested("1.0.0"), Some(Version::new(1, 0, 0)));
        assert_eq!(parse_requested(" =1.0.0 "), Some(Version::new(1, 0, 0)));
        assert_eq!(parse_requested("1.0"), None);
    }
}
