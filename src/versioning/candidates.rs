//! Candidate ordering and search.

use std::cmp::Ordering;

use crate::versioning::range::{parse_requested, VersionRange, WILDCARD};

/// One registered range and the handler serving it.
#[derive(Debug, Clone)]
pub struct Candidate<H> {
    pub range: VersionRange,
    pub handler: H,
}

impl<H> Candidate<H> {
    pub fn new(range: VersionRange, handler: H) -> Self {
        Self { range, handler }
    }

    /// The range key reported as the resolved version.
    pub fn version(&self) -> &str {
        self.range.as_str()
    }
}

/// Sort candidates from the highest nominal version to the lowest.
///
/// Ranges without a nominal version go last. Equal nominal versions keep
/// their registration order.
pub fn sort_candidates<H>(candidates: &mut [Candidate<H>]) {
    candidates.sort_by(|a, b| compare_descending(&a.range, &b.range));
}

fn compare_descending(a: &VersionRange, b: &VersionRange) -> Ordering {
    match (a.nominal(), b.nominal()) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Pick the candidate serving `requested`.
///
/// Absent or `*` selects the first (latest) candidate without matching.
/// Otherwise the first candidate whose range the version satisfies wins,
/// falling back to the latest when `fallback_latest` is set.
pub fn find_candidate<'a, H>(
    requested: Option<&str>,
    candidates: &'a [Candidate<H>],
    fallback_latest: bool,
) -> Option<&'a Candidate<H>> {
    let requested = match requested {
        None => return candidates.first(),
        Some(WILDCARD) => return candidates.first(),
        Some(v) => v,
    };

    if let Some(version) = parse_requested(requested) {
        if let Some(found) = candidates.iter().find(|c| c.range.matches(&version)) {
            return Some(found);
        }
    }

    if fallback_latest {
        return candidates.first();
    }

    None
}
