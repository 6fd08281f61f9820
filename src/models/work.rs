//! CrossRef work metadata and the rate limit advertised alongside it.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::leading_int;

/// The subset of a CrossRef work record merged into converted entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkMetadata {
    /// `is-referenced-by-count`
    pub citation_count: Option<u64>,

    /// `reference-count`
    pub reference_count: Option<u64>,

    /// `type` (e.g. `journal-article`)
    pub work_type: Option<String>,
}

impl WorkMetadata {
    /// True when none of the values would end up in an entry
    pub fn is_empty(&self) -> bool {
        self.citation_count.unwrap_or(0) == 0
            && self.reference_count.unwrap_or(0) == 0
            && self
                .work_type
                .as_deref()
                .map_or(true, |t| t.trim().is_empty())
    }
}

/// Request quota advertised by the registry: `limit` requests per `interval_secs`.
///
/// Only constructed when both values are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    pub limit: u64,
    pub interval_secs: u64,
}

impl RateLimit {
    /// Build from already parsed values; `None` unless both are positive
    pub fn new(limit: u64, interval_secs: u64) -> Option<Self> {
        if limit > 0 && interval_secs > 0 {
            Some(Self {
                limit,
                interval_secs,
            })
        } else {
            None
        }
    }

    /// Build from raw `x-rate-limit-limit` / `x-rate-limit-interval` header values.
    ///
    /// Values are read up to the first non-digit, so an interval of `1s` is one second.
    pub fn from_header_values(limit: Option<&str>, interval: Option<&str>) -> Option<Self> {
        Self::new(leading_int(limit?)?, leading_int(interval?)?)
    }

    /// Pause to keep between two requests: `ceil(interval * 1000 / limit)` milliseconds
    pub fn delay(&self) -> Duration {
        let millis = self.interval_secs.saturating_mul(1000).div_ceil(self.limit);
        Duration::from_millis(millis)
    }
}
