//! Bibliographic registries that can describe a work by its DOI.
//!
//! This module defines the [`WorksSource`] trait used by the enricher.
//! [`CrossRefSource`] talks to the CrossRef REST API; [`MockSource`] returns
//! canned lookups for tests.
//!
//! A lookup only fails on network-level problems. Whatever the registry
//! answers, including error statuses and non-JSON bodies, is a completed
//! lookup whose metadata may simply be absent; the rate-limit headers of
//! such a response still apply.

mod crossref;
pub mod mock;

pub use crossref::{CrossRefSource, CROSSREF_API_BASE};
pub use mock::MockSource;

use async_trait::async_trait;

use crate::models::{RateLimit, WorkMetadata};

/// The answer to one completed registry request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkLookup {
    /// HTTP status of the response
    pub status: u16,

    /// Metadata found in the payload, if any
    pub metadata: Option<WorkMetadata>,

    /// Quota advertised in the response headers, if any
    pub rate_limit: Option<RateLimit>,
}

impl WorkLookup {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn metadata(mut self, metadata: WorkMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn rate_limit(mut self, rate_limit: RateLimit) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }
}

/// A registry that resolves DOIs to work metadata.
#[async_trait]
pub trait WorksSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "crossref")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Look up a single work by DOI
    async fn lookup_work(&self, doi: &str) -> Result<WorkLookup, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
