//! Enriching entries with registry metadata.
//!
//! Each entry goes through at most one lookup:
//!
//! ```text
//! no DOI  ─────────────────────────────────────────────▶ NoIdentifier
//! DOI ──▶ lookup ──▶ network failure ──────────────────▶ LookupFailed
//!                └─▶ response ──▶ pause(rate limit) ──▶ Enriched | NoMetadata
//! ```
//!
//! The pause happens before the next entry is touched, which keeps the
//! whole run inside the quota the registry advertises. Failed lookups are
//! not retried and do not pause.

use std::sync::Arc;

use crate::config::CrossRefConfig;
use crate::models::WorkMetadata;
use crate::sources::{CrossRefSource, SourceError, WorksSource};
use crate::utils::{Pacer, SleepPacer};

/// What happened to one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichOutcome {
    /// The entry has no DOI
    NoIdentifier,
    /// Enrichment is turned off
    Skipped,
    /// The registry answered with usable metadata
    Enriched(WorkMetadata),
    /// The registry answered, but without anything to merge
    NoMetadata,
    /// The request never completed
    LookupFailed(String),
}

impl EnrichOutcome {
    /// Metadata to merge, if any
    pub fn metadata(&self) -> Option<&WorkMetadata> {
        match self {
            EnrichOutcome::Enriched(metadata) => Some(metadata),
            _ => None,
        }
    }
}

/// Looks up DOIs one at a time and paces itself between requests.
#[derive(Debug, Clone)]
pub struct Enricher {
    source: Arc<dyn WorksSource>,
    pacer: Arc<dyn Pacer>,
}

impl Enricher {
    pub fn new(source: Arc<dyn WorksSource>, pacer: Arc<dyn Pacer>) -> Self {
        Self { source, pacer }
    }

    /// CrossRef with real sleeps between requests
    pub fn crossref(config: &CrossRefConfig) -> Result<Self, SourceError> {
        let source = CrossRefSource::from_config(config)?;
        Ok(Self::new(Arc::new(source), Arc::new(SleepPacer)))
    }

    /// Identifier of the underlying source
    pub fn source_id(&self) -> &str {
        self.source.id()
    }

    /// Name of the underlying source
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Look up `doi` (if any), wait out the advertised rate limit and report.
    pub async fn enrich(&self, doi: Option<&str>) -> EnrichOutcome {
        let Some(doi) = doi else {
            return EnrichOutcome::NoIdentifier;
        };

        let lookup = match self.source.lookup_work(doi).await {
            Ok(lookup) => lookup,
            Err(e) => {
                tracing::warn!(
                    source = self.source.id(),
                    "Error fetching data from {} for {}: {}",
                    self.source.name(),
                    doi,
                    e
                );
                return EnrichOutcome::LookupFailed(e.to_string());
            }
        };

        match lookup.rate_limit {
            Some(rate_limit) => {
                let delay = rate_limit.delay();
                tracing::debug!(
                    "Rate limit: {} requests per {} seconds",
                    rate_limit.limit,
                    rate_limit.interval_secs
                );
                tracing::debug!("Delay between requests: {} milliseconds", delay.as_millis());
                self.pacer.pause(delay).await;
            }
            None => {
                tracing::debug!("{} sent no usable rate limit for {}", self.source.name(), doi);
            }
        }

        match lookup.metadata {
            Some(metadata) if !metadata.is_empty() => {
                tracing::debug!("Enriched {}: {:?}", doi, metadata);
                EnrichOutcome::Enriched(metadata)
            }
            _ => {
                tracing::info!(
                    "No metadata for {} (status {})",
                    doi,
                    lookup.status
                );
                EnrichOutcome::NoMetadata
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RateLimit;
    use crate::sources::{MockSource, WorkLookup};
    use crate::utils::RecordingPacer;
    use std::time::Duration;

    fn enricher(source: &Arc<MockSource>, pacer: &Arc<RecordingPacer>) -> Enricher {
        Enricher::new(source.clone(), pacer.clone())
    }

    fn metadata() -> WorkMetadata {
        WorkMetadata {
            citation_count: Some(42),
            reference_count: Some(10),
            work_type: Some("journal-article".to_string()),
        }
    }

    #[test]
    fn test_source_identity() {
        let source = Arc::new(MockSource::new());
        let pacer = Arc::new(RecordingPacer::new());
        let enricher = enricher(&source, &pacer);

        assert_eq!(enricher.source_id(), "mock");
        assert_eq!(enricher.source_name(), "Mock Source");
    }

    #[tokio::test]
    async fn test_no_identifier() {
        let source = Arc::new(MockSource::new());
        let pacer = Arc::new(RecordingPacer::new());

        let outcome = enricher(&source, &pacer).enrich(None).await;

        assert_eq!(outcome, EnrichOutcome::NoIdentifier);
        assert!(source.requests().is_empty());
        assert!(pacer.delays().is_empty());
    }

    #[tokio::test]
    async fn test_enriched_with_rate_limit_delay() {
        let source = Arc::new(MockSource::new());
        source.set_lookup(
            "10.1/a",
            WorkLookup::new(200)
                .metadata(metadata())
                .rate_limit(RateLimit::new(50, 1).unwrap()),
        );
        let pacer = Arc::new(RecordingPacer::new());

        let outcome = enricher(&source, &pacer).enrich(Some("10.1/a")).await;

        assert_eq!(outcome, EnrichOutcome::Enriched(metadata()));
        assert_eq!(pacer.delays(), vec![Duration::from_millis(20)]);
    }

    #[tokio::test]
    async fn test_network_failure_does_not_pause() {
        let source = Arc::new(MockSource::new());
        source.set_network_error("10.1/a", "connection reset");
        let pacer = Arc::new(RecordingPacer::new());

        let outcome = enricher(&source, &pacer).enrich(Some("10.1/a")).await;

        assert!(matches!(outcome, EnrichOutcome::LookupFailed(ref msg) if msg.contains("connection reset")));
        assert!(outcome.metadata().is_none());
        assert!(pacer.delays().is_empty());
    }

    #[tokio::test]
    async fn test_not_found_still_pauses() {
        let source = Arc::new(MockSource::new());
        source.set_lookup(
            "10.1/missing",
            WorkLookup::new(404).rate_limit(RateLimit::new(10, 2).unwrap()),
        );
        let pacer = Arc::new(RecordingPacer::new());

        let outcome = enricher(&source, &pacer).enrich(Some("10.1/missing")).await;

        assert_eq!(outcome, EnrichOutcome::NoMetadata);
        assert_eq!(pacer.delays(), vec![Duration::from_millis(200)]);
    }

    #[tokio::test]
    async fn test_no_rate_limit_no_pause() {
        let source = Arc::new(MockSource::new());
        source.set_metadata("10.1/a", metadata());
        let pacer = Arc::new(RecordingPacer::new());

        let outcome = enricher(&source, &pacer).enrich(Some("10.1/a")).await;

        assert!(outcome.metadata().is_some());
        assert!(pacer.delays().is_empty());
    }

    #[tokio::test]
    async fn test_zero_counts_are_no_metadata() {
        let source = Arc::new(MockSource::new());
        source.set_metadata(
            "10.1/a",
            WorkMetadata {
                citation_count: Some(0),
                reference_count: Some(0),
                work_type: None,
            },
        );
        let pacer = Arc::new(RecordingPacer::new());

        let outcome = enricher(&source, &pacer).enrich(Some("10.1/a")).await;

        assert_eq!(outcome, EnrichOutcome::NoMetadata);
    }
}
