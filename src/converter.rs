//! Mendeley BibTeX to Web of Science BibTeX conversion.
//!
//! Entries are handled strictly one after another in input order: an
//! entry's lookup and the pause that follows it complete before the next
//! entry is read. The whole output is built in memory and written once.

use std::path::{Path, PathBuf};

use crate::bibtex::{split_entries, RawEntry};
use crate::enrichment::{EnrichOutcome, Enricher};
use crate::ui::ConversionProgress;
use crate::wos::{self, FormatWarning};

/// Counters for one conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Entries written
    pub entries: usize,
    /// Entries that carried a DOI
    pub with_doi: usize,
    /// Entries that received registry metadata
    pub enriched: usize,
    /// Lookups that never completed
    pub lookups_failed: usize,
    /// Month values left out
    pub months_dropped: usize,
}

impl ConversionStats {
    fn record(&mut self, outcome: &EnrichOutcome) {
        match outcome {
            EnrichOutcome::NoIdentifier => {}
            EnrichOutcome::Enriched(_) => {
                self.with_doi += 1;
                self.enriched += 1;
            }
            EnrichOutcome::LookupFailed(_) => {
                self.with_doi += 1;
                self.lookups_failed += 1;
            }
            EnrichOutcome::Skipped | EnrichOutcome::NoMetadata => self.with_doi += 1,
        }
    }
}

/// Converted text plus what happened on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub output: String,
    pub stats: ConversionStats,
}

/// Errors that end a conversion run
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Converts whole documents, optionally enriching entries that have a DOI.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    enricher: Option<Enricher>,
}

impl Converter {
    pub fn new(enricher: Option<Enricher>) -> Self {
        Self { enricher }
    }

    /// Converter that never contacts a registry
    pub fn offline() -> Self {
        Self { enricher: None }
    }

    /// Convert a document
    pub async fn convert(&self, input: &str) -> ConversionReport {
        self.convert_with_progress(input, &ConversionProgress::hidden())
            .await
    }

    /// Convert a document, reporting each finished entry to `progress`
    pub async fn convert_with_progress(
        &self,
        input: &str,
        progress: &ConversionProgress,
    ) -> ConversionReport {
        let entries: Vec<RawEntry<'_>> = split_entries(input).collect();
        tracing::info!("Found {} entries", entries.len());
        progress.set_length(entries.len() as u64);

        let mut output = String::new();
        let mut stats = ConversionStats::default();

        for raw in &entries {
            progress.set_message(raw.key().unwrap_or(raw.entry_type));
            output.push_str(&self.convert_entry(raw, &mut stats).await);
            progress.inc();
        }

        progress.finish();
        ConversionReport { output, stats }
    }

    /// Convert one entry: extract and format fields, enrich, render
    pub async fn convert_entry(&self, raw: &RawEntry<'_>, stats: &mut ConversionStats) -> String {
        let formatted = wos::format_entry(raw);
        let mut entry = formatted.entry;

        for warning in &formatted.warnings {
            match warning {
                FormatWarning::InvalidMonth(_) => stats.months_dropped += 1,
            }
        }

        let outcome = match &self.enricher {
            Some(enricher) => enricher.enrich(entry.doi()).await,
            None if entry.doi().is_some() => EnrichOutcome::Skipped,
            None => EnrichOutcome::NoIdentifier,
        };

        if let Some(metadata) = outcome.metadata() {
            entry.merge_metadata(metadata);
        }
        stats.record(&outcome);
        stats.entries += 1;

        wos::render_entry(&entry)
    }

    /// Read `input`, convert it and overwrite `output` with the result
    pub async fn run(
        &self,
        input: &Path,
        output: &Path,
        progress: &ConversionProgress,
    ) -> Result<ConversionStats, ConvertError> {
        tracing::info!("Reading {}", input.display());
        let text = tokio::fs::read_to_string(input)
            .await
            .map_err(|source| ConvertError::Read {
                path: input.to_path_buf(),
                source,
            })?;

        let report = self.convert_with_progress(&text, progress).await;

        tokio::fs::write(output, report.output)
            .await
            .map_err(|source| ConvertError::Write {
                path: output.to_path_buf(),
                source,
            })?;
        tracing::info!("Wrote {} entries to {}", report.stats.entries, output.display());

        Ok(report.stats)
    }
}
