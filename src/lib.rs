//! # bib2wos
//!
//! Converts a Mendeley BibTeX export into the BibTeX dialect accepted by
//! Web of Science import, enriching entries that carry a DOI with citation
//! counts from the CrossRef works API.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`bibtex`]: Splitting a document into entries and tokenizing fields
//! - [`wos`]: Author/month formatting and Web of Science output layout
//! - [`sources`]: Works registry lookups (CrossRef) behind a trait
//! - [`enrichment`]: Per-entry lookup with rate-limit pacing
//! - [`converter`]: The end-to-end conversion of a document or file
//! - [`models`]: Core data structures (BibEntry, WorkMetadata, RateLimit)
//! - [`utils`]: HTTP client and pacing utilities
//! - [`config`]: Configuration management
//! - [`ui`]: Progress bar and summary output

pub mod bibtex;
pub mod config;
pub mod converter;
pub mod enrichment;
pub mod models;
pub mod sources;
pub mod ui;
pub mod utils;
pub mod wos;

// Re-export commonly used types
pub use converter::{ConversionReport, ConversionStats, ConvertError, Converter};
pub use enrichment::{EnrichOutcome, Enricher};
pub use models::{BibEntry, WorkMetadata};
pub use sources::{CrossRefSource, WorksSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
