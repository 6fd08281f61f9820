//! Bibliographic entry model shared by the splitter, formatter and enricher.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::WorkMetadata;

/// Field names understood by the converter.
pub mod field {
    pub const AUTHOR: &str = "author";
    pub const TITLE: &str = "title";
    pub const YEAR: &str = "year";
    pub const PAGES: &str = "pages";
    pub const ABSTRACT: &str = "abstract";
    pub const JOURNAL: &str = "journal";
    pub const VOLUME: &str = "volume";
    pub const BOOKTITLE: &str = "booktitle";
    pub const MONTH: &str = "month";
    pub const DOI: &str = "doi";

    // Filled in from CrossRef
    pub const TIMES_CITED: &str = "times-cited";
    pub const CITED_REFERENCES: &str = "number-of-cited-references";
    pub const TYPE: &str = "type";
}

/// A single bibliography record.
///
/// Field names are stored lower-cased. The map carries no ordering; the
/// output order is decided when the entry is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibEntry {
    /// Entry type label (`article`, `book`, `inproceedings`, ...)
    pub entry_type: String,

    /// Citation key from the source file, if it had one
    pub key: Option<String>,

    /// Field name to value
    pub fields: HashMap<String, String>,
}

impl BibEntry {
    /// Create an empty entry of the given type
    pub fn new(entry_type: impl Into<String>) -> Self {
        Self {
            entry_type: entry_type.into(),
            key: None,
            fields: HashMap::new(),
        }
    }

    /// Set the source citation key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add a field, builder style
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Get a field value by name (case-insensitive)
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Whether the entry has the given field
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Set a field, replacing any previous value
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_ascii_lowercase(), value.into());
    }

    /// The DOI to look up, if the entry has a non-blank one
    pub fn doi(&self) -> Option<&str> {
        self.field(field::DOI)
            .map(str::trim)
            .filter(|doi| !doi.is_empty())
    }

    /// Merge CrossRef metadata into the entry.
    ///
    /// Zero counts and blank types are treated as absent and never written.
    pub fn merge_metadata(&mut self, metadata: &WorkMetadata) {
        if let Some(count) = metadata.citation_count.filter(|c| *c > 0) {
            self.set_field(field::TIMES_CITED, count.to_string());
        }
        if let Some(count) = metadata.reference_count.filter(|c| *c > 0) {
            self.set_field(field::CITED_REFERENCES, count.to_string());
        }
        if let Some(work_type) = metadata
            .work_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
        {
            self.set_field(field::TYPE, work_type);
        }
    }
}
