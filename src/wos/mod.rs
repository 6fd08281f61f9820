//! Web of Science BibTeX output.
//!
//! Turns a [`RawEntry`] into a [`BibEntry`] holding only the fields Web of
//! Science import understands, and renders entries in its layout:
//!
//! ```text
//! @article{WOS:000000000000000,
//! author={Smith, John Q. and Doe, Jane},
//! title={A Study},
//! doi={10.1000/xyz},
//! }
//! ```
//!
//! The citation key is always [`PLACEHOLDER_KEY`]; Web of Science keys are
//! accession numbers that cannot be derived from the source record.

mod format;

pub use format::{format_author, format_authors, format_month};

use crate::bibtex::{extract_fields, RawEntry};
use crate::models::{field, BibEntry};

/// Citation key written for every converted entry
pub const PLACEHOLDER_KEY: &str = "WOS:000000000000000";

/// Fields copied over from the source entry
pub const SOURCE_FIELDS: [&str; 10] = [
    field::AUTHOR,
    field::TITLE,
    field::YEAR,
    field::PAGES,
    field::ABSTRACT,
    field::JOURNAL,
    field::VOLUME,
    field::BOOKTITLE,
    field::MONTH,
    field::DOI,
];

/// Output order of every field the converter can write
pub const FIELD_ORDER: [&str; 13] = [
    field::AUTHOR,
    field::TITLE,
    field::YEAR,
    field::PAGES,
    field::ABSTRACT,
    field::JOURNAL,
    field::VOLUME,
    field::BOOKTITLE,
    field::MONTH,
    field::TIMES_CITED,
    field::CITED_REFERENCES,
    field::TYPE,
    field::DOI,
];

/// Something that was dropped while formatting an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatWarning {
    /// `month` was not a number between 1 and 12
    InvalidMonth(String),
}

/// An entry ready for enrichment, plus anything lost on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedEntry {
    pub entry: BibEntry,
    pub warnings: Vec<FormatWarning>,
}

/// Extract the known fields of a raw entry and reformat author and month.
///
/// Unknown fields are left behind and missing ones are simply absent.
pub fn format_entry(raw: &RawEntry<'_>) -> FormattedEntry {
    let mut source = extract_fields(raw.body);
    let mut entry = BibEntry::new(raw.entry_type);
    if let Some(key) = raw.key() {
        entry = entry.with_key(key);
    }
    let mut warnings = Vec::new();

    for name in SOURCE_FIELDS {
        let Some(value) = source.remove(name) else {
            continue;
        };

        match name {
            field::AUTHOR => entry.set_field(name, format_authors(&value)),
            field::MONTH => match format_month(&value) {
                Some(month) => entry.set_field(name, month),
                None => {
                    tracing::warn!(
                        "Dropping month {:?} of entry {}: not a month number",
                        value,
                        entry.key.as_deref().unwrap_or("<no key>")
                    );
                    warnings.push(FormatWarning::InvalidMonth(value));
                }
            },
            _ => entry.set_field(name, value),
        }
    }

    FormattedEntry { entry, warnings }
}

/// Render an entry in Web of Science layout, fields in [`FIELD_ORDER`].
pub fn render_entry(entry: &BibEntry) -> String {
    let mut out = format!("@{}{{{}, \n", entry.entry_type, PLACEHOLDER_KEY);
    for name in FIELD_ORDER {
        if let Some(value) = entry.field(name) {
            out.push_str(&format!("{}={{{}}},\n", name, value));
        }
    }
    out.push_str("}\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bibtex::split_entries;

    fn first_entry(input: &str) -> FormattedEntry {
        let raw = split_entries(input).next().unwrap();
        format_entry(&raw)
    }

    #[test]
    fn test_format_entry_reformats_fields() {
        let formatted = first_entry(
            "@article{Smith2020,\nauthor = {John Q. Smith and Jane Doe},\ntitle = {A Study},\nmonth = {3},\nkeywords = {x}\n}",
        );

        let entry = &formatted.entry;
        assert_eq!(entry.entry_type, "article");
        assert_eq!(entry.key.as_deref(), Some("Smith2020"));
        assert_eq!(entry.field("author"), Some("Smith, John Q. and Doe, Jane"));
        assert_eq!(entry.field("title"), Some("A Study"));
        assert_eq!(entry.field("month"), Some("MAR"));
        assert!(!entry.has_field("keywords"));
        assert!(formatted.warnings.is_empty());
    }

    #[test]
    fn test_invalid_month_is_dropped() {
        let formatted = first_entry("@article{a, title={T}, month={13}}");

        assert!(!formatted.entry.has_field("month"));
        assert_eq!(
            formatted.warnings,
            vec![FormatWarning::InvalidMonth("13".to_string())]
        );
    }

    #[test]
    fn test_type_field_is_not_copied() {
        let formatted = first_entry("@misc{a, type={Thesis}, title={T}}");
        assert!(!formatted.entry.has_field("type"));
    }

    #[test]
    fn test_render_entry_in_field_order() {
        let entry = BibEntry::new("article")
            .with_field("doi", "10.1000/xyz")
            .with_field("year", "2020")
            .with_field("times-cited", "7")
            .with_field("author", "Doe, Jane");

        assert_eq!(
            render_entry(&entry),
            "@article{WOS:000000000000000, \nauthor={Doe, Jane},\nyear={2020},\ntimes-cited={7},\ndoi={10.1000/xyz},\n}\n\n"
        );
    }

    #[test]
    fn test_render_renders_only_present_fields() {
        let formatted = first_entry(
            "@inproceedings{a, pages={1--10}, booktitle={Proc. X}, volume={3}, journal={J}, abstract={Abs}}",
        );
        let rendered = render_entry(&formatted.entry);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines,
            vec![
                "@inproceedings{WOS:000000000000000, ",
                "pages={1--10},",
                "abstract={Abs},",
                "journal={J},",
                "volume={3},",
                "booktitle={Proc. X},",
                "}",
                "",
            ]
        );
    }

    #[test]
    fn test_render_keeps_value_braces() {
        let entry = BibEntry::new("article").with_field("title", "{Deep} {Learning}");
        assert_eq!(
            render_entry(&entry),
            "@article{WOS:000000000000000, \ntitle={{Deep} {Learning}},\n}\n\n"
        );
    }

    #[test]
    fn test_render_empty_entry() {
        let rendered = render_entry(&BibEntry::new("misc"));
        assert_eq!(rendered, "@misc{WOS:000000000000000, \n}\n\n");
    }
}
