//! Field value formatting for the Web of Science layout.

use crate::models::AuthorName;
use crate::utils::leading_int;

/// Three-letter month abbreviations used by Web of Science
const MONTH_NAMES: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Separator between names in a BibTeX author list
const AUTHOR_SEPARATOR: &str = " and ";

/// Reformat a BibTeX author list from "Given Surname" to "Surname, Given".
///
/// `"John Q. Smith and Jane Doe"` becomes `"Smith, John Q. and Doe, Jane"`.
/// Brace-protected names such as `{World Health Organization}` are kept as
/// written and blank list items are dropped.
pub fn format_authors(authors: &str) -> String {
    authors
        .split(AUTHOR_SEPARATOR)
        .filter_map(format_author)
        .collect::<Vec<_>>()
        .join(AUTHOR_SEPARATOR)
}

/// Reformat a single author name
pub fn format_author(name: &str) -> Option<String> {
    let name = name.trim();
    if name.starts_with('{') && name.ends_with('}') {
        return Some(name.to_string());
    }
    AuthorName::parse(name).map(|author| author.to_string())
}

/// Map a numeric month (1-12) to its abbreviation.
///
/// Only the leading digits count, so `"3rd"` and `"3.0"` are March.
/// Returns `None` for numbers outside 1-12 and for month names.
pub fn format_month(month: &str) -> Option<&'static str> {
    let number = usize::try_from(leading_int(month)?).ok()?;
    MONTH_NAMES.get(number.checked_sub(1)?).copied()
}
