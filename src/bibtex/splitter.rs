//! Splits a BibTeX document into raw entry fragments.

/// One `@type{...}` record before its fields are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEntry<'a> {
    /// Text between `@` and the first `{`, trimmed
    pub entry_type: &'a str,

    /// Text between the first `{` and the last `}`, trimmed
    pub body: &'a str,
}

impl<'a> RawEntry<'a> {
    /// The citation key: body text before the first comma, unless it looks like a field
    pub fn key(&self) -> Option<&'a str> {
        let head = self.body.split(',').next()?.trim();
        if head.is_empty() || head.contains('=') {
            None
        } else {
            Some(head)
        }
    }
}

/// Split a document on `@`, dropping the preamble before the first record.
///
/// Fragments without an opening brace are skipped. An `@` inside a field
/// value also starts a new fragment.
pub fn split_entries(input: &str) -> impl Iterator<Item = RawEntry<'_>> {
    input.split('@').skip(1).filter_map(parse_fragment)
}

fn parse_fragment(fragment: &str) -> Option<RawEntry<'_>> {
    let Some(open) = fragment.find('{') else {
        tracing::debug!(
            "Skipping fragment without an opening brace: {:?}",
            fragment.trim()
        );
        return None;
    };

    let entry_type = fragment[..open].trim();
    let rest = &fragment[open + 1..];
    let body = match rest.rfind('}') {
        Some(close) => &rest[..close],
        None => rest,
    };

    Some(RawEntry {
        entry_type,
        body: body.trim(),
    })
}
