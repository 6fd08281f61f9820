//! Lenient number parsing for values that arrive as free text.

/// Parse the run of ASCII digits at the start of `value`, after leading whitespace.
///
/// Anything after the digits is ignored, so `"1s"` and `"3rd"` read as 1 and 3.
/// Returns `None` when there is no leading digit (this includes signs).
pub fn leading_int(value: &str) -> Option<u64> {
    let value = value.trim_start();
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().ok()
}
