//! Caption truncation and footer aggregation.

/// Number of words kept from a caption or description.
pub const WORD_LIMIT: usize = 36;

/// Appended when words were dropped.
pub const ELLIPSIS: &str = "...";

/// Keeps the first [`WORD_LIMIT`] space-separated words of `text`.
///
/// Splits on single spaces only, so runs of spaces count as empty words and
/// are preserved when the text is short enough to be returned unchanged.
#[must_use]
pub fn truncate(text: &str) -> String {
    let words: Vec<&str> = text.split(' ').collect();
    if words.len() > WORD_LIMIT {
        let mut kept = words[..WORD_LIMIT].join(" ");
        kept.push_str(ELLIPSIS);
        kept
    } else {
        text.to_string()
    }
}

/// Joins footer parts with `", "`, skipping empty ones.
#[must_use]
pub fn join_stats<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .filter(|p| !p.as_ref().is_empty())
        .map(|p| p.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `"{count} {label}"`, e.g. `"12 stars"`.
#[must_use]
pub fn count(n: u64, label: &str) -> String {
    format!("{n} {label}")
}
