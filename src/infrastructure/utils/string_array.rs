//! Comma-joined list columns (`news.tags`, `partners.achievements`, ...).
//!
//! The pair is inverse for values that contain no commas; a value holding a
//! comma splits into several entries on the way back.

/// Splits a stored list. Entries are trimmed and empty ones dropped.
pub fn parse_string_array(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Joins a list for storage. `None` when no non-empty entry remains.
pub fn stringify_array(values: &[String]) -> Option<String> {
    let joined = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(",");

    if joined.is_empty() { None } else { Some(joined) }
}
