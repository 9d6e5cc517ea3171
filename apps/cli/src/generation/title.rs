//! Turns the model's title answer into a single safe filename component.

use chrono::NaiveDate;

/// Longest title kept, in characters (before the `.pdf` extension).
pub const MAX_TITLE_CHARS: usize = 150;

/// Characters that are path separators or reserved on common filesystems.
const RESERVED: [char; 9] = ['/', '\\', '<', '>', ':', '"', '|', '?', '*'];

/// Sanitizes a generated title for use as a file stem.
///
/// Only the first non-empty line is kept, so trailing commentary from the model
/// does not leak into the name. Reserved characters become `_`, control
/// characters are dropped, decorative quotes and trailing dots are trimmed and
/// the result is capped at [`MAX_TITLE_CHARS`]. An empty result falls back to
/// `Cover Letter - <YYYY-MM-DD>`.
///
/// The function is total and idempotent.
pub fn sanitize_title(raw: &str, today: NaiveDate) -> String {
    let line = raw
        .lines()
        .map(|l| l.trim_matches(|c: char| is_decoration(c) || c == '"'))
        .find(|l| !l.is_empty())
        .unwrap_or("");

    let replaced: String = line
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect();

    let trimmed = trim_edges(&replaced);
    let bounded: String = trimmed.chars().take(MAX_TITLE_CHARS).collect();
    let title = trim_edges(&bounded);

    if title.is_empty() {
        fallback_title(today)
    } else {
        title.to_string()
    }
}

pub fn fallback_title(today: NaiveDate) -> String {
    format!("Cover Letter - {}", today.format("%Y-%m-%d"))
}

fn trim_edges(s: &str) -> &str {
    s.trim_start_matches(is_decoration)
        .trim_end_matches(|c: char| is_decoration(c) || c == '.')
}

fn is_decoration(c: char) -> bool {
    c.is_whitespace() || matches!(c, '`' | '\'' | '*')
}
