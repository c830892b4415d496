//! Shared utility functions.

/// Single-line preview of user text for log lines.
///
/// Newlines are folded into spaces and the result is cut to at most
/// `max_chars` characters, with `…` appended when anything was dropped.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let flat = flat.trim();

    if flat.chars().count() <= max_chars {
        return flat.to_string();
    }
    let mut cut: String = flat.chars().take(max_chars).collect();
    cut.push('…');
    cut
}
