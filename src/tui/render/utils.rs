//! Shared rendering utilities
//!
//! Width-aware wrapping and truncation.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Find the byte index in `s` where the cumulative display width first reaches or exceeds `target_width`.
/// Always returns a valid char boundary.
pub(super) fn char_boundary_at_width(s: &str, target_width: usize) -> usize {
    let mut width = 0;
    for (idx, ch) in s.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target_width {
            return idx;
        }
        width += ch_width;
    }
    s.len()
}

/// Wrap plain text to `max_width` columns, breaking on spaces where possible.
/// Embedded newlines start new lines; empty lines are kept.
pub(super) fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return text.lines().map(str::to_string).collect();
    }
    let mut out = Vec::new();
    for raw in text.split('\n') {
        let mut remaining = raw.trim_end_matches('\r');
        if remaining.is_empty() {
            out.push(String::new());
            continue;
        }
        while remaining.width() > max_width {
            let byte_limit = char_boundary_at_width(remaining, max_width);
            let first_char = remaining.chars().next().map_or(1, char::len_utf8);
            let break_at = remaining[..byte_limit]
                .rfind(' ')
                .map(|p| p + 1)
                .unwrap_or(byte_limit.max(first_char));
            let (chunk, rest) = remaining.split_at(break_at);
            out.push(chunk.trim_end().to_string());
            remaining = rest.trim_start();
        }
        if !remaining.is_empty() {
            out.push(remaining.to_string());
        }
    }
    out
}

/// Cut `s` to `max_width` columns, adding an ellipsis when shortened
pub(super) fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let cut = char_boundary_at_width(s, max_width - 1);
    format!("{}…", &s[..cut])
}
