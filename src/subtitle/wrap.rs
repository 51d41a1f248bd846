/*!
 * Display-width-constrained line wrapping for subtitle text.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum display width of one subtitle line, in characters.
pub const MAX_LINE_WIDTH: usize = 40;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse all whitespace runs (including newlines) to single spaces and trim.
///
/// This is lossy: line breaks already present in the input are never preserved.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Reflow a block of text into display lines of at most [`MAX_LINE_WIDTH`]
/// characters, separated by `\n`.
///
/// Words are packed greedily in order; a word is pushed to the next line as
/// soon as appending it (with a separating space) would exceed the width.
/// A single word wider than the limit sits alone on its own line, unsplit.
/// No rebalancing across lines.
pub fn wrap(text: &str) -> String {
    let normalized = collapse_whitespace(text);
    if normalized.chars().count() <= MAX_LINE_WIDTH {
        return normalized;
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in normalized.split(' ') {
        // The candidate length counts a separating space even for the first
        // word on a line, so a word at exactly the width limit sits alone.
        if current.chars().count() + 1 + word.chars().count() <= MAX_LINE_WIDTH {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(current);
            }
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}
