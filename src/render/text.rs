//! Width arithmetic for terminal text
//!
//! Widths are terminal columns: East Asian wide characters and most emoji
//! take two, escape sequences emitted by `Palette` take none.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// CSI sequences (colors, cursor moves) and OSC sequences (hyperlinks)
static ANSI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)")
        .expect("Invalid regex pattern for ANSI stripping")
});

/// Remove escape sequences, leaving what the terminal would show
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    ANSI_PATTERN.replace_all(s, "")
}

/// Number of columns `s` occupies
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).width()
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Drop control characters so text from the API cannot move the cursor or
/// inject escape sequences
pub fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect()
}

/// Shorten plain text to `width` columns, marking the cut with `…`
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = char_width(c);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Split an overlong word into pieces of at most `width` columns
///
/// A single character wider than `width` gets a piece of its own.
fn split_word(word: &str, width: usize) -> Vec<(String, usize)> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut used = 0;

    for c in word.chars() {
        let w = char_width(c);
        if used > 0 && used + w > width {
            pieces.push((std::mem::take(&mut piece), used));
            used = 0;
        }
        piece.push(c);
        used += w;
    }
    if !piece.is_empty() {
        pieces.push((piece, used));
    }
    pieces
}

/// Greedy word wrap of plain text
///
/// Whitespace runs collapse to a single space. Words longer than `width`
/// are split across lines. Every returned line is at most `width` columns
/// (a `width` of 0 is treated as 1), except that a double-width character
/// on a one-column line still takes two.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.width();

        if !current.is_empty() && current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len <= width {
            current.push_str(word);
            current_len = word_len;
            continue;
        }

        // Hard-split an overlong word; the tail stays open for more words
        let mut pieces = split_word(word, width);
        if let Some((tail, tail_len)) = pieces.pop() {
            lines.extend(pieces.into_iter().map(|(piece, _)| piece));
            current = tail;
            current_len = tail_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Pad a (possibly colored) string with spaces up to `width` visible columns
pub fn pad_to(s: &str, width: usize) -> String {
    let visible = visible_width(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}
