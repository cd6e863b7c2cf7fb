//! Text helpers for fitting strings into terminal cells.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap a plain text string to the specified width.
///
/// Hard line breaks in `text` are kept. Always returns at least one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let lines: Vec<String> = textwrap::wrap(text, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

/// Display width of a string in terminal cells.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cut `text` down to `max` cells, ending in `…` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_basic() {
        let lines = wrap_text("hello world foo bar", 11);
        assert_eq!(lines, vec!["hello world", "foo bar"]);
    }

    #[test]
    fn test_wrap_text_keeps_line_breaks() {
        let lines = wrap_text("one\ntwo", 40);
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn test_wrap_text_zero_width() {
        assert_eq!(wrap_text("abc", 0), vec!["abc"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Introducing AnuNeko", 10), "Introduci…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each of these takes two cells.
        let t = truncate("猫猫猫猫", 5);
        assert_eq!(t, "猫猫…");
        assert!(display_width(&t) <= 5);
    }
}
