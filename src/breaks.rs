//! Line break helpers.
//!
//! Sources may mix `\r\n`, `\n` and lone `\r`. The helpers here treat all
//! three as breaks; generated text uses the break detected for the document.

use std::sync::LazyLock;

use regex::Regex;
use unicode_width::UnicodeWidthStr;

pub(crate) static LINE_BREAK_RE: LazyLock<Regex> =
    lazy_regex!(r"\r\n|\r|\n", "line break regex should compile");

/// Break used when a text contains none.
pub const DEFAULT_LINE_BREAK: &str = "\n";

/// Return the first line break found in `text`.
#[must_use]
pub fn detect_line_break(text: &str) -> Option<&str> {
    LINE_BREAK_RE.find(text).map(|m| m.as_str())
}

/// Split `text` at every line break. An empty text yields one empty line.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    LINE_BREAK_RE.split(text).collect()
}

#[must_use]
pub fn first_line(text: &str) -> &str {
    LINE_BREAK_RE.split(text).next().unwrap_or("")
}

#[must_use]
pub fn last_line(text: &str) -> &str {
    LINE_BREAK_RE.split(text).last().unwrap_or("")
}

#[must_use]
pub fn count_breaks(text: &str) -> usize {
    LINE_BREAK_RE.find_iter(text).count()
}

/// Remove leading and trailing line breaks, keeping other whitespace.
#[must_use]
pub fn trim_breaks(text: &str) -> &str {
    text.trim_matches(['\r', '\n'])
}

/// Prefix `suffix` with `indent` spaces.
#[must_use]
pub fn pad(indent: usize, suffix: &str) -> String {
    let mut out = " ".repeat(indent);
    out.push_str(suffix);
    out
}

/// Display width of a single physical line.
#[must_use]
pub fn width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Widest physical line of `text`.
#[must_use]
pub fn maximal_width(text: &str) -> usize {
    LINE_BREAK_RE.split(text).map(width).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("a\r\nb\nc", Some("\r\n"))]
    #[case("a\nb\r\n", Some("\n"))]
    #[case("a\rb", Some("\r"))]
    #[case("abc", None)]
    fn detects_first_break(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(detect_line_break(text), expected);
    }

    #[test]
    fn crlf_counts_once() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
        assert_eq!(count_breaks("a\r\n\r\nb"), 2);
    }

    #[test]
    fn trims_only_breaks() {
        assert_eq!(trim_breaks("\r\n\n  body \n"), "  body ");
    }

    #[test]
    fn measures_east_asian_width() {
        assert_eq!(maximal_width("ab\n日本語"), 6);
        assert_eq!(maximal_width(""), 0);
    }
}
