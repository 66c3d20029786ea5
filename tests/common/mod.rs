//! Utility helpers shared across integration tests.

use docletfix::{SourceDocument, breaks};

/// Build a source text from a list of lines joined with `\n`.
///
/// Keeps multi-line fixtures readable without escaped line breaks.
macro_rules! source {
    ($($line:expr),* $(,)?) => {
        [$($line),*].join("\n")
    };
}

/// Parse `text` as `fixture.ts`, panicking on malformed input.
pub fn parse(text: &str) -> SourceDocument {
    SourceDocument::parse_source("fixture.ts", text).expect("fixture should parse")
}

/// Assert that no physical line of `text` is wider than `max`, unless it
/// consists of a single unbreakable word after its prefix.
pub fn assert_within_width(text: &str, max: usize) {
    for line in breaks::split_lines(text) {
        if breaks::width(line) <= max {
            continue;
        }
        let words = line
            .trim_start()
            .trim_start_matches(['*', '/'])
            .split_whitespace()
            .count();
        assert!(words <= 1, "line wider than {max}: {line:?}");
    }
}
