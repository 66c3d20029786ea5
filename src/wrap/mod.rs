//! Width-constrained wrapping of comment bodies.
//!
//! [`indent_wrap`] reflows paragraphs while keeping blank lines and fenced
//! code blocks intact. Packing is greedy and never splits or hyphenates a
//! word, matching what `textwrap` does with a first-fit algorithm and ASCII
//! space separation.

mod fence;
mod line_buffer;

pub use fence::is_fence;
pub(crate) use fence::FenceTracker;
pub(crate) use line_buffer::LineBuffer;
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

use crate::breaks::{pad, split_lines};

fn prefixed(prefix: &str, bare: &str, line: &str) -> String {
    if line.is_empty() {
        bare.to_owned()
    } else {
        format!("{prefix}{line}")
    }
}

fn flush_paragraph(out: &mut Vec<String>, paragraph: &mut Vec<&str>, prefix: &str, width: usize) {
    if paragraph.is_empty() {
        return;
    }
    let joined = paragraph.join(" ");
    paragraph.clear();
    let options = Options::new(width)
        .initial_indent(prefix)
        .subsequent_indent(prefix)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit);
    out.extend(
        textwrap::wrap(&joined, options)
            .into_iter()
            .map(|line| line.trim_end().to_owned()),
    );
}

/// Prefix every line of `text` with `indent` spaces and `prefix`, packing
/// paragraphs into `width` columns when a width is given.
///
/// Blank lines become the bare prefix without trailing whitespace. Lines
/// between two code fences are kept verbatim. An empty `text` yields no
/// lines.
///
/// # Examples
///
/// ```
/// use docletfix::wrap::indent_wrap;
///
/// let lines = indent_wrap(0, " * ", "one two three\n\nfour", Some(12));
/// assert_eq!(lines, vec![" * one two", " * three", " *", " * four"]);
/// ```
#[must_use]
pub fn indent_wrap(indent: usize, prefix: &str, text: &str, width: Option<usize>) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let prefix = pad(indent, prefix);
    let bare = prefix.trim_end();
    let Some(width) = width else {
        return split_lines(text)
            .into_iter()
            .map(|line| prefixed(&prefix, bare, line))
            .collect();
    };

    let mut out = Vec::new();
    let mut paragraph = Vec::new();
    let mut fences = FenceTracker::new();

    for line in split_lines(text) {
        if fences.observe(line) || fences.in_fence() {
            flush_paragraph(&mut out, &mut paragraph, &prefix, width);
            out.push(prefixed(&prefix, bare, line));
            continue;
        }
        if line.trim().is_empty() {
            flush_paragraph(&mut out, &mut paragraph, &prefix, width);
            out.push(bare.to_owned());
            continue;
        }
        paragraph.push(line.trim());
    }

    flush_paragraph(&mut out, &mut paragraph, &prefix, width);
    out
}
