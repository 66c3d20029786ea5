//! Plain block comments.

use std::sync::LazyLock;

use regex::Regex;

use crate::breaks::{self, pad, split_lines};

// Leading whitespace, an optional opener or star marker and the spaces after it.
static LEAD_RE: LazyLock<Regex> =
    lazy_regex!(r"^\s*(?:/\*+|\*+)?\s*", "comment lead regex should compile");

/// Remove at most `count` leading whitespace characters from `line`.
pub(crate) fn strip_indent(line: &str, count: usize) -> &str {
    let cut = line
        .char_indices()
        .take(count)
        .take_while(|(_, ch)| ch.is_whitespace())
        .last()
        .map_or(0, |(idx, ch)| idx + ch.len_utf8());
    &line[cut..]
}

/// A multi-line comment that is not a doclet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceComment {
    raw: String,
    indent: usize,
    line_break: String,
    lines: Vec<String>,
}

impl SourceComment {
    /// Split `raw` into body lines. Lines after the first lose up to
    /// `indent` leading whitespace characters.
    #[must_use]
    pub fn new(raw: &str, line_break: &str, indent: usize) -> Self {
        let lines = split_lines(raw)
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                if i == 0 {
                    line.to_owned()
                } else {
                    strip_indent(line, indent).to_owned()
                }
            })
            .collect();
        Self {
            raw: raw.to_owned(),
            indent,
            line_break: line_break.to_owned(),
            lines,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Body lines with the shared indentation removed.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Render the comment to fit `max` columns, assuming it starts at its
    /// stored indent. `None` returns the original text.
    #[must_use]
    pub fn render(&self, max: Option<usize>) -> String {
        match max {
            None => self.raw.clone(),
            Some(max) => self.render_at(max, self.indent),
        }
    }

    fn uses_stars(&self) -> bool {
        self.lines
            .iter()
            .skip(1)
            .any(|line| line.trim_start().starts_with('*'))
    }

    /// Render with the first line starting at `column`.
    pub(crate) fn render_at(&self, max: usize, column: usize) -> String {
        let mut out = Vec::with_capacity(self.lines.len());
        for (i, line) in self.lines.iter().enumerate() {
            if i == 0 {
                if column + breaks::width(line) <= max {
                    out.push(line.clone());
                    continue;
                }
                let lead = LEAD_RE.find(line).map_or("", |m| m.as_str());
                let continuation = if self.uses_stars() {
                    pad(self.indent, " * ")
                } else {
                    pad(self.indent + breaks::width(lead), "")
                };
                wrap_words(&mut out, line, lead, column, &continuation, max);
            } else {
                let physical = pad(self.indent, line);
                if breaks::width(&physical) <= max {
                    out.push(physical);
                    continue;
                }
                let lead = LEAD_RE
                    .find(&physical)
                    .map_or(String::new(), |m| m.as_str().to_owned());
                wrap_words(&mut out, &physical, &lead, 0, &lead, max);
            }
        }
        out.join(&self.line_break)
    }
}

/// Greedily pack the words after `lead` into lines of at most `max`
/// columns. The first line is measured from `column`.
fn wrap_words(
    out: &mut Vec<String>,
    line: &str,
    lead: &str,
    column: usize,
    continuation: &str,
    max: usize,
) {
    let mut current = lead.to_owned();
    let mut width = column + breaks::width(lead);
    let mut fresh = true;
    for word in line[lead.len()..].split(' ').filter(|w| !w.is_empty()) {
        let word_width = breaks::width(word);
        if !fresh && width + 1 + word_width > max {
            out.push(current.trim_end().to_owned());
            current = continuation.to_owned();
            width = breaks::width(continuation);
            fresh = true;
        }
        if !fresh {
            current.push(' ');
            width += 1;
        }
        current.push_str(word);
        width += word_width;
        fresh = false;
    }
    out.push(current.trim_end().to_owned());
}
