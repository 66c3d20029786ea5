//! Doclets: `/** ... */` comments structured as a sequence of tags.
//!
//! Parsing runs in two phases. Segmenting groups the interior lines into a
//! description, blank separators and raw `@tag` segments; decoding turns each
//! raw segment into a [`DocTag`] independently.

mod render;
mod tag;

use std::sync::LazyLock;

use regex::Regex;
pub use tag::{DocTag, TagShape};

use crate::{breaks::split_lines, comment::strip_indent};

static DOC_RE: LazyLock<Regex> = lazy_regex!(r"^/\*\*\s", "doclet regex should compile");

static MARKER_RE: LazyLock<Regex> = lazy_regex!(r"^\s*\*\s?", "star marker regex should compile");

/// Whether a multi-line comment is a doclet.
#[must_use]
pub fn is_doc(raw: &str) -> bool {
    DOC_RE.is_match(raw)
}

/// A documentation comment and its tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDoc {
    raw: String,
    indent: usize,
    line_break: String,
    tags: Vec<DocTag>,
}

impl SourceDoc {
    #[must_use]
    pub fn new(raw: &str, line_break: &str, indent: usize) -> Self {
        let lines = interior_lines(raw, indent);
        let tags = segment(&lines, line_break)
            .into_iter()
            .map(|segment| match segment {
                Segment::Description(text) => DocTag::description(text),
                Segment::Blank => DocTag::blank(),
                Segment::Tag(raw) => DocTag::decode(&raw),
            })
            .collect();
        Self {
            raw: raw.to_owned(),
            indent,
            line_break: line_break.to_owned(),
            tags,
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

    #[must_use]
    pub fn tags(&self) -> &[DocTag] {
        &self.tags
    }

    /// Render the doclet within `max` columns. `None` returns the original
    /// text.
    #[must_use]
    pub fn render(&self, max: Option<usize>) -> String {
        match max {
            None => self.raw.clone(),
            Some(max) => render::render(self, max),
        }
    }
}

/// Lines between the opener and the closer with star markers removed.
fn interior_lines(raw: &str, indent: usize) -> Vec<String> {
    let body = raw.strip_prefix("/**").unwrap_or(raw);
    let body = body.strip_suffix("*/").unwrap_or(body);
    let lines = split_lines(body);

    if lines.len() == 1 {
        let line = lines[0].trim();
        return if line.is_empty() {
            Vec::new()
        } else {
            vec![line.to_owned()]
        };
    }

    let last = lines.len() - 1;
    lines
        .into_iter()
        .enumerate()
        .filter_map(|(i, line)| {
            if i == 0 {
                let line = line.trim();
                return (!line.is_empty()).then(|| line.to_owned());
            }
            if i == last && line.trim().is_empty() {
                return None;
            }
            let stripped = match MARKER_RE.find(line) {
                Some(marker) => &line[marker.end()..],
                None => strip_indent(line, indent),
            };
            Some(stripped.trim_end().to_owned())
        })
        .collect()
}

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Description(String),
    Blank,
    Tag(String),
}

/// Group interior lines into description, blank and raw tag segments.
fn segment(lines: &[String], line_break: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut description: Vec<&str> = Vec::new();
    let mut pending: Option<String> = None;
    let mut held = 0usize;

    for line in lines {
        if line.starts_with('@') {
            match pending.take() {
                None => finish_description(&mut out, &mut description, line_break),
                Some(tag) => {
                    out.push(Segment::Tag(tag));
                    out.extend(std::iter::repeat_with(|| Segment::Blank).take(held));
                }
            }
            held = 0;
            pending = Some(line.clone());
        } else if let Some(tag) = pending.as_mut() {
            if line.trim().is_empty() {
                held += 1;
            } else {
                for _ in 0..=held {
                    tag.push_str(line_break);
                }
                tag.push_str(line);
                held = 0;
            }
        } else {
            description.push(line);
        }
    }

    match pending {
        None => finish_description(&mut out, &mut description, line_break),
        Some(tag) => {
            out.push(Segment::Tag(tag));
            out.extend(std::iter::repeat_with(|| Segment::Blank).take(held));
        }
    }
    out
}

/// Emit the description (if it has text) followed by one blank separator
/// per trailing empty line.
fn finish_description(out: &mut Vec<Segment>, description: &mut Vec<&str>, line_break: &str) {
    let trailing = description
        .iter()
        .rev()
        .take_while(|line| line.trim().is_empty())
        .count();
    let body = &description[..description.len() - trailing];
    let leading = body.iter().take_while(|line| line.trim().is_empty()).count();
    let body = &body[leading..];
    if !body.is_empty() {
        out.push(Segment::Description(body.join(line_break)));
        out.extend(std::iter::repeat_with(|| Segment::Blank).take(trailing));
    }
    description.clear();
}
