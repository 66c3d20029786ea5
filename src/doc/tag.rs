//! Decoding of a single doclet tag segment.

use std::sync::LazyLock;

use regex::Regex;

use crate::breaks::trim_breaks;

// Name, optional `{type}` without inner whitespace, optional argument
// (`[optional]` or a bare word) and the remaining body.
static TAG_RE: LazyLock<Regex> = lazy_regex!(
    r"^@(\S+)([ \t]+\{[^}\s]+\})?([ \t]+(\[[^\]]*\]|\S+))?(\s[\s\S]*)?$",
    "tag regex should compile",
);

/// Tags whose argument names a binding and is never body text.
const PARAMETER_TAGS: [&str; 5] = ["param", "arg", "argument", "prop", "property"];

/// Shape of a doclet entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagShape {
    /// Free text before the first tag.
    Description,
    /// An empty line between entries.
    Blank,
    /// `@name ...`
    Named(String),
    /// A tag line that could not be decoded; kept verbatim.
    Orphan,
}

/// One entry of a doclet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    pub shape: TagShape,
    /// The type annotation including its braces, e.g. `{number}`.
    pub tag_type: Option<String>,
    pub tag_argument: Option<String>,
    pub text: String,
}

impl DocTag {
    #[must_use]
    pub fn description(text: impl Into<String>) -> Self {
        Self {
            shape: TagShape::Description,
            tag_type: None,
            tag_argument: None,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn blank() -> Self {
        Self {
            shape: TagShape::Blank,
            tag_type: None,
            tag_argument: None,
            text: String::new(),
        }
    }

    /// `"description"` for the description, the tag name for named tags and
    /// an empty string otherwise.
    #[must_use]
    pub fn tag_kind(&self) -> &str {
        match &self.shape {
            TagShape::Description => "description",
            TagShape::Named(name) => name,
            TagShape::Blank | TagShape::Orphan => "",
        }
    }

    /// Whether this is the `@example` tag, whose body is code.
    #[must_use]
    pub fn is_example(&self) -> bool {
        matches!(&self.shape, TagShape::Named(name) if name == "example")
    }

    /// Decode a raw tag segment starting with `@`.
    ///
    /// Never fails: a segment that does not look like a tag becomes an
    /// [`TagShape::Orphan`] that keeps the raw text.
    #[must_use]
    pub fn decode(raw: &str) -> Self {
        if let Some(rest) = example_body(raw) {
            return Self {
                shape: TagShape::Named("example".to_owned()),
                tag_type: None,
                tag_argument: None,
                text: rest.to_owned(),
            };
        }

        let Some(cap) = TAG_RE.captures(raw) else {
            return Self {
                shape: TagShape::Orphan,
                tag_type: None,
                tag_argument: None,
                text: raw.to_owned(),
            };
        };

        let name = cap.get(1).map_or("", |m| m.as_str());
        let tag_type = cap.get(2).map(|m| m.as_str().trim_start().to_owned());
        let argument = cap.get(4).map(|m| m.as_str());
        let rest = cap.get(5).map_or("", |m| m.as_str());
        let body = trim_breaks(rest).trim();

        let keeps_argument = rest.is_empty()
            || rest.starts_with(['\r', '\n'])
            || PARAMETER_TAGS.contains(&name);

        let (tag_argument, text) = match argument {
            Some(arg) if keeps_argument => (Some(arg.to_owned()), body.to_owned()),
            Some(arg) if body.is_empty() => (None, arg.to_owned()),
            Some(arg) => (None, format!("{arg} {body}")),
            None => (None, body.to_owned()),
        };

        Self {
            shape: TagShape::Named(name.to_owned()),
            tag_type,
            tag_argument,
            text,
        }
    }
}

/// Body of an `@example` segment: the rest of the header line minus one
/// separator, with surrounding blank lines removed.
fn example_body(raw: &str) -> Option<&str> {
    let rest = raw.strip_prefix("@example")?;
    if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        return None;
    }
    let rest = rest.strip_prefix([' ', '\t']).unwrap_or(rest);
    Some(trim_breaks(rest))
}
