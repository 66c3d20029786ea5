//! The maximum line length rule and fix application.

use std::ops::Range;

use regex::Regex;
use tracing::{debug, warn};

use crate::{document::SourceDocument, error::ParseError};

pub const DEFAULT_MAX_LENGTH: usize = 80;

/// Options of the length rule.
#[derive(Debug, Clone)]
pub struct LengthOptions {
    pub max_length: usize,
    /// Lines whose text matches are never reported.
    pub ignore_pattern: Option<Regex>,
}

impl Default for LengthOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            ignore_pattern: None,
        }
    }
}

/// Replacement of a byte range of the raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub range: Range<usize>,
    pub text: String,
}

/// A line wider than the limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number.
    pub line: usize,
    /// 0-based column.
    pub column: usize,
    /// Byte range of the reported line.
    pub range: Range<usize>,
    /// Width of the widest physical line.
    pub width: usize,
    pub message: String,
    /// Re-rendered text for `range`; `None` when rendering changes nothing.
    pub fix: Option<Fix>,
}

#[must_use]
pub fn message(max_length: usize) -> String {
    format!("Line exceeds limit of {max_length} characters.")
}

/// Report every line of `doc` that is wider than the limit.
#[must_use]
pub fn check_length(doc: &SourceDocument, options: &LengthOptions) -> Vec<Diagnostic> {
    let max = options.max_length;
    let mut diagnostics = Vec::new();

    for line in doc.lines() {
        let text = line.text();
        if options
            .ignore_pattern
            .as_ref()
            .is_some_and(|re| re.is_match(&text))
        {
            continue;
        }
        let width = line.maximal_width();
        if width <= max {
            continue;
        }
        let Some(position) = doc.line_position(line.id()) else {
            continue;
        };
        let rendered = line.render(Some(max));
        let fix = (rendered != text).then(|| Fix {
            range: position.range(),
            text: rendered,
        });
        diagnostics.push(Diagnostic {
            line: position.line,
            column: position.zero_based_column(),
            range: position.range(),
            width,
            message: message(max),
            fix,
        });
    }

    debug!(
        file = doc.file_name(),
        diagnostics = diagnostics.len(),
        "checked line length"
    );
    diagnostics
}

/// Apply `fixes` to `raw` from the end towards the start.
///
/// A fix overlapping one that starts later is skipped, as is a fix whose
/// range lies outside the text.
#[must_use]
pub fn apply_fixes(raw: &str, fixes: &[Fix]) -> String {
    let mut sorted: Vec<&Fix> = fixes.iter().collect();
    sorted.sort_by(|a, b| b.range.start.cmp(&a.range.start));

    let mut result = raw.to_owned();
    let mut boundary = usize::MAX;
    for fix in sorted {
        let Range { start, end } = fix.range;
        if start > end
            || end > result.len()
            || !result.is_char_boundary(start)
            || !result.is_char_boundary(end)
        {
            warn!(start, end, len = result.len(), "invalid fix range");
            continue;
        }
        if end > boundary {
            warn!(start, end, "skipping overlapping fix");
            continue;
        }
        result.replace_range(start..end, &fix.text);
        boundary = start;
    }
    result
}

/// Apply length fixes to `doc` and re-parse, up to `passes` times or until
/// nothing changes. Returns the number of passes that changed the text.
///
/// # Errors
///
/// Returns the [`ParseError`] of a re-parse; the document keeps the text of
/// the last successful pass.
pub fn fix_document(
    doc: &mut SourceDocument,
    options: &LengthOptions,
    passes: usize,
) -> Result<usize, ParseError> {
    let mut applied = 0;
    for _ in 0..passes {
        let fixes: Vec<Fix> = check_length(doc, options)
            .into_iter()
            .filter_map(|d| d.fix)
            .collect();
        if fixes.is_empty() {
            break;
        }
        let fixed = apply_fixes(doc.raw(), &fixes);
        if fixed == doc.raw() {
            break;
        }
        doc.parse(&fixed, true)?;
        applied += 1;
    }
    Ok(applied)
}
