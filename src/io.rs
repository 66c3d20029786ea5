//! File helpers for fixing source files.

use std::{fs, path::Path};

use crate::{
    document::{ParseOptions, SourceDocument},
    error::{ParseError, RewriteError},
    lint::{self, LengthOptions},
};

/// Upper bound on fix-and-reparse rounds for one text.
pub const FIX_PASSES: usize = 4;

/// Return `text` with every over-long line reflowed.
///
/// # Errors
///
/// Returns a [`ParseError`] when the text cannot be tokenized.
pub fn fix_text(
    file_name: &str,
    text: &str,
    parse: ParseOptions,
    length: &LengthOptions,
) -> Result<String, ParseError> {
    let mut doc = SourceDocument::parse_with(file_name, text, parse)?;
    lint::fix_document(&mut doc, length, FIX_PASSES)?;
    Ok(doc.raw().to_owned())
}

/// Read a source file.
///
/// # Errors
///
/// Returns [`RewriteError::Io`] when the file cannot be read.
pub fn read_source(path: &Path) -> Result<String, RewriteError> {
    fs::read_to_string(path).map_err(|source| RewriteError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Rewrite a file in place with over-long lines reflowed. Returns whether
/// the file changed; an unchanged file is not written.
///
/// # Errors
///
/// Returns an error if reading, parsing or writing the file fails.
pub fn rewrite(
    path: &Path,
    parse: ParseOptions,
    length: &LengthOptions,
) -> Result<bool, RewriteError> {
    let text = read_source(path)?;
    let fixed = fix_text(&path.to_string_lossy(), &text, parse, length)?;
    if fixed == text {
        return Ok(false);
    }
    fs::write(path, fixed).map_err(|source| RewriteError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn narrow() -> LengthOptions {
        LengthOptions {
            max_length: 20,
            ..LengthOptions::default()
        }
    }

    #[test]
    fn rewrite_reflows_long_lines() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("sample.ts");
        fs::write(&file, "call(first, second, third);\n").expect("write");
        assert!(rewrite(&file, ParseOptions::default(), &narrow()).expect("rewrite"));
        let out = fs::read_to_string(&file).expect("read");
        assert_eq!(out, "call(first, second,\nthird);\n");
    }

    #[test]
    fn rewrite_leaves_fitting_file_alone() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("sample.ts");
        fs::write(&file, "ok();\r\n").expect("write");
        assert!(!rewrite(&file, ParseOptions::default(), &narrow()).expect("rewrite"));
        assert_eq!(fs::read_to_string(&file).expect("read"), "ok();\r\n");
    }

    #[test]
    fn rewrite_reports_parse_errors() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("broken.ts");
        fs::write(&file, "a;\n/* open").expect("write");
        let err = rewrite(&file, ParseOptions::default(), &narrow()).expect_err("must fail");
        assert!(matches!(err, RewriteError::Parse(ParseError::Malformed { line: 2, .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().expect("tempdir");
        let err = read_source(&dir.path().join("absent.ts")).expect_err("must fail");
        assert!(matches!(err, RewriteError::Io { .. }));
    }
}
