//! Source documents: the lines of one file and the positions within it.

use tracing::{debug, trace};

use crate::{
    breaks::{self, DEFAULT_LINE_BREAK, detect_line_break},
    comment::SourceComment,
    doc::{SourceDoc, is_doc},
    error::ParseError,
    lexer::{self, TokenKind},
    line::SourceLine,
    position::SourcePosition,
    token::Token,
};

/// Identity of a line within one document. Ids are never reused, so an id
/// taken before a re-parse no longer resolves afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u64);

impl LineId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// How the indentation in front of a block comment is normalized before it
/// is used to strip and re-pad the comment body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IndentPolicy {
    /// Round down to an even number of columns.
    #[default]
    EvenStep,
    /// Use the indentation as found.
    Exact,
}

impl IndentPolicy {
    #[must_use]
    pub fn apply(self, indent: usize) -> usize {
        match self {
            Self::EvenStep => indent / 2 * 2,
            Self::Exact => indent,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub indent: IndentPolicy,
}

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    file_name: String,
    raw: String,
    line_break: String,
    options: ParseOptions,
    lines: Vec<SourceLine>,
    next_id: u64,
}

impl SourceDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new(file_name: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            file_name: file_name.into(),
            raw: String::new(),
            line_break: DEFAULT_LINE_BREAK.to_owned(),
            options,
            lines: Vec::new(),
            next_id: 0,
        }
    }

    /// Parse `text` with default options.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] when a block comment or template
    /// literal is not closed.
    pub fn parse_source(file_name: impl Into<String>, text: &str) -> Result<Self, ParseError> {
        Self::parse_with(file_name, text, ParseOptions::default())
    }

    /// Parse `text` with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] when a block comment or template
    /// literal is not closed.
    pub fn parse_with(
        file_name: impl Into<String>,
        text: &str,
        options: ParseOptions,
    ) -> Result<Self, ParseError> {
        let mut doc = Self::new(file_name, options);
        doc.parse(text, true)?;
        Ok(doc)
    }

    fn next_line(&mut self) -> SourceLine {
        let id = LineId(self.next_id);
        self.next_id += 1;
        SourceLine::new(id, &self.line_break)
    }

    /// Tokenize `text` into lines, replacing the current lines when
    /// `replace` is set and appending a new line run otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] when a block comment or template
    /// literal is not closed. The document is left unchanged in that case.
    pub fn parse(&mut self, text: &str, replace: bool) -> Result<(), ParseError> {
        let tokens = lexer::scan(text).map_err(|err| ParseError::Malformed {
            file: self.file_name.clone(),
            line: 1 + breaks::count_breaks(&text[..err.offset]),
            construct: err.error.construct(),
        })?;

        if replace {
            self.lines.clear();
            self.raw.clear();
        }
        if self.lines.is_empty() {
            self.line_break = detect_line_break(text)
                .unwrap_or(DEFAULT_LINE_BREAK)
                .to_owned();
        }
        if text.is_empty() {
            debug!(file = %self.file_name, "empty source");
            return Ok(());
        }

        if let Some(last) = self.lines.last_mut() {
            last.terminate(&self.line_break);
            self.raw.push_str(&self.line_break);
        }
        self.raw.push_str(text);

        let before = self.lines.len();
        let mut line = self.next_line();
        for token in tokens {
            match token.kind {
                TokenKind::Newline => {
                    line.terminate(&token.text);
                    let next = self.next_line();
                    self.lines.push(std::mem::replace(&mut line, next));
                }
                TokenKind::EndOfFile => {}
                TokenKind::MultiLineComment => {
                    let indent = self.options.indent.apply(line.indent());
                    let structured = if is_doc(&token.text) {
                        Token::Doc(SourceDoc::new(&token.text, &self.line_break, indent))
                    } else {
                        Token::Comment(SourceComment::new(&token.text, &self.line_break, indent))
                    };
                    line.push(structured);
                }
                _ => line.push(token.into()),
            }
        }
        self.lines.push(line);

        debug!(
            file = %self.file_name,
            lines = self.lines.len() - before,
            replace,
            "parsed source"
        );
        Ok(())
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The first line break found in the source, `\n` when there is none.
    #[must_use]
    pub fn line_break(&self) -> &str {
        &self.line_break
    }

    #[must_use]
    pub fn options(&self) -> ParseOptions {
        self.options
    }

    #[must_use]
    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: LineId) -> Option<&SourceLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Absolute position of a line. `None` when the id is stale.
    #[must_use]
    pub fn line_position(&self, id: LineId) -> Option<SourcePosition> {
        let Some(index) = self.lines.iter().position(|line| line.id() == id) else {
            trace!(file = %self.file_name, id = id.get(), "stale line reference");
            return None;
        };

        let mut start = 0;
        let mut line = 1;
        for previous in &self.lines[..index] {
            let text = previous.text();
            start += text.len() + previous.terminator().map_or(0, str::len);
            line += 1 + breaks::count_breaks(&text);
        }

        Some(SourcePosition {
            line,
            column: 1,
            start,
            end: start + self.lines[index].text().len(),
        })
    }

    /// Absolute position of the token at `index` in a line. `None` when the
    /// id is stale or the index is out of range.
    #[must_use]
    pub fn token_position(&self, id: LineId, index: usize) -> Option<SourcePosition> {
        let line = self.line(id)?;
        let offset = line.token_offset(index)?;
        Some(offset.within(self.line_position(id)?))
    }

    /// Render every line within `max` columns, keeping the original line
    /// terminators.
    #[must_use]
    pub fn render(&self, max: Option<usize>) -> String {
        let mut out = String::with_capacity(self.raw.len());
        for line in &self.lines {
            out.push_str(&line.render(max));
            if let Some(terminator) = line.terminator() {
                out.push_str(terminator);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("")]
    #[case("\n")]
    #[case("let a = 1;\r\nlet b = 2;\r\n")]
    #[case("/**\n * Doc.\n */\nfunction f() {}\n")]
    #[case("a\r b\n\n  /* c\n     d */ e")]
    fn unconstrained_render_reproduces_source(#[case] source: &str) {
        let doc = SourceDocument::parse_source("t.ts", source).expect("parse");
        assert_eq!(doc.render(None), source);
        assert_eq!(doc.raw(), source);
    }

    #[test]
    fn empty_source_has_no_lines() {
        let doc = SourceDocument::parse_source("t.ts", "").expect("parse");
        assert!(doc.lines().is_empty());
        assert_eq!(doc.line_break(), "\n");
    }

    #[test]
    fn detects_first_line_break() {
        let doc = SourceDocument::parse_source("t.ts", "a\r\nb\nc").expect("parse");
        assert_eq!(doc.line_break(), "\r\n");
        assert_eq!(doc.lines()[1].terminator(), Some("\n"));
        assert_eq!(doc.lines()[2].terminator(), None);
    }

    #[test]
    fn classifies_block_comments() {
        let doc = SourceDocument::parse_source("t.ts", "/** Doc. */ /* plain */").expect("parse");
        let kinds = doc.lines()[0].kinds(0..3);
        assert_eq!(
            kinds,
            vec![
                TokenKind::DocComment,
                TokenKind::Whitespace,
                TokenKind::MultiLineComment,
            ]
        );
    }

    #[rstest]
    #[case(IndentPolicy::EvenStep, 4)]
    #[case(IndentPolicy::Exact, 5)]
    fn indent_policy_shapes_comment_indent(#[case] indent: IndentPolicy, #[case] expected: usize) {
        let options = ParseOptions { indent };
        let doc = SourceDocument::parse_with("t.ts", "     /* a\n      */", options)
            .expect("parse");
        let Token::Comment(comment) = &doc.lines()[0].tokens()[1] else {
            panic!("expected a plain comment");
        };
        assert_eq!(comment.indent(), expected);
    }

    #[test]
    fn malformed_source_reports_line_and_keeps_document() {
        let mut doc = SourceDocument::parse_source("t.ts", "a;\n").expect("parse");
        let err = doc.parse("ok;\nx = `open\n", true).expect_err("must fail");
        assert_eq!(
            err,
            ParseError::Malformed {
                file: "t.ts".into(),
                line: 2,
                construct: "template literal",
            }
        );
        assert_eq!(doc.raw(), "a;\n");
        assert_eq!(doc.lines().len(), 2);
    }

    #[test]
    fn line_positions_count_inner_breaks() {
        let source = "a;\n/* x\n y */ b;\nc;";
        let doc = SourceDocument::parse_source("t.ts", source).expect("parse");
        let last = doc.lines()[2].id();
        let pos = doc.line_position(last).expect("position");
        assert_eq!((pos.line, pos.column), (4, 1));
        assert_eq!(&source[pos.range()], "c;");
    }

    #[test]
    fn token_position_is_absolute() {
        let source = "first();\n  second(x);";
        let doc = SourceDocument::parse_source("t.ts", source).expect("parse");
        let id = doc.lines()[1].id();
        let pos = doc.token_position(id, 3).expect("position");
        assert_eq!(&source[pos.range()], "x");
        assert_eq!((pos.line, pos.column), (2, 10));
        assert!(doc.token_position(id, 99).is_none());
    }

    #[test]
    fn stale_ids_do_not_resolve_after_reparse() {
        let mut doc = SourceDocument::parse_source("t.ts", "a;\nb;").expect("parse");
        let old = doc.lines()[1].id();
        doc.parse("a;\nb;", true).expect("parse");
        assert!(doc.line_position(old).is_none());
        assert!(doc.token_position(old, 0).is_none());
        assert!(doc.line(old).is_none());
    }

    #[test]
    fn append_continues_on_a_new_line() {
        let mut doc = SourceDocument::parse_source("t.ts", "a;").expect("parse");
        doc.parse("b;", false).expect("parse");
        assert_eq!(doc.raw(), "a;\nb;");
        assert_eq!(doc.render(None), doc.raw());
        let second = doc.lines()[1].id();
        assert_eq!(doc.line_position(second).map(|p| p.start), Some(3));
    }
}
