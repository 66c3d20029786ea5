//! Lines of a document and their token-level queries.

use std::{borrow::Cow, ops::Range};

use crate::{
    breaks::{self, LINE_BREAK_RE},
    document::LineId,
    lexer::TokenKind,
    position::SourcePosition,
    token::Token,
    wrap::LineBuffer,
};

/// One logical line: the tokens between two newline tokens.
///
/// Concatenating the token texts reproduces the line exactly. A line holding
/// a multi-line comment or template spans several physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    id: LineId,
    tokens: Vec<Token>,
    line_break: String,
    terminator: Option<String>,
}

impl SourceLine {
    pub(crate) fn new(id: LineId, line_break: &str) -> Self {
        Self {
            id,
            tokens: Vec::new(),
            line_break: line_break.to_owned(),
            terminator: None,
        }
    }

    pub(crate) fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub(crate) fn terminate(&mut self, terminator: &str) {
        self.terminator = Some(terminator.to_owned());
    }

    #[must_use]
    pub fn id(&self) -> LineId {
        self.id
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The line break that ended this line in the source, `None` for the last
    /// line.
    #[must_use]
    pub fn terminator(&self) -> Option<&str> {
        self.terminator.as_deref()
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::text).collect()
    }

    /// Length in characters of a leading whitespace token.
    #[must_use]
    pub fn indent(&self) -> usize {
        match self.tokens.first() {
            Some(token) if token.is_whitespace() => token.text().chars().count(),
            _ => 0,
        }
    }

    /// Tokens other than whitespace, newlines and the end-of-file marker.
    pub fn essential_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|token| token.kind().is_essential())
    }

    /// Display width of the widest physical line.
    #[must_use]
    pub fn maximal_width(&self) -> usize {
        breaks::maximal_width(&self.text())
    }

    /// The physical lines of this line.
    #[must_use]
    pub fn wrapped_lines(&self) -> Vec<String> {
        breaks::split_lines(&self.text())
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// Kinds of the tokens in `range`, clamped to the token list.
    #[must_use]
    pub fn kinds(&self, range: Range<usize>) -> Vec<TokenKind> {
        let end = range.end.min(self.tokens.len());
        let start = range.start.min(end);
        self.tokens[start..end].iter().map(Token::kind).collect()
    }

    /// Index of the first run of tokens, at or after `from`, whose kinds
    /// equal `kinds`.
    #[must_use]
    pub fn find_sequence(&self, kinds: &[TokenKind], from: usize) -> Option<usize> {
        if kinds.is_empty() || from >= self.tokens.len() {
            return None;
        }
        self.tokens[from..]
            .windows(kinds.len())
            .position(|window| window.iter().map(Token::kind).eq(kinds.iter().copied()))
            .map(|offset| from + offset)
    }

    /// Position of the token at `index` relative to the start of this line.
    #[must_use]
    pub fn token_offset(&self, index: usize) -> Option<SourcePosition> {
        let token = self.tokens.get(index)?;
        let mut start = 0;
        let mut line = 1;
        let mut column = 1;
        for sibling in &self.tokens[..index] {
            let text = sibling.text();
            start += text.len();
            let breaks = breaks::count_breaks(text);
            if breaks == 0 {
                column += text.chars().count();
            } else {
                line += breaks;
                column = 1 + breaks::last_line(text).chars().count();
            }
        }
        Some(SourcePosition {
            line,
            column,
            start,
            end: start + token.text().len(),
        })
    }

    /// Render the line to fit `max` columns.
    ///
    /// Tokens are packed greedily and never split. Continuation lines repeat
    /// the leading whitespace, and whitespace at a break is dropped. A line
    /// that already fits, or `max == None`, yields the original text.
    #[must_use]
    pub fn render(&self, max: Option<usize>) -> String {
        let text = self.text();
        let Some(max) = max else {
            return text;
        };
        if breaks::maximal_width(&text) <= max {
            return text;
        }

        let lead = match self.tokens.first() {
            Some(token) if token.is_whitespace() => token.text(),
            _ => "",
        };
        let mut lines = Vec::new();
        let mut buf = LineBuffer::new();

        for token in &self.tokens {
            let piece: Cow<'_, str> = match token {
                Token::Comment(comment) if !fits_at(comment.text(), buf.width(), max) => {
                    Cow::Owned(comment.render_at(max, buf.width()))
                }
                Token::Doc(doc) if !fits_at(doc.text(), buf.width(), max) => {
                    Cow::Owned(doc.render(Some(max)))
                }
                _ => Cow::Borrowed(token.text()),
            };
            let first = breaks::width(breaks::first_line(&piece));
            if !buf.is_blank() && buf.width() + first > max {
                buf.flush_into(&mut lines);
                buf.push_token(lead);
                if token.is_whitespace() {
                    continue;
                }
            }
            buf.push_token(&piece);
        }
        buf.flush_into(&mut lines);

        tracing::trace!(
            id = self.id.get(),
            lines = lines.len(),
            "reflowed line"
        );
        lines.join(&self.line_break)
    }
}

/// Whether a possibly multi-line `text` fits when its first line starts at
/// `column`.
fn fits_at(text: &str, column: usize, max: usize) -> bool {
    let mut physical = LINE_BREAK_RE.split(text);
    let first = physical.next().map_or(0, breaks::width);
    column + first <= max && physical.all(|line| breaks::width(line) <= max)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::document::SourceDocument;

    fn first_line(source: &str) -> SourceLine {
        let doc = SourceDocument::parse_source("test.ts", source).expect("parse");
        doc.lines()[0].clone()
    }

    #[test]
    fn indent_counts_leading_whitespace() {
        assert_eq!(first_line("    let a = 1;").indent(), 4);
        assert_eq!(first_line("let a = 1;").indent(), 0);
    }

    #[test]
    fn essential_tokens_skip_whitespace() {
        let line = first_line("  a = b;");
        let texts: Vec<&str> = line.essential_tokens().map(Token::text).collect();
        assert_eq!(texts, ["a", "=", "b", ";"]);
    }

    #[test]
    fn kinds_are_clamped() {
        let line = first_line("a.b");
        assert_eq!(
            line.kinds(1..10),
            vec![TokenKind::Dot, TokenKind::Identifier]
        );
        assert!(line.kinds(7..9).is_empty());
    }

    #[rstest]
    #[case("a?.b", &[TokenKind::QuestionDot, TokenKind::Identifier], Some(1))]
    #[case("x: string[]", &[TokenKind::OpenBracket, TokenKind::CloseBracket], Some(4))]
    #[case("x: string[]", &[TokenKind::OpenParen], None)]
    fn finds_kind_sequences(
        #[case] source: &str,
        #[case] kinds: &[TokenKind],
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(first_line(source).find_sequence(kinds, 0), expected);
    }

    #[test]
    fn token_offset_follows_multi_line_tokens() {
        let line = first_line("a /* x\n  y */ b");
        let pos = line.token_offset(4).expect("token");
        assert_eq!(line.tokens()[4].text(), "b");
        assert_eq!((pos.line, pos.column, pos.start), (2, 8, 14));
    }

    #[test]
    fn maximal_width_uses_widest_physical_line() {
        let line = first_line("x = `ab\nabcdef`;");
        assert_eq!(line.maximal_width(), 8);
        assert_eq!(line.wrapped_lines(), ["x = `ab", "abcdef`;"]);
    }

    #[test]
    fn fitting_line_renders_unchanged() {
        let line = first_line("  call(a,   b);  ");
        assert_eq!(line.render(Some(80)), "  call(a,   b);  ");
        assert_eq!(line.render(None), "  call(a,   b);  ");
    }

    #[test]
    fn packs_tokens_greedily() {
        let line = first_line("    foo(alpha, beta, gamma);");
        assert_eq!(line.render(Some(20)), "    foo(alpha, beta,\n    gamma);");
    }

    #[test]
    fn unbreakable_token_stands_alone() {
        let line = first_line("x = 'a very long string literal'");
        assert_eq!(line.render(Some(10)), "x =\n'a very long string literal'");
    }
}
