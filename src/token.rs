//! Tokens as stored in a line.

use crate::{
    comment::SourceComment,
    doc::SourceDoc,
    lexer::{PlainToken, TokenKind},
};

/// A token of a [`crate::SourceLine`]. Multi-line comments are replaced by
/// their structured form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Plain(PlainToken),
    Comment(SourceComment),
    Doc(SourceDoc),
}

impl Token {
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Plain(token) => token.kind,
            Self::Comment(_) => TokenKind::MultiLineComment,
            Self::Doc(_) => TokenKind::DocComment,
        }
    }

    /// The original text of the token.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(token) => &token.text,
            Self::Comment(comment) => comment.text(),
            Self::Doc(doc) => doc.text(),
        }
    }

    /// Render the token to fit `max` columns. Plain tokens are never split.
    #[must_use]
    pub fn render(&self, max: Option<usize>) -> String {
        match self {
            Self::Plain(token) => token.text.clone(),
            Self::Comment(comment) => comment.render(max),
            Self::Doc(doc) => doc.render(max),
        }
    }

    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.kind() == TokenKind::Whitespace
    }
}

impl From<PlainToken> for Token {
    fn from(token: PlainToken) -> Self {
        Self::Plain(token)
    }
}
