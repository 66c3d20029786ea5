//! Lossless TypeScript/JavaScript tokenization.
//!
//! The grammar is declared with `logos`. Constructs that need context or
//! nesting (block comments, template literals and regular expression
//! literals) are finished by the byte scanners in [`scanning`]. Every byte of
//! the input ends up in exactly one token, so concatenating the token texts
//! reproduces the source.

mod scanning;

use logos::{Lexer, Logos};
use thiserror::Error;

/// Failures the grammar reports for a construct it cannot close.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    #[default]
    #[error("unrecognized character")]
    Unrecognized,
    #[error("block comment")]
    UnterminatedComment,
    #[error("template literal")]
    UnterminatedTemplate,
}

impl LexError {
    /// Human-readable name of the construct left open.
    #[must_use]
    pub fn construct(self) -> &'static str {
        match self {
            Self::Unrecognized => "character",
            Self::UnterminatedComment => "block comment",
            Self::UnterminatedTemplate => "template literal",
        }
    }
}

/// A scan that could not reach the end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanError {
    /// Byte offset where the offending construct starts.
    pub offset: usize,
    pub error: LexError,
}

fn block_comment(lex: &mut Lexer<TokenKind>) -> Result<(), LexError> {
    let start = lex.span().end;
    let end = scanning::block_comment_end(lex.source().as_bytes(), start)
        .ok_or(LexError::UnterminatedComment)?;
    lex.bump(end - start);
    Ok(())
}

fn template(lex: &mut Lexer<TokenKind>) -> Result<(), LexError> {
    let start = lex.span().end;
    let end = scanning::template_end(lex.source().as_bytes(), start)
        .ok_or(LexError::UnterminatedTemplate)?;
    lex.bump(end - start);
    Ok(())
}

/// Kind of a lexical token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(error = LexError)]
pub enum TokenKind {
    #[regex(r"[ \t\x0B\x0C\x{A0}\x{FEFF}]+")]
    Whitespace,
    #[regex(r"\r\n|\n|\r")]
    Newline,
    #[regex(r"//[^\r\n]*")]
    SingleLineComment,
    #[token("/*", block_comment)]
    MultiLineComment,
    /// A multi-line comment that was classified as a doclet.
    DocComment,
    #[regex(r#""([^"\\\r\n]|\\(\r\n|[\s\S]))*"?"#)]
    #[regex(r"'([^'\\\r\n]|\\(\r\n|[\s\S]))*'?")]
    StringLiteral,
    #[token("`", template)]
    TemplateLiteral,
    /// Produced by rescanning a slash where an expression may start.
    RegularExpression,
    #[regex(r"[0-9][0-9a-zA-Z_]*(\.[0-9a-zA-Z_]*)?")]
    #[regex(r"\.[0-9][0-9a-zA-Z_]*")]
    NumericLiteral,
    #[regex(r"[\p{XID_Start}_$][\p{XID_Continue}$\x{200C}\x{200D}]*")]
    #[regex(r"#[\p{XID_Start}_$][\p{XID_Continue}$\x{200C}\x{200D}]*")]
    Identifier,
    #[token("abstract")]
    #[token("any")]
    #[token("as")]
    #[token("async")]
    #[token("await")]
    #[token("boolean")]
    #[token("break")]
    #[token("case")]
    #[token("catch")]
    #[token("class")]
    #[token("const")]
    #[token("constructor")]
    #[token("continue")]
    #[token("debugger")]
    #[token("declare")]
    #[token("default")]
    #[token("delete")]
    #[token("do")]
    #[token("else")]
    #[token("enum")]
    #[token("export")]
    #[token("extends")]
    #[token("false")]
    #[token("finally")]
    #[token("for")]
    #[token("from")]
    #[token("function")]
    #[token("get")]
    #[token("if")]
    #[token("implements")]
    #[token("import")]
    #[token("in")]
    #[token("instanceof")]
    #[token("interface")]
    #[token("keyof")]
    #[token("let")]
    #[token("module")]
    #[token("namespace")]
    #[token("never")]
    #[token("new")]
    #[token("null")]
    #[token("number")]
    #[token("of")]
    #[token("package")]
    #[token("private")]
    #[token("protected")]
    #[token("public")]
    #[token("readonly")]
    #[token("return")]
    #[token("set")]
    #[token("static")]
    #[token("string")]
    #[token("super")]
    #[token("switch")]
    #[token("symbol")]
    #[token("this")]
    #[token("throw")]
    #[token("true")]
    #[token("try")]
    #[token("type")]
    #[token("typeof")]
    #[token("undefined")]
    #[token("unknown")]
    #[token("var")]
    #[token("void")]
    #[token("while")]
    #[token("with")]
    #[token("yield")]
    Keyword,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token(".")]
    Dot,
    #[token("...")]
    DotDotDot,
    #[token("?.")]
    QuestionDot,
    #[token("?")]
    Question,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("<")]
    LessThan,
    /// Always a single `>`; shifts and comparisons are split so generic
    /// argument lists close cleanly.
    #[token(">")]
    GreaterThan,
    #[token("=")]
    Equals,
    #[token("=>")]
    EqualsGreaterThan,
    #[token("/")]
    Slash,
    #[token("/=")]
    SlashEquals,
    #[token("@")]
    At,
    #[token("#")]
    Hash,
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("**")]
    #[token("%")]
    #[token("++")]
    #[token("--")]
    #[token("<<")]
    #[token("<=")]
    #[token("==")]
    #[token("===")]
    #[token("!=")]
    #[token("!==")]
    #[token("&")]
    #[token("&&")]
    #[token("|")]
    #[token("||")]
    #[token("^")]
    #[token("!")]
    #[token("~")]
    #[token("??")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("**=")]
    #[token("%=")]
    #[token("<<=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("&&=")]
    #[token("||=")]
    #[token("??=")]
    Operator,
    /// A character outside the grammar, kept verbatim.
    Unknown,
    /// Zero-width marker closing every token stream.
    EndOfFile,
}

impl TokenKind {
    /// Whitespace, newlines and comments: tokens that never change what the
    /// next slash means.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace
                | Self::Newline
                | Self::SingleLineComment
                | Self::MultiLineComment
                | Self::DocComment
        )
    }

    /// Tokens that carry meaning for the length rule and pattern searches.
    #[must_use]
    pub fn is_essential(self) -> bool {
        !matches!(self, Self::Whitespace | Self::Newline | Self::EndOfFile)
    }

    /// Whether a slash right after a token of this kind starts a regular
    /// expression. `text` disambiguates keywords that end an expression.
    fn permits_regex_after(self, text: &str) -> bool {
        match self {
            Self::Identifier
            | Self::NumericLiteral
            | Self::StringLiteral
            | Self::TemplateLiteral
            | Self::RegularExpression
            | Self::CloseParen
            | Self::CloseBracket
            | Self::CloseBrace => false,
            Self::Keyword => !matches!(text, "this" | "super" | "true" | "false" | "null"),
            _ => true,
        }
    }
}

/// An immutable lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainToken {
    pub kind: TokenKind,
    pub text: String,
}

impl PlainToken {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Tokenize `source` into a lossless token sequence closed by an
/// [`TokenKind::EndOfFile`] marker.
///
/// # Errors
///
/// Returns a [`ScanError`] when a block comment or template literal is not
/// closed before the end of input.
pub fn scan(source: &str) -> Result<Vec<PlainToken>, ScanError> {
    let bytes = source.as_bytes();
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();
    let mut regex_allowed = true;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(kind @ (TokenKind::Slash | TokenKind::SlashEquals)) if regex_allowed => {
                match scanning::regex_literal_end(bytes, span.start + 1) {
                    Some(end) => {
                        lexer.bump(end - span.end);
                        TokenKind::RegularExpression
                    }
                    None => kind,
                }
            }
            Ok(kind) => kind,
            Err(LexError::Unrecognized) => TokenKind::Unknown,
            Err(error) => {
                return Err(ScanError {
                    offset: span.start,
                    error,
                });
            }
        };
        let text = lexer.slice();
        if !kind.is_trivia() {
            regex_allowed = kind.permits_regex_after(text);
        }
        tokens.push(PlainToken::new(kind, text));
    }

    tokens.push(PlainToken::new(TokenKind::EndOfFile, ""));
    Ok(tokens)
}
