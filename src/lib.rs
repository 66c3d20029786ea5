//! Tokenize TypeScript and JavaScript sources into positioned lines and
//! reflow them to a maximum column width.
//!
//! A [`SourceDocument`] groups the lossless token stream of one file into
//! [`SourceLine`]s. Block comments become a plain [`SourceComment`] or, for
//! `/** ... */`, a [`SourceDoc`] holding a sequence of [`DocTag`]s. Any line
//! or comment renders back to text, either verbatim or re-wrapped to fit a
//! width, and the document resolves the byte range and line/column of every
//! line and token so a lint host can report and splice fixes.
//!
//! - [`lexer`] tokenizes source text.
//! - [`wrap`] packs comment paragraphs while keeping code fences verbatim.
//! - [`lint`] implements the maximum line length rule.
//! - [`io`] reads and rewrites files.

#[macro_use]
mod macros;

pub mod breaks;
pub mod cache;
pub mod comment;
pub mod doc;
pub mod document;
pub mod error;
pub mod io;
pub mod lexer;
pub mod line;
pub mod lint;
pub mod position;
pub mod token;
pub mod wrap;

pub use cache::DocumentCache;
pub use comment::SourceComment;
pub use doc::{DocTag, SourceDoc, TagShape, is_doc};
pub use document::{IndentPolicy, LineId, ParseOptions, SourceDocument};
pub use error::{ParseError, RewriteError};
pub use io::{FIX_PASSES, fix_text, read_source, rewrite};
pub use lexer::{PlainToken, TokenKind, scan};
pub use line::SourceLine;
pub use lint::{
    DEFAULT_MAX_LENGTH, Diagnostic, Fix, LengthOptions, apply_fixes, check_length, fix_document,
};
pub use position::SourcePosition;
pub use token::Token;
pub use wrap::indent_wrap;
