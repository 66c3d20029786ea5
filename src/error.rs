//! Error types surfaced by parsing and file rewriting.

use thiserror::Error;

/// A source text that cannot be tokenized to its end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A block comment or template literal is still open at end of input.
    #[error("{file}:{line}: unterminated {construct}")]
    Malformed {
        file: String,
        /// 1-based line on which the construct starts.
        line: usize,
        construct: &'static str,
    },
}

/// Failure while fixing a file on disk.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
