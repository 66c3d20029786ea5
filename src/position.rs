//! Positions of lines and tokens inside a document.

use std::ops::Range;

/// Location of a line or token in the raw text of a document.
///
/// `start` and `end` are byte offsets into the raw text; `line` and `column`
/// are 1-based, with columns counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
    pub start: usize,
    pub end: usize,
}

impl SourcePosition {
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Column as counted by hosts that number columns from zero.
    #[must_use]
    pub fn zero_based_column(&self) -> usize {
        self.column.saturating_sub(1)
    }

    /// Resolve a position measured from the start of a line against that
    /// line's own position.
    #[must_use]
    pub(crate) fn within(self, line: SourcePosition) -> SourcePosition {
        SourcePosition {
            line: line.line + self.line - 1,
            column: self.column,
            start: line.start + self.start,
            end: line.start + self.end,
        }
    }
}
