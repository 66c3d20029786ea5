//! Line buffer used when packing tokens into physical lines.
//!
//! Tokens may span several physical lines (block comments, template
//! literals), so the tracked width is that of the last physical line only.

use crate::breaks::{self, LINE_BREAK_RE};

#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    text: String,
    width: usize,
}

impl LineBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Width of the physical line currently being filled.
    pub(crate) fn width(&self) -> usize {
        self.width
    }

    /// Whether the buffer holds nothing but whitespace.
    pub(crate) fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub(crate) fn push_token(&mut self, token: &str) {
        self.text.push_str(token);
        if LINE_BREAK_RE.is_match(token) {
            self.width = breaks::width(breaks::last_line(token));
        } else {
            self.width += breaks::width(token);
        }
    }

    /// Move the buffered text into `lines` without trailing whitespace.
    pub(crate) fn flush_into(&mut self, lines: &mut Vec<String>) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        lines.push(text.trim_end().to_owned());
        self.width = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_follows_last_physical_line() {
        let mut buf = LineBuffer::new();
        buf.push_token("let a = ");
        assert_eq!(buf.width(), 8);
        buf.push_token("`one\ntwo`");
        assert_eq!(buf.width(), 4);
        let mut out = Vec::new();
        buf.flush_into(&mut out);
        assert_eq!(out, vec!["let a = `one\ntwo`".to_string()]);
        assert!(buf.is_blank());
    }
}
