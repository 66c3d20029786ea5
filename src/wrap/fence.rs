//! Fenced code block helpers.

use std::sync::LazyLock;

use regex::Regex;

// Capture: the backtick run and the trailing info string.
static FENCE_RE: LazyLock<Regex> = lazy_regex!(r"^\s*(`{3,})(.*)$", "fence regex should compile");

/// Return the marker and info string if `line` is a code fence.
///
/// # Examples
///
/// ```rust
/// use docletfix::wrap::is_fence;
/// assert_eq!(is_fence("```ts"), Some(("```", "ts")));
/// assert_eq!(is_fence("  ```` js run"), Some(("````", " js run")));
/// assert!(is_fence("`` short").is_none());
/// ```
#[must_use]
#[rustfmt::skip]
pub fn is_fence(line: &str) -> Option<(&str, &str)> {
    FENCE_RE.captures(line).map(|cap| {
        let fence = cap.get(1).map_or("", |m| m.as_str());
        let info  = cap.get(2).map_or("", |m| m.as_str());
        (fence, info)
    })
}

/// Tracks fenced code block state across the lines of a doclet body.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<usize>,
}

impl FenceTracker {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Update the tracker with a potential fence line.
    ///
    /// Returns `true` when the line is a fence marker. A fence closes on a run
    /// at least as long as the one that opened it.
    #[must_use]
    pub(crate) fn observe(&mut self, line: &str) -> bool {
        let Some((fence, _info)) = is_fence(line) else {
            return false;
        };
        let len = fence.len();
        match self.open {
            Some(open) if len >= open => self.open = None,
            Some(_) => {}
            None => self.open = Some(len),
        }
        true
    }

    #[must_use]
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }
}
