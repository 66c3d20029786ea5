//! Helper macros used across the crate.

/// Lazily compile a [`regex::Regex`] with a custom panic message.
///
/// Patterns are literals owned by this crate, so a failure to compile is a
/// programming error surfaced on first use.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
///
/// use regex::Regex;
/// static TAG: LazyLock<Regex> = docletfix::lazy_regex!(r"^@\S+", "tag head");
/// assert!(TAG.is_match("@param"));
/// ```
#[macro_export]
macro_rules! lazy_regex {
    ($pattern:expr, $msg:expr $(,)?) => {
        ::std::sync::LazyLock::new(|| ::regex::Regex::new($pattern).expect($msg))
    };
}
