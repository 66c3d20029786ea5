//! Byte-level scanners for the constructs a regular grammar cannot close.
//!
//! Every function takes the whole source as bytes plus a start offset and
//! returns the absolute offset just past the construct. Returned offsets
//! always follow an ASCII byte, so they fall on `char` boundaries.

/// Scan forward until `*/` and return the offset after it.
pub(super) fn block_comment_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return Some(i + 2);
        }
        i += 1;
    }
    None
}

/// Scan the remainder of a template literal whose opening backtick ends at
/// `start`. Substitutions may nest further templates, strings and comments.
pub(super) fn template_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return Some(i + 1),
            b'$' if bytes.get(i + 1) == Some(&b'{') => i = substitution_end(bytes, i + 2)?,
            _ => i += 1,
        }
    }
    None
}

fn substitution_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            b'`' => {
                i = template_end(bytes, i + 1)?;
                continue;
            }
            b'"' | b'\'' => {
                i = quoted_end(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = block_comment_end(bytes, i + 2)?;
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = line_end(bytes, i);
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// End of a quoted string starting at `start`. Unterminated strings stop at
/// the line break, the way the TypeScript scanner recovers from them.
fn quoted_end(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\r' | b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len().min(i)
}

fn line_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\r' || b == b'\n')
        .map_or(bytes.len(), |pos| start + pos)
}

/// Scan a regular expression literal whose body starts at `start` (just after
/// the opening slash). Returns `None` when the line ends before the closing
/// slash, in which case the slash stays a division operator.
pub(super) fn regex_literal_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    let mut in_class = false;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' | b'\n' => return None,
            b'\\' => {
                if matches!(bytes.get(i + 1), None | Some(b'\r' | b'\n')) {
                    return None;
                }
                i += 2;
                continue;
            }
            b'[' => in_class = true,
            b']' => in_class = false,
            b'/' if !in_class => {
                if i == start {
                    return None;
                }
                let mut end = i + 1;
                while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_')
                {
                    end += 1;
                }
                return Some(end);
            }
            _ => {}
        }
        i += 1;
    }
    None
}
