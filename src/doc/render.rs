//! Width-constrained serialization of a doclet.

use super::{DocTag, SourceDoc, TagShape};
use crate::{
    breaks::{self, LINE_BREAK_RE, pad, split_lines},
    comment::strip_indent,
    wrap::indent_wrap,
};

pub(super) fn render(doc: &SourceDoc, max: usize) -> String {
    let indent = doc.indent;
    let mut out = vec!["/**".to_owned()];

    for tag in &doc.tags {
        match &tag.shape {
            TagShape::Description => {
                out.extend(indent_wrap(indent, " * ", &tag.text, Some(max)));
            }
            TagShape::Blank => out.push(pad(indent, " *")),
            TagShape::Orphan => out.extend(indent_wrap(indent, " * ", &tag.text, None)),
            TagShape::Named(_) if tag.is_example() => {
                out.push(pad(indent, " * @example"));
                out.extend(indent_wrap(indent, " * ", &tag.text, None));
            }
            TagShape::Named(kind) => render_named(&mut out, tag, kind, indent, max),
        }
    }

    out.push(pad(indent, " */"));
    tracing::trace!(tags = doc.tags.len(), lines = out.len(), "rendered doclet");
    out.join(&doc.line_break)
}

fn render_named(out: &mut Vec<String>, tag: &DocTag, kind: &str, indent: usize, max: usize) {
    let mut head = format!(" * @{kind}");
    for part in [&tag.tag_type, &tag.tag_argument].into_iter().flatten() {
        head.push(' ');
        head.push_str(part);
    }

    if tag.text.is_empty() {
        out.push(pad(indent, &head));
        return;
    }

    if !LINE_BREAK_RE.is_match(&tag.text) {
        let inline = pad(indent, &format!("{head} {}", tag.text));
        if breaks::width(&inline) <= max {
            out.push(inline);
            return;
        }
    }

    out.push(pad(indent, &head));
    let hanging = if tag.tag_argument.is_some() {
        kind.len() + 2
    } else {
        0
    };
    let prefix = pad(hanging, "");
    // Body lines read back from this layout still carry the hanging padding.
    let body = split_lines(&tag.text)
        .into_iter()
        .map(|line| strip_indent(line, hanging))
        .collect::<Vec<_>>()
        .join("\n");
    out.extend(indent_wrap(indent, &format!(" * {prefix}"), &body, Some(max)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breaks::split_lines;

    fn doc(raw: &str) -> SourceDoc {
        SourceDoc::new(raw, "\n", 0)
    }

    const ADDS: &str = "/**\n * Adds two numbers.\n *\n * @param {number} a The first.\n * @param {number} b The second.\n * @return {number} The sum.\n */";

    #[test]
    fn canonical_doclet_renders_unchanged() {
        assert_eq!(doc(ADDS).render(Some(80)), ADDS);
    }

    #[test]
    fn single_line_doclet_expands() {
        assert_eq!(
            doc("/** Short text. */").render(Some(80)),
            "/**\n * Short text.\n */"
        );
    }

    #[test]
    fn long_parameter_body_moves_below_header() {
        let raw = "/**\n * @param {string} name The name of the thing that is being configured.\n */";
        let out = doc(raw).render(Some(40));
        assert_eq!(
            out,
            "/**\n * @param {string} name\n *        The name of the thing that is\n *        being configured.\n */"
        );
        assert_eq!(doc(&out).render(Some(40)), out);
    }

    #[test]
    fn body_without_argument_uses_plain_prefix() {
        let raw = "/**\n * @deprecated Use the other function instead of this one.\n */";
        let out = doc(raw).render(Some(30));
        assert_eq!(
            out,
            "/**\n * @deprecated\n * Use the other function\n * instead of this one.\n */"
        );
    }

    #[test]
    fn fenced_parameter_body_keeps_its_column() {
        let raw = "/**\n * @param x the value\n * ```js\n * someVeryLongFunctionName(withArguments);\n * ```\n */";
        let once = doc(raw).render(Some(30));
        assert_eq!(
            once,
            "/**\n * @param x\n *        the value\n *        ```js\n *        someVeryLongFunctionName(withArguments);\n *        ```\n */"
        );
        let twice = doc(&once).render(Some(30));
        assert_eq!(twice, once);
        assert_eq!(doc(&twice).render(Some(30)), once);
    }

    #[test]
    fn parameter_paragraphs_are_stable() {
        let raw = "/**\n * @param {string} name First paragraph of text that wraps.\n *\n * Second paragraph after a blank line.\n */";
        let once = doc(raw).render(Some(32));
        assert_eq!(doc(&once).render(Some(32)), once);
        assert_eq!(doc(&once).tags()[0].text.split_whitespace().count(), 12);
    }

    #[test]
    fn example_body_stays_verbatim() {
        let raw = "/**\n * @example\n *     const   veryLongName = compute(alpha, beta, gamma, delta);\n *\n *     use(veryLongName);\n */";
        let out = doc(raw).render(Some(30));
        assert_eq!(out, raw);
        let parsed = doc(raw);
        let tag = &parsed.tags()[0];
        assert_eq!(split_lines(&tag.text).len(), 3);
    }

    #[test]
    fn indent_is_applied_to_every_generated_line() {
        let raw = "/**\n     * Text.\n     * @private\n     */";
        let out = SourceDoc::new(raw, "\n", 4).render(Some(80));
        assert_eq!(out, raw);
    }

    #[test]
    fn uses_document_line_break() {
        let raw = "/**\r\n * Text.\r\n */";
        assert_eq!(SourceDoc::new(raw, "\r\n", 0).render(Some(80)), raw);
    }
}
