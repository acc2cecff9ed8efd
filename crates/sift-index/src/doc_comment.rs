//! Doc block synopsis extraction.

const TAG_MARKER: &str = "@";
const INLINE_TAG_MARKER: &str = "{@";

/// Extract the free-text part of a `/** ... */` doc block.
///
/// Delimiters and leading `*` markers are stripped, lines are trimmed, and
/// blank lines as well as lines starting with a tag (`@param`) or an inline
/// reference (`{@inheritDoc}`) are dropped. Returns `None` when nothing is
/// left.
#[must_use]
pub fn summarize(doc_block: &str) -> Option<String> {
    let body = doc_block.trim();
    // `/**/` shares its middle `*` between opener and closer.
    if body == "/**/" {
        return None;
    }
    let body = body.strip_prefix("/**").unwrap_or(body);
    let body = body.strip_suffix("*/").unwrap_or(body);

    let lines: Vec<&str> = body
        .lines()
        .map(strip_line_marker)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with(TAG_MARKER) && !line.starts_with(INLINE_TAG_MARKER))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn strip_line_marker(line: &str) -> &str {
    line.trim().trim_start_matches('*').trim()
}
