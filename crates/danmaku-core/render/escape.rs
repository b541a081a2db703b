//! Comment text escaping for ASS dialogue lines
//!
//! Backslashes and braces would otherwise start override tags, and ASS
//! renderers trim leading and trailing spaces. Each run of edge spaces is
//! replaced with the same number of figure spaces (U+2007) so indentation
//! survives, and an empty line becomes a single space so it still takes up
//! a line.
//!
//! The space substitution is lossy. [`unescape_text`] turns figure spaces
//! back into plain spaces, so figure spaces in the source come back as
//! plain spaces as well.

/// Placeholder for a leading or trailing space
pub const SPACE_PLACEHOLDER: char = '\u{2007}';

/// Placeholder for an empty line
pub const EMPTY_LINE_PLACEHOLDER: &str = " ";

/// ASS hard line break
pub const LINE_BREAK: &str = "\\N";

/// Escape comment text for use as the text field of a dialogue line
///
/// # Example
///
/// ```rust
/// # use danmaku_core::render::escape_text;
/// assert_eq!(escape_text("{a}\\b"), "\\{a\\}\\\\b");
/// assert_eq!(escape_text("one\n\ntwo"), "one\\N \\Ntwo");
/// ```
#[must_use]
pub fn escape_text(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('{', "\\{")
        .replace('}', "\\}");

    let mut out = String::with_capacity(escaped.len());
    for (index, line) in escaped.split('\n').enumerate() {
        if index > 0 {
            out.push_str(LINE_BREAK);
        }
        if line.is_empty() {
            out.push_str(EMPTY_LINE_PLACEHOLDER);
        } else {
            push_with_edge_placeholders(&mut out, line);
        }
    }
    out
}

/// Swap leading and trailing space runs of `line` for placeholders
///
/// A line made only of spaces counts its run both as leading and as
/// trailing, so it comes out twice as wide.
fn push_with_edge_placeholders(out: &mut String, line: &str) {
    let trimmed = line.trim_matches(' ');
    if trimmed.len() == line.len() {
        out.push_str(line);
        return;
    }
    let leading = line.len() - line.trim_start_matches(' ').len();
    let trailing = line.len() - line.trim_end_matches(' ').len();
    out.extend(core::iter::repeat(SPACE_PLACEHOLDER).take(leading));
    out.push_str(trimmed);
    out.extend(core::iter::repeat(SPACE_PLACEHOLDER).take(trailing));
}

/// Reverse [`escape_text`] as far as possible
///
/// Restores backslashes, braces and line breaks exactly. Figure spaces
/// become plain spaces and a line holding only the empty-line placeholder
/// becomes an empty line.
#[must_use]
pub fn unescape_text(escaped: &str) -> String {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = escaped.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('N') => lines.push(core::mem::take(&mut current)),
                Some(next @ ('\\' | '{' | '}')) => current.push(next),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            SPACE_PLACEHOLDER => current.push(' '),
            other => current.push(other),
        }
    }
    lines.push(current);

    lines
        .into_iter()
        .map(|line| {
            if line == EMPTY_LINE_PLACEHOLDER {
                String::new()
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
