//! Comment cleaning and module header extraction.

use crate::syntax::CommentGroup;

/// Marker opening a module header comment.
const HEADER_MARKER: &str = "/**";

/// Clean raw comment lines into newline-terminated text.
///
/// Each line is trimmed, loses one leading `#` or (failing that) `//`
/// marker, and is trimmed again.
#[must_use]
pub fn clean<S: AsRef<str>>(lines: &[S]) -> String {
    let mut ret = String::new();

    for line in lines {
        let line = line.as_ref().trim();
        let line = line
            .strip_prefix('#')
            .or_else(|| line.strip_prefix("//"))
            .unwrap_or(line);
        ret.push_str(line.trim());
        ret.push('\n');
    }

    ret
}

/// Extract the module header from a file's first comment group.
///
/// The group must start on line 1 and open with `/**`. The opening and
/// closing lines are dropped; the rest lose their leading `* ` (or `*`).
#[must_use]
pub fn header(group: &CommentGroup) -> String {
    let mut comment = String::new();

    let Some(first) = group.comments.first() else {
        return comment;
    };

    if group.line != 1 {
        return comment;
    }

    let text = first.trim();
    if !text.starts_with(HEADER_MARKER) {
        return comment;
    }

    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 2 {
        return comment;
    }

    for line in &lines[1..lines.len() - 1] {
        let line = line.trim();
        let line = line
            .strip_prefix("* ")
            .or_else(|| line.strip_prefix('*'))
            .unwrap_or(line);
        comment.push_str(line);
        comment.push('\n');
    }

    comment
}
