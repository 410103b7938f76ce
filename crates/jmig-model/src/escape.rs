//! Reversible escaping of delimiters that belong to a field's content.
//!
//! The delimiter is written as `%3b`. A literal `%` that would otherwise be
//! read as the start of `%3b` or `%25` is written as `%25`, so
//! `unescape(&escape(s)) == s` holds for every input.

use crate::value::DELIMITER;

/// Hex token written in place of an internal delimiter.
pub const ESCAPED_DELIMITER: &str = "%3b";

const ESCAPED_PERCENT: &str = "%25";

/// Escapes every delimiter in `content`.
pub fn escape(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 8);
    for (index, ch) in content.char_indices() {
        match ch {
            DELIMITER => out.push_str(ESCAPED_DELIMITER),
            '%' if starts_token(&content[index..]) => out.push_str(ESCAPED_PERCENT),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverses [`escape`]. Text without escape tokens is returned unchanged.
pub fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if is_delimiter_token(tail) {
            out.push(DELIMITER);
            rest = &tail[3..];
        } else if tail.starts_with(ESCAPED_PERCENT) {
            out.push('%');
            rest = &tail[3..];
        } else {
            out.push('%');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Whether `text` begins with `%` followed by a token the decoder would consume.
fn starts_token(text: &str) -> bool {
    is_delimiter_token(text) || text.starts_with(ESCAPED_PERCENT)
}

/// Case-insensitive `%3b` prefix check on bytes, so a multi-byte character
/// after `%` is never sliced.
fn is_delimiter_token(text: &str) -> bool {
    text.as_bytes()
        .get(..3)
        .is_some_and(|head| head.eq_ignore_ascii_case(ESCAPED_DELIMITER.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_delimiters() {
        assert_eq!(escape("Said: hi; bye"), "Said: hi%3b bye");
        assert_eq!(unescape("Said: hi%3b bye"), "Said: hi; bye");
    }

    #[test]
    fn guards_literal_tokens() {
        let original = "50% done; see %3B and %25";
        let escaped = escape(original);
        assert!(!escaped.contains(DELIMITER));
        assert_eq!(escaped, "50% done%3b see %253B and %2525");
        assert_eq!(unescape(&escaped), original);
    }

    #[test]
    fn percent_before_delimiter() {
        for original in ["100%;", "%3;b", "%;25", "%"] {
            assert_eq!(unescape(&escape(original)), original, "{original}");
        }
    }
}
