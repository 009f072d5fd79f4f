//! Line tokenizer.
//!
//! Turns file text into an ordered stream of [`Token`]s, one per logical
//! line. Blank, comment-only and unrecognized lines produce nothing.

use crate::lines::split_lines;
use crate::sanitize::sanitize_line;

/// A raw `key = value` pair, trimmed but not yet expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    pub value: String,
}

impl Directive {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Directive(Directive),
    SectionHeader(String),
}

/// How a sanitized line is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    Directive { key: &'a str, value: &'a str },
    Header(&'a str),
    Other,
}

/// Classify an already sanitized line.
///
/// Directive detection runs first, so a line such as `[a] = b` is a
/// directive even in header mode.
pub(crate) fn classify_line(sanitized: &str, use_headers: bool) -> LineKind<'_> {
    if let Some(eq) = find_unescaped_equals(sanitized) {
        return LineKind::Directive {
            key: sanitized[..eq].trim(),
            value: sanitized[eq + 1..].trim(),
        };
    }
    if use_headers {
        if let Some(name) = header_name(sanitized) {
            return LineKind::Header(name);
        }
    }
    LineKind::Other
}

/// Byte offset of the first `=` preceded by an even run of backslashes.
pub(crate) fn find_unescaped_equals(line: &str) -> Option<usize> {
    let mut backslashes = 0usize;
    for (i, b) in line.bytes().enumerate() {
        match b {
            b'\\' => backslashes += 1,
            b'=' if backslashes % 2 == 0 => return Some(i),
            _ => backslashes = 0,
        }
    }
    None
}

/// Text between the leading `[` and the last `]`, if the line is a header.
fn header_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let close = rest.rfind(']')?;
    Some(&rest[..close])
}

/// Tokenize file text.
///
/// # Example
///
/// ```rust
/// use quire::{tokenize, Directive, Token};
///
/// let tokens = tokenize("[net]\r\nport = 80 ; http\r\n", true);
/// assert_eq!(
///     tokens,
///     vec![
///         Token::SectionHeader("net".to_string()),
///         Token::Directive(Directive::new("port", "80")),
///     ]
/// );
/// ```
pub fn tokenize(text: &str, use_headers: bool) -> Vec<Token> {
    split_lines(text)
        .filter_map(|line| match classify_line(sanitize_line(line), use_headers) {
            LineKind::Directive { key, value } => Some(Token::Directive(Directive::new(key, value))),
            LineKind::Header(name) => Some(Token::SectionHeader(name.to_string())),
            LineKind::Other => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn directive(key: &str, value: &str) -> Token {
        Token::Directive(Directive::new(key, value))
    }

    #[test]
    fn test_splits_on_first_equals() {
        assert_eq!(tokenize("a = b = c", false), vec![directive("a", "b = c")]);
    }

    #[test]
    fn test_escaped_equals_is_not_a_delimiter() {
        assert_eq!(tokenize(r"k\=x = v", false), vec![directive(r"k\=x", "v")]);
        // An even run of backslashes escapes itself, not the `=`.
        assert_eq!(tokenize(r"k\\= v", false), vec![directive(r"k\\", "v")]);
        assert_eq!(tokenize(r"only\=escaped", false), vec![]);
    }

    #[test]
    fn test_comments_and_blanks_produce_nothing() {
        let text = "; title\r\n\r\n# note\r\n   \r\nstray text\r\n";
        assert!(tokenize(text, true).is_empty());
    }

    #[test]
    fn test_comment_hides_equals() {
        assert_eq!(tokenize("; a = b", false), vec![]);
        assert_eq!(tokenize(r"a = b\; c = d", false), vec![directive("a", r"b\; c = d")]);
    }

    #[test]
    fn test_headers_only_in_header_mode() {
        let text = "[A]\r\nk1 = v1\r\n[B]\r\nk2 = v2";
        assert_eq!(
            tokenize(text, true),
            vec![
                Token::SectionHeader("A".to_string()),
                directive("k1", "v1"),
                Token::SectionHeader("B".to_string()),
                directive("k2", "v2"),
            ]
        );
        assert_eq!(
            tokenize(text, false),
            vec![directive("k1", "v1"), directive("k2", "v2")]
        );
    }

    #[test]
    fn test_header_shapes() {
        assert_eq!(
            tokenize("[a [b] c] trailing", true),
            vec![Token::SectionHeader("a [b] c".to_string())]
        );
        assert_eq!(
            tokenize("[]", true),
            vec![Token::SectionHeader(String::new())]
        );
        assert_eq!(tokenize("[unclosed", true), vec![]);
        assert_eq!(tokenize("  [indented]", true), vec![]);
        assert_eq!(
            tokenize("[main] ; the main one", true),
            vec![Token::SectionHeader("main".to_string())]
        );
    }

    #[test]
    fn test_directive_beats_header() {
        assert_eq!(tokenize("[a] = b", true), vec![directive("[a]", "b")]);
    }

    #[test]
    fn test_lf_only_text() {
        assert_eq!(
            tokenize("a = 1\nb = 2\n", false),
            vec![directive("a", "1"), directive("b", "2")]
        );
    }

    #[test]
    fn test_empty_key_and_value() {
        assert_eq!(tokenize(" = ", false), vec![directive("", "")]);
    }
}
