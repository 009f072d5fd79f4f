//! Logical-to-physical line lookup for diagnostics.

use crate::lines::split_lines;
use crate::sanitize::sanitize_line;
use crate::tokenize::{LineKind, classify_line};

/// Physical line numbers of the token-bearing lines of a file.
///
/// The tokenizer drops blank, comment-only and unrecognized lines, so the
/// position of a token in the stream (its logical index) drifts from the
/// line it came from. This index records, for each logical line, the
/// 1-based physical line number it was read from.
///
/// # Example
///
/// ```
/// use quire::LineIndex;
///
/// let index = LineIndex::build("; title\r\n\r\na = 1\r\n[s]\r\nb = 2", true);
/// assert_eq!(index.physical_line(1), Some(3));
/// assert_eq!(index.physical_line(3), Some(5));
/// assert_eq!(index.physical_line(4), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineIndex {
    /// `lines[n]` is the physical line of logical line `n + 1`
    lines: Vec<usize>,
}

impl LineIndex {
    /// Index `text`, classifying lines exactly as [`tokenize`](crate::tokenize) does.
    pub fn build(text: &str, use_headers: bool) -> Self {
        let lines = split_lines(text)
            .enumerate()
            .filter(|(_, line)| classify_line(sanitize_line(line), use_headers) != LineKind::Other)
            .map(|(i, _)| i + 1)
            .collect();
        LineIndex { lines }
    }

    /// Physical line of a 1-based logical index.
    pub fn physical_line(&self, logical: usize) -> Option<usize> {
        logical
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::tokenize;

    #[test]
    fn test_matches_token_count() {
        let text = "; c\r\na = 1\r\n\r\n[s]\r\nnot a directive\r\nb = 2\r\n";
        for use_headers in [false, true] {
            let index = LineIndex::build(text, use_headers);
            assert_eq!(index.len(), tokenize(text, use_headers).len());
        }
    }

    #[test]
    fn test_headers_only_count_in_header_mode() {
        let text = "[s]\nk = v";
        assert_eq!(LineIndex::build(text, true).physical_line(2), Some(2));
        assert_eq!(LineIndex::build(text, false).physical_line(1), Some(2));
    }

    #[test]
    fn test_out_of_range() {
        let index = LineIndex::build("k = v", false);
        assert_eq!(index.physical_line(0), None);
        assert_eq!(index.physical_line(2), None);
        assert!(LineIndex::build("", false).is_empty());
    }
}
