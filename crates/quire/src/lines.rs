//! Physical line handling shared by the tokenizer, the merger and the generator.

/// Record separator used when writing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\r\n`, the native separator of the format.
    #[default]
    CrLf,
    /// `\n`, kept for files that already use it.
    Lf,
}

impl LineEnding {
    /// Pick the separator to write back into `text`.
    ///
    /// Text containing `\n` but no `\r\n` keeps `\n`; anything else
    /// (including empty text) gets `\r\n`.
    pub fn detect(text: &str) -> Self {
        if text.contains('\n') && !text.contains("\r\n") {
            LineEnding::Lf
        } else {
            LineEnding::CrLf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Split text into physical lines.
///
/// Lines are separated by `\n` and lose one trailing `\r`, so `\r\n` and
/// `\n` files split the same way. Text ending in a separator yields a final
/// empty line, and empty text yields a single empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Join output lines, trim trailing whitespace and end with exactly one separator.
pub(crate) fn finish<S: AsRef<str>>(lines: &[S], ending: LineEnding) -> String {
    let mut text = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            text.push_str(ending.as_str());
        }
        text.push_str(line.as_ref());
    }
    let trimmed_len = text.trim_end().len();
    text.truncate(trimmed_len);
    text.push_str(ending.as_str());
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(LineEnding::detect(""), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("a = 1"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("a = 1\r\nb = 2\n"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("a = 1\nb = 2\n"), LineEnding::Lf);
    }

    #[test]
    fn test_split_lines() {
        let lines: Vec<&str> = split_lines("a\r\nb\nc\r\n").collect();
        assert_eq!(lines, vec!["a", "b", "c", ""]);

        let lines: Vec<&str> = split_lines("").collect();
        assert_eq!(lines, vec![""]);
    }

    #[test]
    fn test_split_keeps_lone_carriage_return() {
        let lines: Vec<&str> = split_lines("a\rb\r\n").collect();
        assert_eq!(lines, vec!["a\rb", ""]);
    }

    #[test]
    fn test_finish_normalizes_tail() {
        assert_eq!(finish(&["a", "b", "", "  "], LineEnding::CrLf), "a\r\nb\r\n");
        assert_eq!(finish(&["a"], LineEnding::Lf), "a\n");
        assert_eq!(finish::<&str>(&[], LineEnding::CrLf), "\r\n");
    }
}
