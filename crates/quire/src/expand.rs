//! Value expansion: static variables, the repeat macro and `\=` escapes.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

/// Upper bound on the length of a repeat-macro expansion, in bytes.
pub const MAX_EXPANDED_LEN: usize = 1 << 20;

/// Why a repeat macro was left unexpanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroWarning {
    /// The repeat count does not fit in a `usize`.
    CountOverflow { digits: String },
    /// Expanding would produce more than [`MAX_EXPANDED_LEN`] bytes.
    TooLarge { count: usize, len: usize },
}

impl fmt::Display for MacroWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacroWarning::CountOverflow { digits } => {
                write!(f, "repeat count `{}` is too large to parse", digits)
            }
            MacroWarning::TooLarge { count, len } => write!(
                f,
                "repeating {} bytes {} times exceeds the {} byte limit",
                len, count, MAX_EXPANDED_LEN
            ),
        }
    }
}

/// Result of expanding one key or value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub text: String,
    /// Set when a repeat macro could not be honored.
    pub warning: Option<MacroWarning>,
}

/// Resolves the small macro language used in keys and values.
///
/// Steps, in order:
/// 1. `_TAB_`, `_SPACE_`, `_ENTER_` and `_BASEDIR_` are replaced.
/// 2. `(*N)` repeats the rest of the text N times. Every macro pattern is
///    removed; the count comes from the first one, and `(*)` counts as 0.
/// 3. `\=` becomes `=`.
///
/// ```rust
/// use quire::VariableExpander;
///
/// let expander = VariableExpander::new("/srv/app");
/// assert_eq!(expander.expand("ab(*3)").text, "ababab");
/// assert_eq!(expander.expand("_BASEDIR_/logs").text, "/srv/app/logs");
/// assert_eq!(expander.expand(r"a\=b").text, "a=b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableExpander {
    base_dir: String,
}

impl VariableExpander {
    pub fn new(base_dir: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    pub fn expand(&self, raw: &str) -> Expansion {
        let mut text = raw
            .replace("_TAB_", "\t")
            .replace("_SPACE_", " ")
            .replace("_ENTER_", "\r\n")
            .replace("_BASEDIR_", &self.base_dir);

        let mut warning = None;
        let spans = repeat_macros(&text);
        if let Some(first) = spans.first() {
            match repeat(&text, &spans, &text[first.digits.clone()]) {
                Ok(expanded) => text = expanded,
                Err(w) => warning = Some(w),
            }
        }

        Expansion {
            text: text.replace("\\=", "="),
            warning,
        }
    }
}

/// Spell a value so it stays on one physical line when written.
///
/// `\r\n` and lone `\r` or `\n` all become `_ENTER_`, which expands back
/// to `\r\n` on the next load.
///
/// ```rust
/// use quire::{VariableExpander, encode_value};
///
/// assert_eq!(encode_value("a\r\nb"), "a_ENTER_b");
/// assert_eq!(VariableExpander::new("").expand(&encode_value("a\r\nb")).text, "a\r\nb");
/// ```
pub fn encode_value(value: &str) -> Cow<'_, str> {
    if !value.contains(['\r', '\n']) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(value.replace("\r\n", "_ENTER_").replace(['\r', '\n'], "_ENTER_"))
}

/// One `(*N)` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MacroSpan {
    whole: Range<usize>,
    digits: Range<usize>,
}

/// Non-overlapping `(*digits)` patterns, left to right.
fn repeat_macros(text: &str) -> Vec<MacroSpan> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut from = 0;
    while let Some(rel) = text[from..].find("(*") {
        let open = from + rel;
        let digits_start = open + 2;
        let digits_len = bytes[digits_start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        let close = digits_start + digits_len;
        if bytes.get(close) == Some(&b')') {
            spans.push(MacroSpan {
                whole: open..close + 1,
                digits: digits_start..close,
            });
            from = close + 1;
        } else {
            from = open + 1;
        }
    }
    spans
}

fn repeat(text: &str, spans: &[MacroSpan], digits: &str) -> Result<String, MacroWarning> {
    let count = if digits.is_empty() {
        0
    } else {
        digits
            .parse::<usize>()
            .map_err(|_| MacroWarning::CountOverflow {
                digits: digits.to_string(),
            })?
    };

    let mut rest = String::with_capacity(text.len());
    let mut last = 0;
    for span in spans {
        rest.push_str(&text[last..span.whole.start]);
        last = span.whole.end;
    }
    rest.push_str(&text[last..]);

    match rest.len().checked_mul(count) {
        Some(total) if total <= MAX_EXPANDED_LEN => Ok(rest.repeat(count)),
        _ => Err(MacroWarning::TooLarge {
            count,
            len: rest.len(),
        }),
    }
}
