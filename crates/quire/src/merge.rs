//! Writing desired directives back into existing file text.
//!
//! Lines the merger does not own are copied through byte for byte. Only
//! directive lines whose key is wanted in the active section are rewritten,
//! and only missing keys and sections are added.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use crate::aggregate::{FlatDirectives, SectionedDirectives};
use crate::expand::{VariableExpander, encode_value};
use crate::lines::{LineEnding, finish, split_lines};
use crate::sanitize::sanitize_line;
use crate::tokenize::{LineKind, classify_line};
use crate::warning::IniWarning;

/// New file text plus anything worth telling the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub text: String,
    /// Duplicate on-disk assignments that were dropped, with physical lines.
    pub warnings: Vec<IniWarning>,
}

/// Merge a flat structure; headers in `existing` are left alone as text.
pub fn merge_flat(
    existing: &str,
    desired: &FlatDirectives,
    expander: &VariableExpander,
) -> MergeOutcome {
    let mut sections = SectionedDirectives::new();
    sections.insert(String::new(), desired.clone());
    Merger::new(&sections, false, expander).run(existing)
}

/// Merge a sectioned structure into `existing`.
///
/// # Example
///
/// ```
/// use quire::{SectionedDirectives, VariableExpander, merge_sectioned};
///
/// let mut desired = SectionedDirectives::new();
/// desired.entry("net".to_string()).or_default().insert("port".to_string(), "8080".to_string());
///
/// let outcome = merge_sectioned(
///     "; settings\r\n[net]\r\nport = 80 ; http\r\n",
///     &desired,
///     &VariableExpander::new(""),
/// );
/// assert_eq!(outcome.text, "; settings\r\n[net]\r\nport = 8080\r\n");
/// ```
pub fn merge_sectioned(
    existing: &str,
    desired: &SectionedDirectives,
    expander: &VariableExpander,
) -> MergeOutcome {
    Merger::new(desired, true, expander).run(existing)
}

/// Format a directive line for a key the file does not have yet.
///
/// `=` inside the key is escaped so the line splits where it should when
/// read back, and line breaks are spelled `_ENTER_` on both sides.
pub(crate) fn directive_line(key: &str, value: &str) -> String {
    format!(
        "{} = {}",
        encode_value(&key.replace('=', "\\=")),
        encode_value(value)
    )
}

struct Merger<'a> {
    desired: &'a SectionedDirectives,
    use_headers: bool,
    expander: &'a VariableExpander,
    out: Vec<Cow<'a, str>>,
    current: String,
    written: HashMap<String, HashSet<String>>,
    used: HashSet<String>,
    warnings: Vec<IniWarning>,
}

impl<'a> Merger<'a> {
    fn new(
        desired: &'a SectionedDirectives,
        use_headers: bool,
        expander: &'a VariableExpander,
    ) -> Self {
        Merger {
            desired,
            use_headers,
            expander,
            out: Vec::new(),
            current: String::new(),
            written: HashMap::new(),
            used: HashSet::new(),
            warnings: Vec::new(),
        }
    }

    fn run(mut self, existing: &'a str) -> MergeOutcome {
        for (i, line) in split_lines(existing).enumerate() {
            match classify_line(sanitize_line(line), self.use_headers) {
                LineKind::Directive { key, value } => self.directive(line, key, value, i + 1),
                LineKind::Header(name) => {
                    self.close_section();
                    self.current = name.to_string();
                    self.out.push(Cow::Borrowed(line));
                }
                LineKind::Other => self.out.push(Cow::Borrowed(line)),
            }
        }
        self.trim_trailing_blank_lines();
        self.close_section();
        self.append_unused_sections();

        MergeOutcome {
            text: finish(&self.out, LineEnding::detect(existing)),
            warnings: self.warnings,
        }
    }

    fn directive(&mut self, line: &'a str, key: &'a str, value: &str, physical: usize) {
        let resolved = self.expander.expand(key).text;
        let resolved = resolved.trim();
        let Some(new_value) = self
            .desired
            .get(&self.current)
            .and_then(|wanted| wanted.get(resolved))
        else {
            self.out.push(Cow::Borrowed(line));
            return;
        };

        let written = self.written.entry(self.current.clone()).or_default();
        if written.contains(resolved) {
            self.warnings.push(IniWarning::DuplicateOnDiskAssignment {
                key: key.to_string(),
                value: value.to_string(),
                section: self.use_headers.then(|| self.current.clone()),
                line: physical,
            });
            return;
        }
        written.insert(resolved.to_string());
        self.out
            .push(Cow::Owned(format!("{} = {}", key, encode_value(new_value))));
    }

    /// Append the active section's unwritten keys and mark it used.
    fn close_section(&mut self) {
        let name = std::mem::take(&mut self.current);
        if let Some(wanted) = self.desired.get(&name) {
            let written = self.written.entry(name.clone()).or_default();
            self.out.extend(
                wanted
                    .iter()
                    .filter(|(key, _)| written.insert((*key).clone()))
                    .map(|(key, value)| Cow::Owned(directive_line(key, value))),
            );
        }
        self.used.insert(name);
    }

    fn trim_trailing_blank_lines(&mut self) {
        while self.out.last().is_some_and(|line| line.trim().is_empty()) {
            self.out.pop();
        }
    }

    fn append_unused_sections(&mut self) {
        for (name, directives) in self.desired {
            if self.used.contains(name) {
                continue;
            }
            self.trim_trailing_blank_lines();
            if !self.out.is_empty() {
                self.out.push(Cow::Borrowed(""));
            }
            self.out.push(Cow::Owned(format!("[{}]", name)));
            for (key, value) in directives {
                self.out.push(Cow::Owned(directive_line(key, value)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn expander() -> VariableExpander {
        VariableExpander::new("/base")
    }

    fn flat(pairs: &[(&str, &str)]) -> FlatDirectives {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sections(entries: &[(&str, &[(&str, &str)])]) -> SectionedDirectives {
        entries
            .iter()
            .map(|(name, pairs)| (name.to_string(), flat(pairs)))
            .collect()
    }

    #[test]
    fn test_rewrites_value_and_keeps_everything_else() {
        let existing = "; My app\r\n\r\nname = old ; note\r\n# other\r\nstray\r\nport = 80\r\n";
        let outcome = merge_flat(existing, &flat(&[("name", "new")]), &expander());
        assert_eq!(
            outcome.text,
            "; My app\r\n\r\nname = new\r\n# other\r\nstray\r\nport = 80\r\n"
        );
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_on_disk_assignment_is_dropped() {
        let outcome = merge_flat("k = 1\r\nk = 2", &flat(&[("k", "9")]), &expander());
        assert_eq!(outcome.text, "k = 9\r\n");
        assert_eq!(
            outcome.warnings,
            vec![IniWarning::DuplicateOnDiskAssignment {
                key: "k".to_string(),
                value: "2".to_string(),
                section: None,
                line: 2,
            }]
        );
    }

    #[test]
    fn test_missing_keys_go_after_final_line() {
        let existing = "; head\r\na = 1\r\n\r\n; tail comment\r\n\r\n";
        let outcome = merge_flat(existing, &flat(&[("b", "2"), ("a", "1")]), &expander());
        assert_eq!(outcome.text, "; head\r\na = 1\r\n\r\n; tail comment\r\nb = 2\r\n");
    }

    #[test]
    fn test_missing_keys_go_before_next_header() {
        let existing = "[A]\r\nk = 1\r\n; end of A\r\n[B]\r\nj = 2\r\n";
        let desired = sections(&[("A", &[("k", "1"), ("new", "x")])]);
        let outcome = merge_sectioned(existing, &desired, &expander());
        assert_eq!(
            outcome.text,
            "[A]\r\nk = 1\r\n; end of A\r\nnew = x\r\n[B]\r\nj = 2\r\n"
        );
    }

    #[test]
    fn test_line_breaks_in_values_stay_on_one_line() {
        let outcome = merge_flat(
            "k = old\r\n",
            &flat(&[("k", "a\r\nb"), ("x\ny", "c\nd")]),
            &expander(),
        );
        assert_eq!(outcome.text, "k = a_ENTER_b\r\nx_ENTER_y = c_ENTER_d\r\n");
    }

    #[test]
    fn test_into_empty_text() {
        let outcome = merge_flat("", &flat(&[("a", "1"), ("b", "2")]), &expander());
        assert_eq!(outcome.text, "a = 1\r\nb = 2\r\n");

        let outcome = merge_sectioned("", &sections(&[("A", &[("k", "v")])]), &expander());
        assert_eq!(outcome.text, "[A]\r\nk = v\r\n");
    }

    #[test]
    fn test_matches_on_resolved_key() {
        let outcome = merge_flat("path_SPACE_ = x\r\n", &flat(&[("path", "y")]), &expander());
        assert_eq!(outcome.text, "path_SPACE_ = y\r\n");
    }

    #[test]
    fn test_keys_with_equals_are_escaped() {
        let outcome = merge_flat("", &flat(&[("a=b", "c")]), &expander());
        assert_eq!(outcome.text, "a\\=b = c\r\n");

        let again = merge_flat(&outcome.text, &flat(&[("a=b", "c")]), &expander());
        assert_eq!(again.text, outcome.text);
    }

    #[test]
    fn test_flat_treats_headers_as_text() {
        let outcome = merge_flat("[A]\r\nk = 1\r\n", &flat(&[("k", "2"), ("j", "3")]), &expander());
        assert_eq!(outcome.text, "[A]\r\nk = 2\r\nj = 3\r\n");
    }

    #[test]
    fn test_sectioned_update_insert_and_append() {
        let existing = "; config\r\n[A]\r\nk = 1\r\n\r\n[B]\r\n; nothing yet\r\n";
        let desired = sections(&[
            ("A", &[("k", "2"), ("new", "x")]),
            ("B", &[("b", "1")]),
            ("C", &[("c", "3")]),
        ]);
        let outcome = merge_sectioned(existing, &desired, &expander());
        assert_eq!(
            outcome.text,
            "; config\r\n[A]\r\nk = 2\r\n\r\nnew = x\r\n[B]\r\n; nothing yet\r\nb = 1\r\n\r\n[C]\r\nc = 3\r\n"
        );
    }

    #[test]
    fn test_untouched_sections_survive() {
        let existing = "[A]\r\nk = 1\r\n[B]\r\nj = 2\r\n";
        let outcome = merge_sectioned(existing, &sections(&[("B", &[("j", "3")])]), &expander());
        assert_eq!(outcome.text, "[A]\r\nk = 1\r\n[B]\r\nj = 3\r\n");
    }

    #[test]
    fn test_same_key_in_other_section_is_not_touched() {
        let existing = "[A]\r\nk = 1\r\n[B]\r\nk = 1\r\n";
        let outcome = merge_sectioned(existing, &sections(&[("B", &[("k", "2")])]), &expander());
        assert_eq!(outcome.text, "[A]\r\nk = 1\r\n[B]\r\nk = 2\r\n");
    }

    #[test]
    fn test_leading_section_inserts_before_first_header() {
        let existing = "; title\r\n; sub\r\n\r\n[A]\r\nk = 1\r\n";
        let outcome = merge_sectioned(existing, &sections(&[("", &[("top", "1")])]), &expander());
        assert_eq!(outcome.text, "; title\r\n; sub\r\n\r\ntop = 1\r\n[A]\r\nk = 1\r\n");
    }

    #[test]
    fn test_repeated_header_tracks_written_keys() {
        let existing = "[A]\r\nk = 1\r\n[B]\r\n[A]\r\nk = 2\r\n";
        let outcome = merge_sectioned(existing, &sections(&[("A", &[("k", "9")])]), &expander());
        assert_eq!(outcome.text, "[A]\r\nk = 9\r\n[B]\r\n[A]\r\n");
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].line(), 5);
    }

    #[test]
    fn test_keeps_lf_files_lf() {
        let outcome = merge_flat("a = 1\nb = 2\n", &flat(&[("b", "3")]), &expander());
        assert_eq!(outcome.text, "a = 1\nb = 3\n");
    }

    #[test]
    fn test_idempotent() {
        let existing = "; c\r\n[A]\r\nx = 1\r\n";
        let desired = sections(&[("A", &[("x", "2"), ("y", "3")]), ("Z", &[("z", "4")])]);
        let once = merge_sectioned(existing, &desired, &expander()).text;
        let twice = merge_sectioned(&once, &desired, &expander()).text;
        assert_eq!(once, twice);
    }
}
