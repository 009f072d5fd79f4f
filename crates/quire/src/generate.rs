//! Producing INI text from scratch.

use crate::aggregate::SectionedDirectives;
use crate::lines::{LineEnding, finish, split_lines};
use crate::merge::directive_line;

/// Render a complete file: two comment lines, a blank line, then every
/// section in order. The `""` section is written without a header.
///
/// ```
/// use quire::{LineEnding, SectionedDirectives, generate};
///
/// let mut sections = SectionedDirectives::new();
/// sections.entry("db".to_string()).or_default().insert("host".to_string(), "localhost".to_string());
///
/// assert_eq!(
///     generate("My App", "v1", &sections, LineEnding::CrLf),
///     "; My App\r\n; v1\r\n\r\n[db]\r\nhost = localhost\r\n"
/// );
/// assert_eq!(
///     generate("My App", "v1", &SectionedDirectives::new(), LineEnding::CrLf),
///     "; My App\r\n; v1\r\n"
/// );
/// ```
pub fn generate(
    title: &str,
    subtitle: &str,
    sections: &SectionedDirectives,
    ending: LineEnding,
) -> String {
    let mut lines = vec![comment(title), comment(subtitle), String::new()];
    for (name, directives) in sections {
        if !name.is_empty() {
            lines.push(format!("[{}]", name));
        }
        lines.extend(
            directives
                .iter()
                .map(|(key, value)| directive_line(key, value)),
        );
    }
    finish(&lines, ending)
}

fn comment(text: &str) -> String {
    format!("; {}", text).trim_end().to_string()
}

/// Title and subtitle kept by `clear`.
///
/// Each of the first two physical lines is examined on its own: a line
/// that starts with `;` once trimmed yields its trimmed remainder, any other
/// line yields an empty string.
pub fn clear_header(existing: &str) -> (String, String) {
    let mut lines = split_lines(existing).map(|line| {
        line.trim()
            .strip_prefix(';')
            .map(|rest| rest.trim().to_string())
            .unwrap_or_default()
    });
    let title = lines.next().unwrap_or_default();
    let subtitle = lines.next().unwrap_or_default();
    (title, subtitle)
}
