//! Builder API for diagnostic messages.
//!
//! The builder encodes the tidyverse four-part structure directly in the API:
//! title (via `.error()` / `.warning()`), problem, details, hints.

use std::path::PathBuf;

use crate::diagnostic::{
    DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage, SourceLocation,
};

/// Builder for creating diagnostic messages.
///
/// # Example
///
/// ```
/// use quire_diagnostics::DiagnosticMessageBuilder;
///
/// let warning = DiagnosticMessageBuilder::warning("Duplicate setting skipped")
///     .with_code("INI-5")
///     .problem("`k` is assigned more than once")
///     .add_detail("k = 2")
///     .add_hint("Remove the extra assignment?")
///     .at_line(Some("app.ini".into()), 2)
///     .build();
///
/// assert_eq!(warning.code.as_deref(), Some("INI-5"));
/// assert_eq!(warning.details.len(), 1);
/// assert_eq!(warning.location.unwrap().line, 2);
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticMessageBuilder {
    kind: DiagnosticKind,
    title: String,
    code: Option<String>,
    problem: Option<String>,
    details: Vec<DetailItem>,
    hints: Vec<String>,
    location: Option<SourceLocation>,
}

impl DiagnosticMessageBuilder {
    /// Create a new builder with the specified kind and title.
    ///
    /// Most code should use `.error()` or `.warning()` instead.
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            code: None,
            problem: None,
            details: Vec::new(),
            hints: Vec::new(),
            location: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Info, title)
    }

    /// Set the error code (`INI-<number>`).
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the problem statement.
    ///
    /// Should be a single sentence saying what went wrong, using "must" or
    /// "can't" where it fits.
    pub fn problem(mut self, problem: impl Into<String>) -> Self {
        self.problem = Some(problem.into());
        self
    }

    /// Add an error detail (✖ bullet).
    pub fn add_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(DetailItem {
            kind: DetailKind::Error,
            content: detail.into(),
        });
        self
    }

    /// Add an info detail (ℹ bullet).
    pub fn add_info(mut self, info: impl Into<String>) -> Self {
        self.details.push(DetailItem {
            kind: DetailKind::Info,
            content: info.into(),
        });
        self
    }

    /// Add a hint. Hints should end with a question mark.
    pub fn add_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn at_line(self, path: Option<PathBuf>, line: usize) -> Self {
        self.with_location(SourceLocation::new(path, line))
    }

    pub fn build(self) -> DiagnosticMessage {
        DiagnosticMessage {
            code: self.code,
            title: self.title,
            kind: self.kind,
            problem: self.problem,
            details: self.details,
            hints: self.hints,
            location: self.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_kinds() {
        assert_eq!(
            DiagnosticMessageBuilder::error("e").build().kind,
            DiagnosticKind::Error
        );
        assert_eq!(
            DiagnosticMessageBuilder::warning("w").build().kind,
            DiagnosticKind::Warning
        );
        assert_eq!(
            DiagnosticMessageBuilder::info("i").build().kind,
            DiagnosticKind::Info
        );
    }

    #[test]
    fn test_builder_collects_parts_in_order() {
        let msg = DiagnosticMessageBuilder::error("Duplicate section")
            .with_code("INI-4")
            .problem("Section `[a]` is declared twice")
            .add_detail("[a]")
            .add_info("sections must be unique")
            .add_hint("Merge the two sections?")
            .build();

        assert_eq!(msg.title, "Duplicate section");
        assert_eq!(msg.details[0].kind, DetailKind::Error);
        assert_eq!(msg.details[1].kind, DetailKind::Info);
        assert_eq!(msg.hints, vec!["Merge the two sections?".to_string()]);
        assert!(msg.location.is_none());
    }
}
