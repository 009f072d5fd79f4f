//! Core diagnostic message types.
//!
//! This module defines the structures for representing diagnostic messages
//! (errors and warnings) following tidyverse-style guidelines: a short title,
//! a problem statement, bulleted details and optional hints.

use std::fmt::{self, Write};
use std::path::PathBuf;

/// The kind of diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// An error that prevents completion
    Error,
    /// A warning that doesn't prevent completion but indicates a problem
    Warning,
    /// Informational message
    Info,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Error => "Error",
            DiagnosticKind::Warning => "Warning",
            DiagnosticKind::Info => "Info",
        }
    }
}

/// How detail items should be presented (tidyverse x/i bullet style).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    /// Error detail (✖ bullet in tidyverse style)
    Error,
    /// Info detail (i bullet in tidyverse style)
    Info,
}

/// A detail item in a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailItem {
    pub kind: DetailKind,
    pub content: String,
}

/// Where in a source file a diagnostic applies.
///
/// INI diagnostics are line-oriented, so a 1-based physical line number is
/// all the position information carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// File the line belongs to, when the text came from a file.
    pub path: Option<PathBuf>,
    /// 1-based physical line number.
    pub line: usize,
}

impl SourceLocation {
    pub fn new(path: Option<PathBuf>, line: usize) -> Self {
        Self { path, line }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}:{}", path.display(), self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}

/// A diagnostic message following tidyverse-style structure.
///
/// Structure:
/// 1. **Code**: Optional error code (e.g., "INI-3") for searchability
/// 2. **Title**: Brief error message
/// 3. **Kind**: Error, Warning, Info
/// 4. **Problem**: What went wrong
/// 5. **Details**: Specific information (bulleted)
/// 6. **Hints**: Optional guidance for fixing (ends with ?)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    /// Optional error code (e.g., "INI-3")
    pub code: Option<String>,

    /// Brief title for the error
    pub title: String,

    /// The kind of diagnostic (Error, Warning, Info)
    pub kind: DiagnosticKind,

    /// The problem statement (the "what")
    pub problem: Option<String>,

    /// Specific error details (the "where/why")
    pub details: Vec<DetailItem>,

    /// Optional hints for fixing (ends with ?)
    pub hints: Vec<String>,

    /// Source location for this diagnostic
    pub location: Option<SourceLocation>,
}

impl DiagnosticMessage {
    /// Create a new diagnostic message with just a title and kind.
    ///
    /// Note: Consider using [`DiagnosticMessageBuilder`](crate::DiagnosticMessageBuilder) instead.
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            code: None,
            title: title.into(),
            kind,
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

    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }

    /// Render the message as plain text in tidyverse style.
    ///
    /// ```text
    /// Warning [INI-5]: Duplicate setting skipped
    ///   at app.ini:4
    /// `retries` is assigned more than once in section `[net]`
    /// ✖ retries = 5
    /// ? Remove the extra assignment?
    /// ```
    pub fn to_text(&self) -> String {
        let mut result = String::new();

        match &self.code {
            Some(code) => {
                let _ = writeln!(result, "{} [{}]: {}", self.kind.as_str(), code, self.title);
            }
            None => {
                let _ = writeln!(result, "{}: {}", self.kind.as_str(), self.title);
            }
        }

        if let Some(location) = &self.location {
            let _ = writeln!(result, "  at {}", location);
        }

        if let Some(problem) = &self.problem {
            let _ = writeln!(result, "{}", problem);
        }

        for detail in &self.details {
            let bullet = match detail.kind {
                DetailKind::Error => "✖",
                DetailKind::Info => "ℹ",
            };
            let _ = writeln!(result, "{} {}", bullet, detail.content);
        }

        for hint in &self.hints {
            let _ = writeln!(result, "? {}", hint);
        }

        result
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_text().trim_end())
    }
}
