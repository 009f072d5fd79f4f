//! Error types for INI operations.

use std::path::{Path, PathBuf};

use quire_diagnostics::{DiagnosticMessage, DiagnosticMessageBuilder, SinkError};
use quire_runtime::RuntimeError;
use thiserror::Error;

use crate::locator::LineIndex;

pub type IniResult<T> = Result<T, IniError>;

/// Errors that abort a load, save, create or clear.
///
/// `line` fields produced while aggregating tokens hold logical indices;
/// [`IniError::locate`] turns them into physical line numbers.
#[derive(Debug, Error)]
pub enum IniError {
    #[error("cannot read {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("cannot write {}: {source}", path.display())]
    UnwritableFile {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    #[error("duplicate key `{key}`{} at line {line}", in_section(section))]
    DuplicateKey {
        key: String,
        value: String,
        /// `None` for flat loads.
        section: Option<String>,
        line: usize,
    },

    #[error("duplicate section `[{name}]` at line {line}")]
    DuplicateSection { name: String, line: usize },

    /// A diagnostic could not be delivered and the engine was told to care.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

fn in_section(section: &Option<String>) -> String {
    match section {
        Some(name) => format!(" in section `[{}]`", name),
        None => String::new(),
    }
}

impl IniError {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            IniError::UnreadableFile { .. } => "INI-1",
            IniError::UnwritableFile { .. } => "INI-2",
            IniError::DuplicateKey { .. } => "INI-3",
            IniError::DuplicateSection { .. } => "INI-4",
            IniError::Sink(_) => "INI-7",
        }
    }

    /// Line the error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            IniError::DuplicateKey { line, .. } | IniError::DuplicateSection { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }

    /// Replace a logical index with the physical line it came from.
    pub fn locate(mut self, index: &LineIndex) -> Self {
        if let IniError::DuplicateKey { line, .. } | IniError::DuplicateSection { line, .. } =
            &mut self
            && let Some(physical) = index.physical_line(*line)
        {
            *line = physical;
        }
        self
    }

    /// Convert this error to a DiagnosticMessage with its INI-* code.
    pub fn to_diagnostic(&self, path: Option<&Path>) -> DiagnosticMessage {
        let path_buf = path.map(Path::to_path_buf);
        match self {
            IniError::UnreadableFile { path, source } => {
                DiagnosticMessageBuilder::error("Unreadable INI File")
                    .with_code(self.code())
                    .problem(format!("`{}` can't be read", path.display()))
                    .add_detail(source.to_string())
                    .add_hint("Does the file exist and is it readable?")
                    .build()
            }

            IniError::UnwritableFile { path, source } => {
                DiagnosticMessageBuilder::error("Unwritable INI File")
                    .with_code(self.code())
                    .problem(format!("`{}` can't be written", path.display()))
                    .add_detail(source.to_string())
                    .build()
            }

            IniError::DuplicateKey {
                key,
                value,
                section,
                line,
            } => {
                let mut builder = DiagnosticMessageBuilder::error("Duplicate Key")
                    .with_code(self.code())
                    .problem(format!("`{}` is defined more than once{}", key, in_section(section)))
                    .add_detail(format!("{} = {}", key, value))
                    .add_hint("Remove or rename one of the definitions?");
                if *line > 0 {
                    builder = builder.at_line(path_buf, *line);
                }
                builder.build()
            }

            IniError::DuplicateSection { name, line } => {
                let mut builder = DiagnosticMessageBuilder::error("Duplicate Section")
                    .with_code(self.code())
                    .problem(format!("Section `[{}]` is declared more than once", name))
                    .add_hint("Merge the two sections into one?");
                if name.is_empty() {
                    builder = builder
                        .add_info("`[]` names the same section as the lines before the first header");
                }
                if *line > 0 {
                    builder = builder.at_line(path_buf, *line);
                }
                builder.build()
            }

            IniError::Sink(source) => DiagnosticMessageBuilder::error("Diagnostic Sink Failure")
                .with_code(self.code())
                .problem("A diagnostic could not be reported")
                .add_detail(source.to_string())
                .build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_display() {
        let err = IniError::DuplicateKey {
            key: "k".to_string(),
            value: "2".to_string(),
            section: Some("net".to_string()),
            line: 4,
        };
        assert_eq!(err.to_string(), "duplicate key `k` in section `[net]` at line 4");

        let err = IniError::UnreadableFile {
            path: PathBuf::from("app.ini"),
            source: RuntimeError::from(io::Error::new(io::ErrorKind::NotFound, "gone")),
        };
        assert_eq!(err.to_string(), "cannot read app.ini: I/O error: gone");
    }

    #[test]
    fn test_locate_maps_logical_index() {
        let index = LineIndex::build("; c\r\nk = 1\r\n\r\nk = 2", false);
        let err = IniError::DuplicateKey {
            key: "k".to_string(),
            value: "2".to_string(),
            section: None,
            line: 2,
        }
        .locate(&index);
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_to_diagnostic() {
        let err = IniError::DuplicateSection {
            name: "A".to_string(),
            line: 3,
        };
        let diag = err.to_diagnostic(Some(Path::new("app.ini")));
        assert_eq!(diag.code.as_deref(), Some("INI-4"));
        assert!(diag.is_error());
        assert_eq!(diag.location.unwrap().to_string(), "app.ini:3");
    }
}
