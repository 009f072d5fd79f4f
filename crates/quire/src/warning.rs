//! Recoverable anomalies.
//!
//! Load is strict and save is lenient: problems that do not stop an
//! operation are collected as [`IniWarning`]s and reported through the
//! diagnostic sink instead of failing.

use std::path::Path;

use quire_diagnostics::{DiagnosticMessage, DiagnosticMessageBuilder};

use crate::expand::MacroWarning;
use crate::locator::LineIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniWarning {
    /// A key assigned more than once on disk during a save; the later
    /// assignment was dropped. `line` is always physical.
    DuplicateOnDiskAssignment {
        key: String,
        value: String,
        section: Option<String>,
        line: usize,
    },

    /// A repeat macro that was left unexpanded. `line` is logical until
    /// [`IniWarning::locate`] is applied.
    MalformedMacro {
        key: String,
        value: String,
        reason: MacroWarning,
        line: usize,
    },
}

impl IniWarning {
    pub fn code(&self) -> &'static str {
        match self {
            IniWarning::DuplicateOnDiskAssignment { .. } => "INI-5",
            IniWarning::MalformedMacro { .. } => "INI-6",
        }
    }

    pub fn line(&self) -> usize {
        match self {
            IniWarning::DuplicateOnDiskAssignment { line, .. }
            | IniWarning::MalformedMacro { line, .. } => *line,
        }
    }

    pub fn locate(mut self, index: &LineIndex) -> Self {
        if let IniWarning::MalformedMacro { line, .. } = &mut self
            && let Some(physical) = index.physical_line(*line)
        {
            *line = physical;
        }
        self
    }

    pub fn to_diagnostic(&self, path: Option<&Path>) -> DiagnosticMessage {
        let path = path.map(Path::to_path_buf);
        match self {
            IniWarning::DuplicateOnDiskAssignment {
                key,
                value,
                section,
                line,
            } => {
                let mut builder = DiagnosticMessageBuilder::warning("Duplicate Setting Skipped")
                    .with_code(self.code())
                    .problem(format!("`{}` is assigned more than once", key))
                    .add_detail(format!("{} = {}", key, value))
                    .add_info("Only the first assignment was updated; this one was removed");
                if let Some(name) = section.as_deref().filter(|s| !s.is_empty()) {
                    builder = builder.add_info(format!("In section `[{}]`", name));
                }
                builder.at_line(path, *line).build()
            }

            IniWarning::MalformedMacro {
                key,
                value,
                reason,
                line,
            } => DiagnosticMessageBuilder::warning("Repeat Macro Not Expanded")
                .with_code(self.code())
                .problem(reason.to_string())
                .add_detail(format!("{} = {}", key, value))
                .add_hint("Use a smaller repeat count?")
                .at_line(path, *line)
                .build(),
        }
    }
}
