/*
 * engine.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The [`Ini`] facade: file boundaries, options and diagnostics around the
//! text-level pipeline.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use quire_diagnostics::DiagnosticSink;
use quire_runtime::{RuntimeError, SystemRuntime};
use tracing::debug;

use crate::aggregate::{Aggregator, FlatDirectives, SectionedDirectives};
use crate::error::{IniError, IniResult};
use crate::expand::VariableExpander;
use crate::generate::{clear_header, generate};
use crate::lines::LineEnding;
use crate::locator::LineIndex;
use crate::merge::{MergeOutcome, merge_flat, merge_sectioned};
use crate::tokenize::{Token, tokenize};
use crate::warning::IniWarning;

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniOptions {
    /// Value of `_BASEDIR_`. `None` uses the runtime's current directory.
    pub base_dir: Option<PathBuf>,
    /// Fail with [`IniError::Sink`] when the diagnostic sink rejects a
    /// message, instead of only logging it.
    pub fail_on_sink_error: bool,
}

/// Reads, merges and writes INI files through a [`SystemRuntime`].
///
/// # Example
///
/// ```
/// use quire::Ini;
/// use quire_runtime::MemoryRuntime;
///
/// let runtime = MemoryRuntime::new();
/// runtime.add_file("/work/app.ini", "; My app\r\nname = old\r\n");
///
/// let ini = Ini::new(&runtime);
/// let mut values = ini.load("/work/app.ini").unwrap();
/// values.insert("name".to_string(), "new".to_string());
/// ini.save("/work/app.ini", &values).unwrap();
///
/// assert_eq!(
///     runtime.contents("/work/app.ini").unwrap(),
///     "; My app\r\nname = new\r\n"
/// );
/// ```
pub struct Ini<R: SystemRuntime> {
    runtime: R,
    sink: Option<Arc<dyn DiagnosticSink>>,
    options: IniOptions,
}

impl<R: SystemRuntime> Ini<R> {
    pub fn new(runtime: R) -> Self {
        Self::with_options(runtime, IniOptions::default())
    }

    pub fn with_options(runtime: R, options: IniOptions) -> Self {
        Self {
            runtime,
            sink: None,
            options,
        }
    }

    /// Report diagnostics to `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn options(&self) -> &IniOptions {
        &self.options
    }

    /// Load a file without section headers.
    pub fn load(&self, path: impl AsRef<Path>) -> IniResult<FlatDirectives> {
        let path = path.as_ref();
        let text = self.read(path)?;
        let directives = self.parse(&text, false, Some(path), |a, tokens| a.to_flat(tokens))?;
        debug!(path = %path.display(), directives = directives.len(), "Loaded INI file");
        Ok(directives)
    }

    /// Load a file, grouping directives under their `[section]` headers.
    pub fn load_with_headers(&self, path: impl AsRef<Path>) -> IniResult<SectionedDirectives> {
        let path = path.as_ref();
        let text = self.read(path)?;
        let sections = self.parse(&text, true, Some(path), |a, tokens| {
            a.to_sectioned(tokens)
        })?;
        debug!(path = %path.display(), sections = sections.len(), "Loaded INI file");
        Ok(sections)
    }

    /// Write `desired` into the file, keeping everything it does not name.
    pub fn save(&self, path: impl AsRef<Path>, desired: &FlatDirectives) -> IniResult<()> {
        let path = path.as_ref();
        let existing = self.read_or_empty(path)?;
        let outcome = merge_flat(&existing, desired, &self.expander());
        self.write_merged(path, outcome)
    }

    pub fn save_with_headers(
        &self,
        path: impl AsRef<Path>,
        desired: &SectionedDirectives,
    ) -> IniResult<()> {
        let path = path.as_ref();
        let existing = self.read_or_empty(path)?;
        let outcome = merge_sectioned(&existing, desired, &self.expander());
        self.write_merged(path, outcome)
    }

    /// Overwrite the file with freshly generated text.
    pub fn create(
        &self,
        path: impl AsRef<Path>,
        title: &str,
        subtitle: &str,
        sections: &SectionedDirectives,
    ) -> IniResult<()> {
        let path = path.as_ref();
        let text = generate(title, subtitle, sections, LineEnding::CrLf);
        self.write(path, &text)
    }

    /// Reduce the file to its title and subtitle comments.
    pub fn clear(&self, path: impl AsRef<Path>) -> IniResult<()> {
        let path = path.as_ref();
        let existing = self.read(path)?;
        let (title, subtitle) = clear_header(&existing);
        let text = generate(
            &title,
            &subtitle,
            &SectionedDirectives::new(),
            LineEnding::detect(&existing),
        );
        self.write(path, &text)
    }

    /// Parse text without headers. Diagnostics carry no file path.
    pub fn parse_flat(&self, text: &str) -> IniResult<FlatDirectives> {
        self.parse(text, false, None, |a, tokens| a.to_flat(tokens))
    }

    pub fn parse_sectioned(&self, text: &str) -> IniResult<SectionedDirectives> {
        self.parse(text, true, None, |a, tokens| a.to_sectioned(tokens))
    }

    /// Merge into text and return the result, reporting dropped duplicates.
    pub fn merge_flat(&self, existing: &str, desired: &FlatDirectives) -> IniResult<String> {
        let outcome = merge_flat(existing, desired, &self.expander());
        self.report_warnings(outcome.warnings, None)?;
        Ok(outcome.text)
    }

    pub fn merge_sectioned(
        &self,
        existing: &str,
        desired: &SectionedDirectives,
    ) -> IniResult<String> {
        let outcome = merge_sectioned(existing, desired, &self.expander());
        self.report_warnings(outcome.warnings, None)?;
        Ok(outcome.text)
    }

    /// Generate text with `\r\n` separators.
    pub fn generate(&self, title: &str, subtitle: &str, sections: &SectionedDirectives) -> String {
        generate(title, subtitle, sections, LineEnding::CrLf)
    }

    /// The expander configured for this engine.
    pub fn expander(&self) -> VariableExpander {
        let base_dir = match &self.options.base_dir {
            Some(dir) => dir.clone(),
            None => self.runtime.cwd().unwrap_or_else(|e| {
                debug!(error = %e, "Current directory unavailable, _BASEDIR_ expands to nothing");
                PathBuf::new()
            }),
        };
        VariableExpander::new(base_dir.to_string_lossy())
    }

    fn parse<T>(
        &self,
        text: &str,
        use_headers: bool,
        path: Option<&Path>,
        fold: impl FnOnce(&mut Aggregator<'_>, &[Token]) -> IniResult<T>,
    ) -> IniResult<T> {
        let tokens = tokenize(text, use_headers);
        let expander = self.expander();
        let mut aggregator = Aggregator::new(&expander);
        let result = fold(&mut aggregator, &tokens);

        let cell = OnceCell::new();
        let index = || cell.get_or_init(|| LineIndex::build(text, use_headers));

        let warnings: Vec<IniWarning> = aggregator
            .into_warnings()
            .into_iter()
            .map(|w| w.locate(index()))
            .collect();
        let reported = self.report_warnings(warnings, path);

        let value = result.map_err(|e| {
            let e = e.locate(index());
            self.report_error(&e, path);
            e
        })?;
        reported?;
        Ok(value)
    }

    fn read(&self, path: &Path) -> IniResult<String> {
        self.runtime
            .file_read_string(path)
            .map_err(|source| self.unreadable(path, source))
    }

    /// Like `read`, but a missing file reads as empty text.
    fn read_or_empty(&self, path: &Path) -> IniResult<String> {
        match self.runtime.file_read_string(path) {
            Ok(text) => Ok(text),
            Err(e) if e.is_not_found() => {
                debug!(path = %path.display(), "No existing file, starting from empty text");
                Ok(String::new())
            }
            Err(source) => Err(self.unreadable(path, source)),
        }
    }

    fn unreadable(&self, path: &Path, source: RuntimeError) -> IniError {
        let e = IniError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        };
        self.report_error(&e, Some(path));
        e
    }

    fn write(&self, path: &Path, text: &str) -> IniResult<()> {
        self.runtime
            .file_write(path, text.as_bytes())
            .map_err(|source| {
                let e = IniError::UnwritableFile {
                    path: path.to_path_buf(),
                    source,
                };
                self.report_error(&e, Some(path));
                e
            })?;
        debug!(path = %path.display(), bytes = text.len(), "Wrote INI file");
        Ok(())
    }

    fn write_merged(&self, path: &Path, outcome: MergeOutcome) -> IniResult<()> {
        self.write(path, &outcome.text)?;
        self.report_warnings(outcome.warnings, Some(path))
    }

    fn report_warnings(&self, warnings: Vec<IniWarning>, path: Option<&Path>) -> IniResult<()> {
        for warning in warnings {
            self.report_warning(&warning, path)?;
        }
        Ok(())
    }

    fn report_warning(&self, warning: &IniWarning, path: Option<&Path>) -> IniResult<()> {
        let Some(sink) = &self.sink else {
            return Ok(());
        };
        match sink.report(&warning.to_diagnostic(path)) {
            Ok(()) => Ok(()),
            Err(e) if self.options.fail_on_sink_error => Err(IniError::Sink(e)),
            Err(e) => {
                debug!(error = %e, code = warning.code(), "Diagnostic sink rejected warning");
                Ok(())
            }
        }
    }

    /// Errors are already on their way to the caller, so a sink failure
    /// here is only logged.
    fn report_error(&self, error: &IniError, path: Option<&Path>) {
        if let Some(sink) = &self.sink
            && let Err(e) = sink.report(&error.to_diagnostic(path))
        {
            debug!(error = %e, code = error.code(), "Diagnostic sink rejected error");
        }
    }
}
