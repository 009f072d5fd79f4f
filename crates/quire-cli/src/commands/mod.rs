//! Command implementations for the quire CLI
//!
//! Each command module handles the CLI interface and delegates to the
//! quire engine for the actual work.

use std::path::PathBuf;
use std::sync::Arc;

use clap::ValueEnum;
use quire::{Ini, IniOptions};
use quire_diagnostics::TracingSink;
use quire_runtime::NativeRuntime;

pub mod clear;
pub mod create;
pub mod dump;
pub mod get;
pub mod set;

/// Engine settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct EngineArgs {
    pub base_dir: Option<PathBuf>,
    pub strict_sink: bool,
}

impl EngineArgs {
    /// Build an engine on the native file system that logs diagnostics.
    pub fn engine(&self) -> Ini<NativeRuntime> {
        let options = IniOptions {
            base_dir: self.base_dir.clone(),
            fail_on_sink_error: self.strict_sink,
        };
        Ini::with_options(NativeRuntime::new(), options).with_sink(Arc::new(TracingSink::new()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Ini,
    Json,
}
