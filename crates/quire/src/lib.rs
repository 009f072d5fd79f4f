//! Comment-preserving INI reading, merging and generation.
//!
//! Files are loaded into insertion-ordered maps and saved by merging the
//! desired values back into the existing text, so comments, ordering and
//! lines the engine does not understand survive a round trip.
//!
//! # Overview
//!
//! The pipeline, leaf first:
//! - [`sanitize_line`]: strip the comment from one physical line
//! - [`tokenize`]: turn text into [`Token`]s (directives and section headers)
//! - [`VariableExpander`]: resolve `_TAB_`, `_BASEDIR_`, `(*N)` and `\=`
//! - [`Aggregator`]: fold tokens into [`FlatDirectives`] or [`SectionedDirectives`]
//! - [`LineIndex`]: map logical lines back to physical ones for diagnostics
//! - [`merge_flat`] / [`merge_sectioned`]: rewrite existing text in place
//! - [`generate`]: write a file from scratch
//!
//! [`Ini`] ties these to a [`SystemRuntime`](quire_runtime::SystemRuntime)
//! and an optional [`DiagnosticSink`](quire_diagnostics::DiagnosticSink).
//!
//! # Example
//!
//! ```rust
//! use quire::{Ini, SectionedDirectives};
//! use quire_runtime::MemoryRuntime;
//!
//! let runtime = MemoryRuntime::new();
//! runtime.add_file("/work/app.ini", "; App\r\n\r\n[db]\r\nhost = old ; primary\r\n");
//!
//! let ini = Ini::new(&runtime);
//! let mut sections = ini.load_with_headers("/work/app.ini").unwrap();
//! sections["db"].insert("host".to_string(), "db.internal".to_string());
//! sections.entry("cache".to_string()).or_default().insert("ttl".to_string(), "60".to_string());
//! ini.save_with_headers("/work/app.ini", &sections).unwrap();
//!
//! assert_eq!(
//!     runtime.contents("/work/app.ini").unwrap(),
//!     "; App\r\n\r\n[db]\r\nhost = db.internal\r\n\r\n[cache]\r\nttl = 60\r\n"
//! );
//! ```

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod expand;
pub mod generate;
pub mod lines;
pub mod locator;
pub mod merge;
pub mod sanitize;
pub mod tokenize;
pub mod warning;

pub use aggregate::{Aggregator, FlatDirectives, SectionedDirectives, contains_key_recursive};
pub use engine::{Ini, IniOptions};
pub use error::{IniError, IniResult};
pub use expand::{Expansion, MAX_EXPANDED_LEN, MacroWarning, VariableExpander, encode_value};
pub use generate::{clear_header, generate};
pub use lines::{LineEnding, split_lines};
pub use locator::LineIndex;
pub use merge::{MergeOutcome, merge_flat, merge_sectioned};
pub use sanitize::sanitize_line;
pub use tokenize::{Directive, Token, tokenize};
pub use warning::IniWarning;

/// Library name, used as the CLI command name.
pub const LIB_NAME: &str = "quire";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
