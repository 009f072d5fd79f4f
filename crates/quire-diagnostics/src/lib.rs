//! Diagnostic messages for quire.
//!
//! This crate provides a structured approach to reporting problems found
//! while reading or saving INI files, inspired by the tidyverse style guide:
//!
//! - [`DiagnosticMessage`]: title, problem, bulleted details, hints, location
//! - [`DiagnosticMessageBuilder`]: builder that encodes that structure
//! - [`DiagnosticSink`]: the narrow `report` interface the engine talks to
//!
//! Sinks are optional from the engine's point of view: with no sink
//! configured, reporting is a no-op.
//!
//! # Example
//!
//! ```rust
//! use quire_diagnostics::{CollectingSink, DiagnosticMessageBuilder, DiagnosticSink};
//!
//! let sink = CollectingSink::new();
//! let error = DiagnosticMessageBuilder::error("Duplicate key")
//!     .with_code("INI-3")
//!     .problem("`k` is defined more than once")
//!     .at_line(None, 2)
//!     .build();
//!
//! sink.report(&error).unwrap();
//! assert!(sink.has_errors());
//! ```

pub mod builder;
pub mod diagnostic;
pub mod sink;

pub use builder::DiagnosticMessageBuilder;
pub use diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage, SourceLocation};
pub use sink::{CollectingSink, DiagnosticSink, SinkError, TracingSink};
