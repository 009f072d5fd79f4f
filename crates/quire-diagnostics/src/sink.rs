//! Destinations for diagnostic messages.
//!
//! A [`DiagnosticSink`] is the narrow interface the engine reports through.
//! Hosts plug in whatever they like; two sinks ship here:
//!
//! - [`CollectingSink`]: accumulates messages for later inspection
//! - [`TracingSink`]: forwards messages as `tracing` events

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::diagnostic::{DiagnosticKind, DiagnosticMessage};

/// Errors a sink may raise while reporting.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink cannot accept messages right now.
    #[error("diagnostic sink unavailable: {0}")]
    Unavailable(String),

    /// Writing the message failed.
    #[error("diagnostic sink I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that accepts diagnostic messages.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, message: &DiagnosticMessage) -> Result<(), SinkError>;
}

/// Sink that keeps every reported message.
///
/// This follows the context pattern: diagnostics are accumulated during an
/// operation and retrieved afterwards, so warnings are visible even when the
/// operation succeeded.
///
/// # Example
///
/// ```rust
/// use quire_diagnostics::{CollectingSink, DiagnosticMessage, DiagnosticSink};
///
/// let sink = CollectingSink::new();
/// sink.report(&DiagnosticMessage::warning("Duplicate setting skipped")).unwrap();
///
/// assert!(sink.has_diagnostics());
/// assert!(!sink.has_errors());
/// ```
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<DiagnosticMessage>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.lock().is_empty()
    }

    /// Snapshot of all collected diagnostics.
    pub fn diagnostics(&self) -> Vec<DiagnosticMessage> {
        self.lock().clone()
    }

    /// Take all collected diagnostics, leaving the sink empty.
    pub fn take_diagnostics(&self) -> Vec<DiagnosticMessage> {
        std::mem::take(&mut *self.lock())
    }

    /// Check if any errors (not warnings) have been collected.
    pub fn has_errors(&self) -> bool {
        self.lock().iter().any(DiagnosticMessage::is_error)
    }

    pub fn warnings(&self) -> Vec<DiagnosticMessage> {
        self.lock()
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Warning)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DiagnosticMessage>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, message: &DiagnosticMessage) -> Result<(), SinkError> {
        self.lock().push(message.clone());
        Ok(())
    }
}

/// Sink that emits each message as a `tracing` event.
///
/// Errors become `error!`, warnings `warn!`, everything else `info!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&self, message: &DiagnosticMessage) -> Result<(), SinkError> {
        let code = message.code.as_deref().unwrap_or("-");
        let location = message
            .location
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        match message.kind {
            DiagnosticKind::Error => {
                tracing::error!(code, location = %location, "{}", message);
            }
            DiagnosticKind::Warning => {
                tracing::warn!(code, location = %location, "{}", message);
            }
            DiagnosticKind::Info => {
                tracing::info!(code, location = %location, "{}", message);
            }
        }
        Ok(())
    }
}
