/*
 * traits.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Defines the SystemRuntime trait and supporting types for the runtime abstraction layer.
 *
 * The INI engine only needs three things from its host: read a whole file,
 * write a whole file, and know the current directory. Everything else stays
 * in memory.
 */

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Permission denied (with detailed reason)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

impl RuntimeError {
    /// True when the error means the path simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RuntimeError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

/// File system operations needed by the INI engine.
///
/// Implementations must be usable from several threads at once; the engine
/// itself never calls them concurrently, but hosts may share one runtime
/// between engines.
pub trait SystemRuntime: Send + Sync {
    /// Read the entire file as bytes.
    fn file_read(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Read the entire file as text.
    ///
    /// INI files are treated as single-byte text, so invalid UTF-8 is
    /// replaced rather than rejected.
    fn file_read_string(&self, path: &Path) -> RuntimeResult<String> {
        let bytes = self.file_read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write bytes to a file, replacing any existing content.
    fn file_write(&self, path: &Path, contents: &[u8]) -> RuntimeResult<()>;

    /// Check whether a file exists at `path`.
    fn path_exists(&self, path: &Path) -> RuntimeResult<bool>;

    /// Get the current working directory.
    fn cwd(&self) -> RuntimeResult<PathBuf>;
}

impl<T: SystemRuntime + ?Sized> SystemRuntime for &T {
    fn file_read(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        (**self).file_read(path)
    }

    fn file_write(&self, path: &Path, contents: &[u8]) -> RuntimeResult<()> {
        (**self).file_write(path, contents)
    }

    fn path_exists(&self, path: &Path) -> RuntimeResult<bool> {
        (**self).path_exists(path)
    }

    fn cwd(&self) -> RuntimeResult<PathBuf> {
        (**self).cwd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let err = RuntimeError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.is_not_found());

        let err = RuntimeError::PermissionDenied("read-only".to_string());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = RuntimeError::PermissionDenied("/etc/app.ini".to_string());
        assert_eq!(err.to_string(), "Permission denied: /etc/app.ini");
    }
}
