/*
 * native.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * NativeRuntime: full file system access through std.
 */

use std::path::{Path, PathBuf};

use crate::traits::{RuntimeResult, SystemRuntime};

/// Runtime backed by the host file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    pub fn new() -> Self {
        Self
    }
}

impl SystemRuntime for NativeRuntime {
    fn file_read(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        Ok(std::fs::read(path)?)
    }

    fn file_write(&self, path: &Path, contents: &[u8]) -> RuntimeResult<()> {
        Ok(std::fs::write(path, contents)?)
    }

    fn path_exists(&self, path: &Path) -> RuntimeResult<bool> {
        Ok(path.is_file())
    }

    fn cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(std::env::current_dir()?)
    }
}
