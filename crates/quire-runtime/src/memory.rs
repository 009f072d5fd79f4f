/*
 * memory.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * MemoryRuntime: an in-memory file system for hosts that keep their
 * configuration outside the disk, and for tests.
 */

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::traits::{RuntimeError, RuntimeResult, SystemRuntime};

fn not_found_error(path: &Path) -> RuntimeError {
    RuntimeError::Io(io::Error::new(
        io::ErrorKind::NotFound,
        format!("Path not found: {}", path.display()),
    ))
}

/// In-memory file store.
///
/// Relative paths are resolved against the working directory (`/work` by
/// default). Files can be marked read-only to simulate write failures.
#[derive(Debug)]
pub struct VirtualFileSystem {
    /// File contents, keyed by normalized absolute path
    files: HashMap<PathBuf, Vec<u8>>,
    /// Paths that reject writes
    read_only: HashSet<PathBuf>,
    /// Working directory for relative paths
    working_dir: PathBuf,
}

impl VirtualFileSystem {
    /// Create a new empty virtual filesystem rooted at `/work`.
    pub fn new() -> Self {
        Self::with_working_dir(PathBuf::from("/work"))
    }

    /// Create a virtual filesystem with a custom working directory.
    pub fn with_working_dir(working_dir: PathBuf) -> Self {
        Self {
            files: HashMap::new(),
            read_only: HashSet::new(),
            working_dir: normalize_components(&working_dir),
        }
    }

    pub fn add_file(&mut self, path: &Path, contents: Vec<u8>) {
        let normalized = self.normalize_path(path);
        self.files.insert(normalized, contents);
    }

    /// Remove a file. Returns true if the file existed.
    pub fn remove_file(&mut self, path: &Path) -> bool {
        let normalized = self.normalize_path(path);
        self.files.remove(&normalized).is_some()
    }

    /// Mark a path as read-only; writes to it fail with `PermissionDenied`.
    pub fn set_read_only(&mut self, path: &Path) {
        let normalized = self.normalize_path(path);
        self.read_only.insert(normalized);
    }

    pub fn read_file(&self, path: &Path) -> Option<&[u8]> {
        let normalized = self.normalize_path(path);
        self.files.get(&normalized).map(Vec::as_slice)
    }

    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self.files.keys().cloned().collect();
        files.sort();
        files
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Resolve `path` against the working directory and drop `.`/`..`.
    pub fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize_components(path)
        } else {
            normalize_components(&self.working_dir.join(path))
        }
    }

    fn write_file(&mut self, path: &Path, contents: &[u8]) -> RuntimeResult<()> {
        let normalized = self.normalize_path(path);
        if self.read_only.contains(&normalized) {
            return Err(RuntimeError::PermissionDenied(format!(
                "{} is read-only",
                normalized.display()
            )));
        }
        self.files.insert(normalized, contents.to_vec());
        Ok(())
    }
}

impl Default for VirtualFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_components(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("/");
                }
            }
            Component::CurDir => {}
            other => normalized.push(other),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push("/");
    }
    normalized
}

/// Runtime backed by a [`VirtualFileSystem`].
///
/// Uses an `RwLock` so the runtime can be shared between threads.
#[derive(Debug, Default)]
pub struct MemoryRuntime {
    vfs: RwLock<VirtualFileSystem>,
}

impl MemoryRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vfs(vfs: VirtualFileSystem) -> Self {
        Self {
            vfs: RwLock::new(vfs),
        }
    }

    /// Add (or replace) a file.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        self.vfs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add_file(path.as_ref(), contents.into());
    }

    pub fn remove_file(&self, path: impl AsRef<Path>) -> bool {
        self.vfs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_file(path.as_ref())
    }

    pub fn set_read_only(&self, path: impl AsRef<Path>) {
        self.vfs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_read_only(path.as_ref());
    }

    /// Current content of a file as text, if it exists.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.vfs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .read_file(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn list_files(&self) -> Vec<PathBuf> {
        self.vfs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .list_files()
    }
}

impl SystemRuntime for MemoryRuntime {
    fn file_read(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        let vfs = self.vfs.read().unwrap_or_else(PoisonError::into_inner);
        vfs.read_file(path)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| not_found_error(&vfs.normalize_path(path)))
    }

    fn file_write(&self, path: &Path, contents: &[u8]) -> RuntimeResult<()> {
        self.vfs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .write_file(path, contents)
    }

    fn path_exists(&self, path: &Path) -> RuntimeResult<bool> {
        let vfs = self.vfs.read().unwrap_or_else(PoisonError::into_inner);
        Ok(vfs.read_file(path).is_some())
    }

    fn cwd(&self) -> RuntimeResult<PathBuf> {
        let vfs = self.vfs.read().unwrap_or_else(PoisonError::into_inner);
        Ok(vfs.working_dir().to_path_buf())
    }
}
