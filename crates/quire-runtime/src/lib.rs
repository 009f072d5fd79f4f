/*
 * quire-runtime
 * Copyright (c) 2025 Posit, PBC
 *
 * Runtime abstraction layer for quire file operations.
 *
 * The INI engine never touches the file system directly. It reads and
 * writes whole files through a SystemRuntime:
 *
 * - NativeRuntime: the host file system through std (default)
 * - MemoryRuntime: an in-memory VirtualFileSystem for embedding and tests
 */

mod memory;
mod native;
mod traits;

pub use traits::{RuntimeError, RuntimeResult, SystemRuntime};

pub use memory::{MemoryRuntime, VirtualFileSystem};
pub use native::NativeRuntime;

/// Create the default runtime for the current platform.
pub fn default_runtime() -> NativeRuntime {
    NativeRuntime::new()
}
