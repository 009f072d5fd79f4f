//! Clear command implementation

use std::path::Path;

use anyhow::{Context, Result};

use super::EngineArgs;

pub fn execute(engine: EngineArgs, file: &Path) -> Result<()> {
    engine
        .engine()
        .clear(file)
        .with_context(|| format!("Failed to clear {}", file.display()))
}
