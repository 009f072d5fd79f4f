//! Set command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use quire::{FlatDirectives, SectionedDirectives};
use quire_runtime::SystemRuntime;
use tracing::info;

use super::EngineArgs;

#[derive(Debug)]
pub struct SetArgs {
    pub engine: EngineArgs,
    pub file: PathBuf,
    pub key: String,
    pub value: String,
    pub section: Option<String>,
}

/// Only the named key is passed to the merger, so every other line of the
/// file is left as it is.
pub fn execute(args: SetArgs) -> Result<()> {
    let ini = args.engine.engine();
    let exists = ini
        .runtime()
        .path_exists(&args.file)
        .with_context(|| format!("Failed to check {}", args.file.display()))?;
    if exists {
        // Refuse to edit a file that would not load back.
        let loaded = match &args.section {
            Some(_) => ini.load_with_headers(&args.file).map(drop),
            None => ini.load(&args.file).map(drop),
        };
        loaded.with_context(|| format!("Failed to load {}", args.file.display()))?;
    }

    let mut directives = FlatDirectives::new();
    directives.insert(args.key.clone(), args.value.clone());

    let saved = match &args.section {
        Some(section) => {
            let mut sections = SectionedDirectives::new();
            sections.insert(section.clone(), directives);
            ini.save_with_headers(&args.file, &sections)
        }
        None => ini.save(&args.file, &directives),
    };
    saved.with_context(|| format!("Failed to save {}", args.file.display()))?;

    info!(file = %args.file.display(), key = %args.key, "Value updated");
    Ok(())
}
