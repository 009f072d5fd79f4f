//! Get command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::EngineArgs;

#[derive(Debug)]
pub struct GetArgs {
    pub engine: EngineArgs,
    pub file: PathBuf,
    pub key: String,
    pub section: Option<String>,
}

pub fn execute(args: GetArgs) -> Result<()> {
    let ini = args.engine.engine();
    let context = || format!("Failed to load {}", args.file.display());

    let value = match &args.section {
        Some(section) => ini
            .load_with_headers(&args.file)
            .with_context(context)?
            .get(section)
            .and_then(|directives| directives.get(&args.key))
            .cloned(),
        None => ini.load(&args.file).with_context(context)?.get(&args.key).cloned(),
    };

    match value {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => match &args.section {
            Some(section) => anyhow::bail!("Key `{}` not found in section [{}]", args.key, section),
            None => anyhow::bail!("Key `{}` not found", args.key),
        },
    }
}
