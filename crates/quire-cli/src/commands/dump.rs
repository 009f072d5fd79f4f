//! Dump command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{EngineArgs, OutputFormat};

#[derive(Debug)]
pub struct DumpArgs {
    pub engine: EngineArgs,
    pub file: PathBuf,
    pub headers: bool,
    pub format: OutputFormat,
}

pub fn execute(args: DumpArgs) -> Result<()> {
    let ini = args.engine.engine();
    let output = if args.headers {
        let sections = ini
            .load_with_headers(&args.file)
            .with_context(|| format!("Failed to load {}", args.file.display()))?;
        match args.format {
            OutputFormat::Json => serde_json::to_string_pretty(&sections)?,
            OutputFormat::Ini => ini.merge_sectioned("", &sections)?,
        }
    } else {
        let values = ini
            .load(&args.file)
            .with_context(|| format!("Failed to load {}", args.file.display()))?;
        match args.format {
            OutputFormat::Json => serde_json::to_string_pretty(&values)?,
            OutputFormat::Ini => ini.merge_flat("", &values)?,
        }
    };
    print!("{}", terminated(output));
    Ok(())
}

/// Ensure output ends with a newline; empty maps render as nothing.
fn terminated(output: String) -> String {
    let trimmed = output.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}\n", trimmed.replace("\r\n", "\n"))
    }
}
