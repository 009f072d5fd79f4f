//! Create command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use quire::SectionedDirectives;

use super::EngineArgs;

#[derive(Debug)]
pub struct CreateArgs {
    pub engine: EngineArgs,
    pub file: PathBuf,
    pub title: String,
    pub subtitle: String,
    /// `SECTION.KEY=VALUE` or `KEY=VALUE`
    pub values: Vec<String>,
}

pub fn execute(args: CreateArgs) -> Result<()> {
    let mut sections = SectionedDirectives::new();
    for assignment in &args.values {
        let (section, key, value) = parse_assignment(assignment)?;
        sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    args.engine
        .engine()
        .create(&args.file, &args.title, &args.subtitle, &sections)
        .with_context(|| format!("Failed to create {}", args.file.display()))
}

/// Split `SECTION.KEY=VALUE` at the first `=`, then the target at its first `.`.
fn parse_assignment(assignment: &str) -> Result<(&str, &str, &str)> {
    let (target, value) = assignment
        .split_once('=')
        .with_context(|| format!("Expected SECTION.KEY=VALUE, got `{}`", assignment))?;
    let (section, key) = target.split_once('.').unwrap_or(("", target));
    if key.trim().is_empty() {
        anyhow::bail!("Missing key in `{}`", assignment);
    }
    Ok((section.trim(), key.trim(), value.trim()))
}
