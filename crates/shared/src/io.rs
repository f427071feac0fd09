use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

/// Create the output directories up front so a bad path fails before any
/// network work happens.
pub fn ensure_dirs(paths: &[&Path]) -> Result<()> {
    for path in paths {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create output directory {}", path.display()))?;
    }
    Ok(())
}

/// Write a structured artifact as pretty-printed JSON. Failure here is fatal:
/// the artifacts are the entire point of a run.
pub fn dump_json<T: Serialize>(dir: &Path, filename: &str, data: &T) -> Result<PathBuf> {
    let filepath = dir.join(filename);
    let json = serde_json::to_string_pretty(data)
        .with_context(|| format!("Failed to serialize {}", filename))?;
    fs::write(&filepath, json)
        .with_context(|| format!("Failed to write {}", filepath.display()))?;
    Ok(filepath)
}

/// Write the rendered text report.
pub fn dump_text(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let filepath = dir.join(filename);
    fs::write(&filepath, content)
        .with_context(|| format!("Failed to write {}", filepath.display()))?;
    Ok(filepath)
}
