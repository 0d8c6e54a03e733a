use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{CurationOutput, RawBatch};

const CURATED_PREFIX: &str = "digest_curated_";

/// Get the default directory for batch and digest files
pub fn default_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .context("Could not determine local data directory")?
        .join("digest-curator");

    fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

    Ok(data_dir)
}

/// Load a collector batch from a JSON file
pub fn load_batch(filepath: &Path) -> Result<RawBatch> {
    if !filepath.exists() {
        anyhow::bail!("Batch file not found: {}", filepath.display());
    }

    let content = fs::read_to_string(filepath)
        .with_context(|| format!("Failed to read batch file: {}", filepath.display()))?;

    let batch: RawBatch = serde_json::from_str(&content).with_context(|| {
        format!(
            "Failed to parse batch JSON from {}. The file may be corrupted or not a collector batch.",
            filepath.display()
        )
    })?;

    if batch.items.is_empty() {
        eprintln!(
            "Warning: batch file {} contains no items",
            filepath.display()
        );
    }

    Ok(batch)
}

/// Save a curated digest document to a JSON file
pub fn save_output(output: &CurationOutput, filepath: &Path) -> Result<()> {
    if let Some(parent) = filepath.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("Failed to create output directory")?;
        }
    }

    let json =
        serde_json::to_string_pretty(output).context("Failed to serialize curated digest")?;

    fs::write(filepath, json)
        .with_context(|| format!("Failed to write digest file: {}", filepath.display()))?;

    Ok(())
}

/// Timestamped default path for a curated digest
pub fn default_output_path() -> Result<PathBuf> {
    let filename = format!(
        "{}{}.json",
        CURATED_PREFIX,
        Utc::now().format("%Y%m%d_%H%M%S")
    );
    Ok(default_data_dir()?.join(filename))
}

/// Most recently modified collector batch in the data directory, skipping
/// digests we wrote ourselves
pub fn find_latest_batch() -> Result<Option<PathBuf>> {
    let data_dir = default_data_dir()?;

    let mut batches: Vec<PathBuf> = fs::read_dir(&data_dir)
        .context("Failed to read data directory")?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().and_then(|s| s.to_str()) == Some("json")
                && path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .map(|name| !name.starts_with(CURATED_PREFIX))
                    .unwrap_or(false)
        })
        .collect();

    // Sort by modification time (newest first)
    batches.sort_by_key(|path| {
        fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .map(std::cmp::Reverse)
    });

    Ok(batches.into_iter().next())
}
