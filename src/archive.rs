//! Zip archive expansion and text-file discovery.
//!
//! A corrupt archive is fatal for the whole invocation: there is no useful
//! partial result from a half-extracted archive, so extraction errors are
//! propagated rather than recovered.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Recognized text-file extension inside archives, matched case-insensitively
const TEXT_EXTENSION: &str = "txt";

/// Extract every entry of `archive_path` under `destination_dir`, then walk
/// the destination and return all extracted files with a `.txt` extension.
///
/// The walk is file-name-sorted so discovery order is stable across
/// platforms. No deduplication is performed.
pub fn expand_archive(archive_path: &Path, destination_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(destination_dir).with_context(|| {
        format!(
            "Failed to create extraction directory {}",
            destination_dir.display()
        )
    })?;

    let file = fs::File::open(archive_path)
        .with_context(|| format!("Failed to open archive {}", archive_path.display()))?;
    let mut archive = zip::ZipArchive::new(file)
        .with_context(|| format!("Failed to read archive {}", archive_path.display()))?;

    info!(
        "Expanding {} entries from {} into {}",
        archive.len(),
        archive_path.display(),
        destination_dir.display()
    );
    archive
        .extract(destination_dir)
        .with_context(|| format!("Failed to extract archive {}", archive_path.display()))?;

    let mut text_files = Vec::new();
    for entry in WalkDir::new(destination_dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && has_text_extension(entry.path()) {
            debug!("Found text file: {}", entry.path().display());
            text_files.push(entry.path().to_path_buf());
        }
    }

    info!("Archive expansion found {} text files", text_files.len());
    Ok(text_files)
}

fn has_text_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TEXT_EXTENSION))
}
