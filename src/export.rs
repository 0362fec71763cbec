//! Output artifact writing.
//!
//! Artifact names are fixed so downstream consumers can rely on them.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::info;

use crate::pipeline::PipelineOutput;

/// Normalized-Urdu artifact name
pub const CLEAN_FILE_NAME: &str = "all_poems_clean.txt";
/// Romanized artifact name
pub const ROMAN_FILE_NAME: &str = "all_poems_roman.txt";

/// Locations of the written artifacts
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub clean: PathBuf,
    pub roman: PathBuf,
}

/// Write both artifacts under `out_dir`, one line per processed input line,
/// newline-terminated, UTF-8.
///
/// Reading an artifact back and re-splitting reproduces the sequence that
/// was written; callers skip this entirely for empty results.
pub async fn write_artifacts(out_dir: &Path, output: &PipelineOutput) -> Result<ExportPaths> {
    tokio::fs::create_dir_all(out_dir).await?;

    let clean = out_dir.join(CLEAN_FILE_NAME);
    let roman = out_dir.join(ROMAN_FILE_NAME);

    write_lines(&clean, &output.normalized).await?;
    write_lines(&roman, &output.romanized).await?;

    info!(
        "Wrote {} lines to {} and {}",
        output.line_count(),
        clean.display(),
        roman.display()
    );

    Ok(ExportPaths { clean, roman })
}

async fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);

    for line in lines {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }

    writer.flush().await?;
    Ok(())
}
