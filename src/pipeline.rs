//! Pipeline orchestration: resolve an input source into raw lines, then
//! apply normalization and transliteration to produce parallel output
//! sequences.
//!
//! Processing is sequential and single-pass: one invocation runs to
//! completion or fails outright, and lines are never merged, split, or
//! reordered between stages.

use anyhow::Result;
use indicatif::ProgressBar;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::archive;
use crate::extractor::{lines_from_text, ExtractStats, ExtractorConfig, LineExtractor};
use crate::normalize::Normalize;
use crate::translit::transliterate;

/// Where a pipeline run draws its raw lines from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Pasted or piped text block
    Text(String),
    /// Single text file
    File(PathBuf),
    /// Zip archive containing text files at any nesting depth
    Archive(PathBuf),
}

impl InputSource {
    /// Classify an input path by extension: `.zip` (case-insensitive) is an
    /// archive, everything else is treated as a single text file.
    pub fn from_path(path: &Path) -> Self {
        let is_zip = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        if is_zip {
            Self::Archive(path.to_path_buf())
        } else {
            Self::File(path.to_path_buf())
        }
    }
}

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory archive entries are extracted into
    pub extract_dir: PathBuf,
    /// Abort on the first unreadable file instead of recovering
    pub fail_fast: bool,
    /// Show a progress bar while extracting multi-file inputs
    pub show_progress: bool,
}

/// Parallel output sequences; index i of both corresponds to raw line i
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub normalized: Vec<String>,
    pub romanized: Vec<String>,
    /// Per-file extraction stats, empty for pasted input
    pub file_stats: Vec<ExtractStats>,
}

impl PipelineOutput {
    /// True when no non-empty line was found in any input
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.normalized.len()
    }
}

/// Run summary written as JSON next to the artifacts
#[derive(Debug, Serialize)]
pub struct RunStats {
    pub total_lines: usize,
    pub files_processed: usize,
    pub files_with_issues: usize,
    pub normalizer: String,
    pub clean_artifact: Option<String>,
    pub roman_artifact: Option<String>,
    pub duration_ms: u64,
    pub file_stats: Vec<ExtractStats>,
}

/// Run the full pipeline for one input source.
///
/// An empty raw-line sequence is a normal outcome, not an error: the
/// returned output has empty sequences and the caller decides how to
/// surface it.
pub async fn run(
    source: InputSource,
    config: &PipelineConfig,
    normalizer: &dyn Normalize,
) -> Result<PipelineOutput> {
    let (raw_lines, file_stats) = collect_raw_lines(source, config).await?;

    if raw_lines.is_empty() {
        warn!("No non-empty lines found in input");
        return Ok(PipelineOutput {
            normalized: Vec::new(),
            romanized: Vec::new(),
            file_stats,
        });
    }

    info!(
        "Processing {} raw lines with '{}' normalizer",
        raw_lines.len(),
        normalizer.name()
    );

    let mut normalized = Vec::with_capacity(raw_lines.len());
    let mut romanized = Vec::with_capacity(raw_lines.len());
    for line in &raw_lines {
        let clean = normalizer.normalize(line);
        romanized.push(transliterate(&clean));
        normalized.push(clean);
    }
    debug_assert_eq!(normalized.len(), romanized.len());

    Ok(PipelineOutput {
        normalized,
        romanized,
        file_stats,
    })
}

/// Resolve the input source into its flat raw-line sequence.
async fn collect_raw_lines(
    source: InputSource,
    config: &PipelineConfig,
) -> Result<(Vec<String>, Vec<ExtractStats>)> {
    let extractor = LineExtractor::new(ExtractorConfig {
        fail_fast: config.fail_fast,
    });

    match source {
        InputSource::Text(text) => {
            info!("Resolving pasted text input");
            Ok((lines_from_text(&text), Vec::new()))
        }
        InputSource::File(path) => {
            info!("Resolving single-file input: {}", path.display());
            let (lines, stats) = extractor.extract_lines(&path).await?;
            Ok((lines, vec![stats]))
        }
        InputSource::Archive(path) => {
            info!("Resolving archive input: {}", path.display());
            let files = archive::expand_archive(&path, &config.extract_dir)?;

            let progress = (config.show_progress && files.len() > 1)
                .then(|| ProgressBar::new(files.len() as u64));

            let mut all_lines = Vec::new();
            let mut all_stats = Vec::with_capacity(files.len());
            for file in &files {
                let (lines, stats) = extractor.extract_lines(file).await?;
                all_lines.extend(lines);
                all_stats.push(stats);
                if let Some(bar) = &progress {
                    bar.inc(1);
                }
            }
            if let Some(bar) = progress {
                bar.finish_and_clear();
            }

            Ok((all_lines, all_stats))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::IdentityNormalizer;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> PipelineConfig {
        PipelineConfig {
            extract_dir: temp_dir.path().join("extracted"),
            fail_fast: false,
            show_progress: false,
        }
    }

    #[test]
    fn test_input_source_classification() {
        assert!(matches!(
            InputSource::from_path(Path::new("poems.zip")),
            InputSource::Archive(_)
        ));
        assert!(matches!(
            InputSource::from_path(Path::new("POEMS.ZIP")),
            InputSource::Archive(_)
        ));
        assert!(matches!(
            InputSource::from_path(Path::new("poem.txt")),
            InputSource::File(_)
        ));
        assert!(matches!(
            InputSource::from_path(Path::new("no_extension")),
            InputSource::File(_)
        ));
    }

    #[tokio::test]
    async fn test_text_source_drops_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let output = run(
            InputSource::Text("سلام\n\nدنیا".to_string()),
            &config,
            &IdentityNormalizer,
        )
        .await
        .unwrap();

        assert_eq!(output.normalized, vec!["سلام", "دنیا"]);
        assert_eq!(output.romanized.len(), 2);
        assert!(output.file_stats.is_empty());
    }

    #[tokio::test]
    async fn test_sequences_stay_parallel() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let output = run(
            InputSource::Text("ایک\nدو\nتین\nچار".to_string()),
            &config,
            &IdentityNormalizer,
        )
        .await
        .unwrap();

        assert_eq!(output.line_count(), 4);
        assert_eq!(output.normalized.len(), output.romanized.len());
        assert!(output.normalized.iter().all(|line| !line.is_empty()));
    }

    #[tokio::test]
    async fn test_whitespace_only_text_is_empty_result() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let output = run(
            InputSource::Text("   \n\t\n  ".to_string()),
            &config,
            &IdentityNormalizer,
        )
        .await
        .unwrap();

        assert!(output.is_empty());
        assert_eq!(output.line_count(), 0);
    }

    #[tokio::test]
    async fn test_file_source() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let path = temp_dir.path().join("ghazal.txt");
        tokio::fs::write(&path, "دل\n\nجان").await.unwrap();

        let output = run(InputSource::File(path), &config, &IdentityNormalizer)
            .await
            .unwrap();

        assert_eq!(output.normalized, vec!["دل", "جان"]);
        assert_eq!(output.romanized, vec!["dl", "jan"]);
        assert_eq!(output.file_stats.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_source_is_empty_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let output = run(
            InputSource::File(temp_dir.path().join("missing.txt")),
            &config,
            &IdentityNormalizer,
        )
        .await
        .unwrap();

        assert!(output.is_empty());
        assert_eq!(output.file_stats.len(), 1);
        assert!(output.file_stats[0].error.is_some());
    }
}
