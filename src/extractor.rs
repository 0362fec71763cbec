//! Line extraction from heterogeneous text files.
//!
//! Files are read strictly as UTF-8 first; on decode failure a permissive
//! byte-level pass discards invalid sequences instead of failing, so one
//! bad file never aborts a batch.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Configuration for line extraction behavior
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfig {
    /// Whether to fail fast on first unreadable file or continue processing
    pub fail_fast: bool,
}

/// Per-file extraction statistics
#[derive(Debug, Clone, Serialize)]
pub struct ExtractStats {
    pub file_path: String,
    pub lines_kept: u64,
    pub bytes_read: u64,
    /// True when strict UTF-8 decoding failed and the permissive fallback ran
    pub recovered: bool,
    pub error: Option<String>,
}

/// Extracts trimmed, non-empty lines from text files
pub struct LineExtractor {
    config: ExtractorConfig,
}

impl LineExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Read one file and return its trimmed, non-empty lines in file order.
    ///
    /// An unreadable file contributes zero lines; the failure is recorded in
    /// the returned stats and becomes fatal only under `fail_fast`.
    pub async fn extract_lines<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<(Vec<String>, ExtractStats)> {
        let path = file_path.as_ref();
        debug!("Extracting lines from: {}", path.display());

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let error_msg = format!("Failed to read file {}: {}", path.display(), e);
                warn!("{}", error_msg);

                if self.config.fail_fast {
                    return Err(anyhow::anyhow!(error_msg));
                }
                let stats = ExtractStats {
                    file_path: path.display().to_string(),
                    lines_kept: 0,
                    bytes_read: 0,
                    recovered: false,
                    error: Some(error_msg),
                };
                return Ok((Vec::new(), stats));
            }
        };

        let bytes_read = bytes.len() as u64;
        let (content, recovered) = match String::from_utf8(bytes) {
            Ok(text) => (text, false),
            Err(e) => {
                warn!(
                    "Strict UTF-8 decode failed for {}, dropping invalid sequences",
                    path.display()
                );
                (decode_dropping_invalid(e.as_bytes()), true)
            }
        };

        let lines = lines_from_text(&content);
        let stats = ExtractStats {
            file_path: path.display().to_string(),
            lines_kept: lines.len() as u64,
            bytes_read,
            recovered,
            error: None,
        };

        info!(
            "Extracted {}: {} lines from {} bytes{}",
            path.display(),
            stats.lines_kept,
            stats.bytes_read,
            if recovered { " (recovered)" } else { "" }
        );

        Ok((lines, stats))
    }

    /// Extract lines from multiple files sequentially, recovering per file.
    ///
    /// Result order matches the input order; concatenating the line vectors
    /// yields the batch's raw line sequence.
    pub async fn extract_batch<P: AsRef<Path>>(
        &self,
        file_paths: &[P],
    ) -> Result<Vec<(Vec<String>, ExtractStats)>> {
        info!("Starting batch extraction of {} files", file_paths.len());

        let mut results = Vec::with_capacity(file_paths.len());
        for file_path in file_paths {
            let result = self.extract_lines(file_path).await?;
            results.push(result);
        }

        info!("Completed batch extraction of {} files", results.len());
        Ok(results)
    }
}

/// Split a text block into trimmed, non-empty lines.
///
/// The same rule serves pasted input and decoded file content: split on
/// any newline convention, trim each line, drop the ones that end up empty.
pub fn lines_from_text(text: &str) -> Vec<String> {
    // Splitting on both '\r' and '\n' turns a "\r\n" pair into an extra
    // empty segment, which the empty filter removes anyway
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decode bytes as UTF-8, discarding invalid sequences entirely.
///
/// Resynchronizes after each invalid sequence rather than substituting
/// U+FFFD, so recoverable content survives byte-identical.
fn decode_dropping_invalid(mut bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                result.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                result.push_str(&String::from_utf8_lossy(valid));
                // error_len is None only for a truncated sequence at the end
                let skip = e.error_len().unwrap_or(rest.len());
                if skip >= rest.len() {
                    break;
                }
                bytes = &rest[skip..];
            }
        }
    }
    result
}
