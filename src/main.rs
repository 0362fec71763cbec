use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use misra::export;
use misra::normalize;
use misra::pipeline::{self, InputSource, PipelineConfig, RunStats};

#[derive(Parser, Debug)]
#[command(name = "misra")]
#[command(about = "Urdu poetry processor: normalized Urdu plus Roman transliteration")]
#[command(version)]
struct Args {
    /// Input file: .txt, or .zip containing .txt files at any depth
    input: Option<PathBuf>,

    /// Process a pasted text block instead of a file
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Directory for output artifacts
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Directory archive entries are extracted into (default: <out-dir>/extracted)
    #[arg(long)]
    work_dir: Option<PathBuf>,

    /// Number of processed line pairs to print as a sample
    #[arg(long, default_value_t = 5)]
    sample: usize,

    /// Abort on first unreadable file
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Stats output file path
    #[arg(long, default_value = "run_stats.json")]
    stats_out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting misra");
    info!(?args, "Parsed CLI arguments");

    let start_time = std::time::Instant::now();

    let source = match (&args.input, &args.text) {
        (Some(path), _) => {
            if !path.exists() {
                anyhow::bail!("Input path does not exist: {}", path.display());
            }
            if !path.is_file() {
                anyhow::bail!("Input path is not a file: {}", path.display());
            }
            InputSource::from_path(path)
        }
        (None, Some(text)) => InputSource::Text(text.clone()),
        (None, None) => anyhow::bail!("Provide an input file or --text"),
    };

    // Normalizer selection happens once here and is injected below
    let normalizer = normalize::resolve();

    let config = PipelineConfig {
        extract_dir: args
            .work_dir
            .clone()
            .unwrap_or_else(|| args.out_dir.join("extracted")),
        fail_fast: args.fail_fast,
        show_progress: !args.no_progress,
    };

    let output = pipeline::run(source, &config, normalizer.as_ref()).await?;

    let files_with_issues = output
        .file_stats
        .iter()
        .filter(|stats| stats.error.is_some())
        .count();

    let (clean_artifact, roman_artifact) = if output.is_empty() {
        println!("No text found. Provide non-empty input (file, archive, or --text).");
        (None, None)
    } else {
        let paths = export::write_artifacts(&args.out_dir, &output).await?;

        println!("Processed {} lines.", output.line_count());
        println!("Sample (first {} lines):", args.sample.min(output.line_count()));
        for (clean, roman) in output
            .normalized
            .iter()
            .zip(output.romanized.iter())
            .take(args.sample)
        {
            println!("  {clean}");
            println!("  Roman: {roman}");
        }
        println!("Artifacts:");
        println!("  Clean: {}", paths.clean.display());
        println!("  Roman: {}", paths.roman.display());

        (
            Some(paths.clean.display().to_string()),
            Some(paths.roman.display().to_string()),
        )
    };

    if files_with_issues > 0 {
        println!("Files with issues: {files_with_issues}");
        for stats in &output.file_stats {
            if let Some(ref error) = stats.error {
                info!("Issue with {}: {}", stats.file_path, error);
            }
        }
    }

    let run_stats = RunStats {
        total_lines: output.line_count(),
        files_processed: output.file_stats.len(),
        files_with_issues,
        normalizer: normalizer.name().to_string(),
        clean_artifact,
        roman_artifact,
        duration_ms: start_time.elapsed().as_millis() as u64,
        file_stats: output.file_stats.clone(),
    };
    let stats_json = serde_json::to_string_pretty(&run_stats)?;
    tokio::fs::write(&args.stats_out, stats_json).await?;
    info!("Run stats written to {}", args.stats_out.display());

    Ok(())
}
