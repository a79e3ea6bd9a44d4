use anyhow::{Context, Result};
use clap::Parser;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use cleave::input::{read_source, read_stdin, FileReport};
use cleave::{SegmenterOptions, SentenceSegmenter};

#[derive(Parser, Debug)]
#[command(name = "cleave")]
#[command(about = "Split text into sentences, one per line")]
#[command(version)]
struct Args {
    /// Input files; reads stdin when none are given
    inputs: Vec<PathBuf>,

    /// Emit one JSON object per input instead of plain lines
    #[arg(long)]
    json: bool,

    /// Memory-map input files instead of async buffered reads
    #[arg(long)]
    mmap: bool,

    /// Abbreviation tokens replacing the built-in list, one per line
    /// ('#' comments and blank lines ignored)
    #[arg(long, value_name = "PATH")]
    exceptions_file: Option<PathBuf>,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress the console progress bar
    #[arg(long)]
    no_progress: bool,

    /// Write per-input JSON stats to this path
    #[arg(long, value_name = "PATH")]
    stats_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured logs go to stderr so stdout stays machine-consumable
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "parsed CLI arguments");
    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let options = match &args.exceptions_file {
        Some(path) => SegmenterOptions {
            exceptions: load_exceptions(path).await?,
        },
        None => SegmenterOptions::default(),
    };
    let segmenter = SentenceSegmenter::new(options).context("invalid exception list")?;

    let mut outputs: Vec<(String, Vec<String>)> = Vec::new();
    let mut reports: Vec<FileReport> = Vec::new();
    let mut failures = 0usize;

    if args.inputs.is_empty() {
        let started = Instant::now();
        let text = read_stdin().await?;
        let sentences = segmenter.segment(&text);
        reports.push(FileReport::success(
            "-",
            sentences.len(),
            text.chars().count(),
            started.elapsed().as_millis() as u64,
        ));
        outputs.push(("-".to_string(), sentences));
    } else {
        let progress = if args.inputs.len() > 1 && !args.no_progress {
            let bar = ProgressBar::new(args.inputs.len() as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40.cyan/blue} {pos}/{len} files")
                    .expect("progress template parses")
                    .progress_chars("##-"),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let use_mmap = args.mmap;
        let segmenter_ref = &segmenter;
        // WHY: buffered (not buffer_unordered) so output order always matches
        // input order regardless of completion order
        let concurrency = num_cpus::get().clamp(1, 8);
        let mut completed = stream::iter(args.inputs.iter())
            .map(|path| async move {
                // WHY: not named `display`; tracing event macros import
                // field::display into their expansion, shadowing such a local
                let shown = path.display().to_string();
                let outcome = segment_one(path, segmenter_ref, use_mmap).await;
                (shown, outcome)
            })
            .buffered(concurrency);

        while let Some((shown, outcome)) = completed.next().await {
            match outcome {
                Ok((sentences, report)) => {
                    reports.push(report);
                    outputs.push((shown, sentences));
                }
                Err(err) => {
                    failures += 1;
                    reports.push(FileReport::failure(&shown, &err));
                    if args.fail_fast {
                        progress.finish_and_clear();
                        return Err(err.context(format!("processing {shown}")));
                    }
                    warn!("{shown}: {err:#}");
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();
    }

    for (path, sentences) in &outputs {
        emit_output(path, sentences, args.json)?;
    }

    if let Some(stats_path) = &args.stats_out {
        let json = serde_json::to_string_pretty(&reports).context("serialize stats")?;
        tokio::fs::write(stats_path, json)
            .await
            .with_context(|| format!("failed to write stats to {}", stats_path.display()))?;
        info!("stats written to {}", stats_path.display());
    }

    let total_sentences: usize = outputs.iter().map(|(_, s)| s.len()).sum();
    info!(
        "processed {} input(s): {} sentences, {} failed",
        outputs.len(),
        total_sentences,
        failures
    );
    Ok(())
}

async fn segment_one(
    path: &Path,
    segmenter: &SentenceSegmenter,
    use_mmap: bool,
) -> Result<(Vec<String>, FileReport)> {
    let started = Instant::now();
    let source = read_source(path, use_mmap).await?;
    let text = source.as_str()?;
    let sentences = segmenter.segment(text);
    let report = FileReport::success(
        &path.display().to_string(),
        sentences.len(),
        text.chars().count(),
        started.elapsed().as_millis() as u64,
    );
    Ok((sentences, report))
}

/// Load replacement abbreviation tokens. An empty file disables abbreviation
/// suppression entirely.
async fn load_exceptions(path: &Path) -> Result<Vec<String>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read exceptions file {}", path.display()))?;
    let tokens: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    if tokens.is_empty() {
        warn!(
            "{}: no tokens, abbreviation suppression disabled",
            path.display()
        );
    } else {
        info!("loaded {} exception tokens from {}", tokens.len(), path.display());
    }
    Ok(tokens)
}

fn emit_output(path: &str, sentences: &[String], json: bool) -> Result<()> {
    if json {
        let record = serde_json::json!({ "path": path, "sentences": sentences });
        println!("{}", serde_json::to_string(&record).context("serialize output")?);
    } else {
        for sentence in sentences {
            println!("{}", flatten_whitespace(sentence));
        }
    }
    Ok(())
}

/// Collapse interior whitespace runs so one sentence occupies one output
/// line. JSON output carries sentences verbatim instead.
fn flatten_whitespace(sentence: &str) -> String {
    sentence.split_whitespace().collect::<Vec<_>>().join(" ")
}
