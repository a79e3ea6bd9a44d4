// WHY: All file and stdin I/O stays at the binary edge so the segmenter
// itself never touches the filesystem

use anyhow::{Context, Result};
use memmap2::Mmap;
use serde::Serialize;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Text loaded for segmentation, either owned or memory-mapped.
pub enum SourceText {
    Owned(String),
    Mapped(Mmap),
}

impl SourceText {
    /// View the loaded bytes as UTF-8 text. Owned text was validated when it
    /// was read; mapped bytes are validated here.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            SourceText::Owned(text) => Ok(text),
            SourceText::Mapped(map) => {
                std::str::from_utf8(&map[..]).context("memory-mapped input is not valid UTF-8")
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SourceText::Owned(text) => text.len(),
            SourceText::Mapped(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load one input file, async-buffered by default or memory-mapped on request.
pub async fn read_source(path: &Path, use_mmap: bool) -> Result<SourceText> {
    if use_mmap {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        // Safety: the mapping is read-only and private to this process; an
        // input file truncated mid-run is outside the supported contract,
        // same as for the buffered path.
        let map = unsafe { Mmap::map(&file) }
            .with_context(|| format!("failed to mmap {}", path.display()))?;
        debug!("mmapped {} ({} bytes)", path.display(), map.len());
        Ok(SourceText::Mapped(map))
    } else {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        debug!("read {} ({} bytes)", path.display(), text.len());
        Ok(SourceText::Owned(text))
    }
}

/// Read all of stdin to a string.
pub async fn read_stdin() -> Result<String> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("failed to read stdin")?;
    Ok(text)
}

/// Per-input outcome recorded for `--stats-out`.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub sentences: usize,
    pub chars: usize,
    pub elapsed_ms: u64,
    pub chars_per_sec: f64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn success(path: &str, sentences: usize, chars: usize, elapsed_ms: u64) -> Self {
        let chars_per_sec = if elapsed_ms > 0 {
            chars as f64 / (elapsed_ms as f64 / 1000.0)
        } else {
            0.0
        };
        Self {
            path: path.to_string(),
            sentences,
            chars,
            elapsed_ms,
            chars_per_sec,
            status: "success".to_string(),
            error: None,
        }
    }

    pub fn failure(path: &str, error: &anyhow::Error) -> Self {
        Self {
            path: path.to_string(),
            sentences: 0,
            chars: 0,
            elapsed_ms: 0,
            chars_per_sec: 0.0,
            status: "failed".to_string(),
            error: Some(format!("{error:#}")),
        }
    }
}
