/// High-score persistence: one non-negative integer under a fixed key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const HIGH_SCORE_FILE: &str = ".corporate_runner_high_score";

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("stored high score is not an integer: {0:?}")]
    Corrupt(String),
}

pub trait HighScoreStore {
    /// Stored high score, or 0 when absent or unreadable.
    fn read_high_score(&self) -> u32;

    fn write_high_score(&mut self, score: u32) -> Result<(), StoreError>;
}

fn parse_score(raw: &str) -> Result<u32, StoreError> {
    raw.trim()
        .parse()
        .map_err(|_| StoreError::Corrupt(raw.to_string()))
}

// ── File store ────────────────────────────────────────────────────────────────

/// Stores the score as decimal text in a single file.
#[derive(Clone, Debug)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> FileHighScoreStore {
        FileHighScoreStore { path: path.into() }
    }

    /// `$HOME/.corporate_runner_high_score`, or the working directory
    /// when `HOME` is unset.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(HIGH_SCORE_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_read(&self) -> Result<u32, StoreError> {
        let raw = fs::read_to_string(&self.path)?;
        parse_score(&raw)
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        FileHighScoreStore::new(FileHighScoreStore::default_path())
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn read_high_score(&self) -> u32 {
        self.try_read().unwrap_or(0)
    }

    fn write_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        fs::write(&self.path, score.to_string())?;
        Ok(())
    }
}

// ── In-memory store ───────────────────────────────────────────────────────────

/// Keeps the raw stored text in memory, so corrupt values can be simulated.
#[derive(Clone, Debug, Default)]
pub struct MemoryHighScoreStore {
    raw: Option<String>,
    writes: usize,
}

impl MemoryHighScoreStore {
    pub fn new() -> MemoryHighScoreStore {
        MemoryHighScoreStore::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> MemoryHighScoreStore {
        MemoryHighScoreStore { raw: Some(raw.into()), writes: 0 }
    }

    pub fn with_score(score: u32) -> MemoryHighScoreStore {
        MemoryHighScoreStore::with_raw(score.to_string())
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn read_high_score(&self) -> u32 {
        self.raw
            .as_deref()
            .and_then(|raw| parse_score(raw).ok())
            .unwrap_or(0)
    }

    fn write_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        self.raw = Some(score.to_string());
        self.writes += 1;
        Ok(())
    }
}
