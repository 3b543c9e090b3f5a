//! High score persistence
//!
//! The session only ever reads one integer at start-up and writes it back
//! when it grows. Stores are best effort: a store that cannot read reports
//! 0, and a failed write is logged and dropped.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::warn;

/// Persistent storage for the best score
pub trait HighScoreStore: Send + Sync {
    /// Stored high score, or 0 when nothing is stored
    fn read_high_score(&self) -> u32;

    /// Record a new high score; failures are not reported
    fn write_high_score(&self, score: u32);
}

/// Used when no storage is available: reads 0, drops writes
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStorage;

impl HighScoreStore for NoStorage {
    fn read_high_score(&self) -> u32 {
        0
    }

    fn write_high_score(&self, _score: u32) {}
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    score: AtomicU32,
}

impl MemoryStore {
    pub fn new(score: u32) -> Self {
        Self {
            score: AtomicU32::new(score),
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn read_high_score(&self) -> u32 {
        self.score.load(Ordering::Relaxed)
    }

    fn write_high_score(&self, score: u32) {
        self.score.store(score, Ordering::Relaxed);
    }
}

/// On-disk record
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// High score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score; a missing file counts as 0
    pub fn load(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let record: HighScoreRecord =
            serde_json::from_str(&json).context("Failed to deserialize high score")?;

        Ok(record.high_score)
    }

    /// Write the score, creating parent directories if needed
    pub fn save(&self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string(&HighScoreRecord { high_score: score })
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}

impl HighScoreStore for FileStore {
    fn read_high_score(&self) -> u32 {
        self.load().unwrap_or_else(|err| {
            warn!(error = %format!("{err:#}"), "high score unavailable, starting from 0");
            0
        })
    }

    fn write_high_score(&self, score: u32) {
        if let Err(err) = self.save(score) {
            warn!(error = %format!("{err:#}"), score, "dropping high score write");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_storage() {
        let store = NoStorage;
        store.write_high_score(10);
        assert_eq!(store.read_high_score(), 0);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new(3);
        assert_eq!(store.read_high_score(), 3);
        store.write_high_score(4);
        assert_eq!(store.read_high_score(), 4);
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("scores.json"));
        assert_eq!(store.load().unwrap(), 0);
        assert_eq!(store.read_high_score(), 0);
    }

    #[test]
    fn test_file_store_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("scores.json");

        FileStore::new(&path).write_high_score(17);
        assert!(path.exists());

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.read_high_score(), 17);
    }

    #[test]
    fn test_file_store_corrupt_reads_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.load().is_err());
        assert_eq!(store.read_high_score(), 0);
    }
}
