//! High-score persistence: a single `high_score` field in a JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HighScoreError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Record {
    #[serde(default)]
    high_score: u32,
}

#[derive(Clone, Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score.  A missing or unreadable file means no score yet.
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => score,
            Err(HighScoreError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => {
                tracing::warn!("{}; starting from 0", e);
                0
            }
        }
    }

    pub fn try_load(&self) -> Result<u32, HighScoreError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| HighScoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let record: Record = serde_json::from_str(&raw).map_err(|source| HighScoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        Ok(record.high_score)
    }

    pub fn save(&self, score: u32) -> Result<(), HighScoreError> {
        let body = serde_json::to_string_pretty(&Record { high_score: score }).map_err(|source| {
            HighScoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, body).map_err(|source| HighScoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Persist `score` only if it beats what is stored.  Returns whether it
    /// was written.
    pub fn record(&self, score: u32) -> Result<bool, HighScoreError> {
        if score <= self.load() {
            return Ok(false);
        }
        self.save(score)?;
        tracing::info!(score, path = %self.path.display(), "New high score");
        Ok(true)
    }
}
