//! Statistics Store
//!
//! Cross-session aggregates persisted as a single pretty-printed JSON file.
//! A missing or unreadable file degrades to fresh zeroed statistics; losing
//! history is never fatal.
//!
//! Load-then-save is not atomic against a second running instance; the last
//! writer wins.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::StorageError;
use crate::quiz::SessionResult;

/// Display format of `lastQuizTimestamp`.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub total_quizzes: u32,
    pub total_correct: u32,
    pub total_questions: u32,
    pub best_score: u32,
    pub average_percentage: f64,
    /// Empty until the first session is recorded
    pub last_quiz_timestamp: String,
}

impl Statistics {
    pub fn has_history(&self) -> bool {
        self.total_quizzes > 0
    }

    /// Fold one finished or aborted session into the aggregates.
    pub fn fold<Tz>(&mut self, result: &SessionResult, at: &DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.total_quizzes = self.total_quizzes.saturating_add(1);
        self.total_correct = self.total_correct.saturating_add(result.score);
        self.total_questions = self.total_questions.saturating_add(result.attempted);
        self.best_score = self.best_score.max(result.score);
        self.average_percentage = if self.total_questions == 0 {
            0.0
        } else {
            f64::from(self.total_correct) / f64::from(self.total_questions) * 100.0
        };
        self.last_quiz_timestamp = at.format(TIMESTAMP_FORMAT).to_string();
    }
}

/// Exclusive owner of the on-disk statistics file.
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load statistics, falling back to zeroed defaults on any failure.
    pub fn load(&self) -> Statistics {
        match self.try_load() {
            Ok(Some(stats)) => stats,
            Ok(None) => {
                debug!("No statistics at {}, starting fresh", self.path.display());
                Statistics::default()
            }
            Err(e) => {
                warn!("{}; starting with empty statistics", e);
                Statistics::default()
            }
        }
    }

    /// Load statistics, reporting why the file could not be used.
    ///
    /// `Ok(None)` means there is no file yet.
    pub fn try_load(&self) -> Result<Option<Statistics>, StorageError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                path: self.path.clone(),
                message: e.to_string(),
            })
    }

    /// Overwrite the file with `stats`.
    pub fn save(&self, stats: &Statistics) -> Result<(), StorageError> {
        let json =
            serde_json::to_string_pretty(stats).map_err(|e| StorageError::Encode(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        std::fs::write(&self.path, json).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("Saved statistics to {}", self.path.display());
        Ok(())
    }
}
