//! Leaderboard persistence - a flat JSON list of name/points rows.
//!
//! Deliberately simple: no versioning, no dedup, overwrite-on-save. The file
//! is shared with whatever frontend wants to render a highscore table.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use liftyard_logic::score::ScoreRecord;
use serde::{Deserialize, Serialize};

/// On-disk shape: `{"items": [{"name": ..., "points": ...}, ...]}`.
#[derive(Serialize, Deserialize, Default)]
struct ScoreFile {
    items: Vec<ScoreRecord>,
}

/// Errors that can occur reading or writing the score file.
#[derive(Debug)]
pub enum LeaderboardError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl From<io::Error> for LeaderboardError {
    fn from(e: io::Error) -> Self {
        LeaderboardError::Io(e)
    }
}

impl From<serde_json::Error> for LeaderboardError {
    fn from(e: serde_json::Error) -> Self {
        LeaderboardError::Json(e)
    }
}

impl std::fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaderboardError::Io(e) => write!(f, "IO error: {}", e),
            LeaderboardError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for LeaderboardError {}

/// In-memory copy of the score table, bound to its file path.
#[derive(Debug)]
pub struct Leaderboard {
    path: PathBuf,
    pub scores: Vec<ScoreRecord>,
}

impl Leaderboard {
    /// Load the table from `path`. A missing file is an empty table, not an
    /// error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, LeaderboardError> {
        let path = path.into();
        let scores = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<ScoreFile>(&contents)?.items,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no score file at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, scores })
    }

    /// Write the whole table back, replacing the file.
    pub fn save(&self) -> Result<(), LeaderboardError> {
        let file = ScoreFile {
            items: self.scores.clone(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }

    /// Append a finished round's record. Duplicate names are kept; every
    /// round is a row.
    pub fn append(&mut self, record: ScoreRecord) {
        self.scores.push(record);
    }

    /// Best `n` rows, highest points first. Ties keep insertion order.
    pub fn top(&self, n: usize) -> Vec<&ScoreRecord> {
        let mut sorted: Vec<&ScoreRecord> = self.scores.iter().collect();
        sorted.sort_by(|a, b| b.points.cmp(&a.points));
        sorted.truncate(n);
        sorted
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
