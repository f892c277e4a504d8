use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Line {line} is not a score: {content:?}")]
    InvalidLine { line: usize, content: String },
}

/// Best total scores, highest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    scores: Vec<u32>,
}

impl Leaderboard {
    pub const MAX_ENTRIES: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one score per line. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, ScoreError> {
        let mut scores = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let score: u32 = line.parse().map_err(|_| ScoreError::InvalidLine {
                line: index + 1,
                content: line.into(),
            })?;
            scores.push(score);
        }

        Ok(Self::from_scores(scores))
    }

    pub fn from_scores(mut scores: Vec<u32>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(Self::MAX_ENTRIES);
        Self { scores }
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Adds `score` and returns its 1-based rank, or `None` if it did not make the board.
    pub fn record(&mut self, score: u32) -> Option<usize> {
        // ties rank below the scores already there
        let index = self.scores.partition_point(|&existing| existing >= score);
        if index >= Self::MAX_ENTRIES {
            return None;
        }
        self.scores.insert(index, score);
        self.scores.truncate(Self::MAX_ENTRIES);
        Some(index + 1)
    }
}

impl fmt::Display for Leaderboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for score in &self.scores {
            writeln!(f, "{score}")?;
        }
        Ok(())
    }
}
