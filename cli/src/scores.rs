use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use stonestack_core::Leaderboard;

/// Reads the leaderboard file, treating a missing file as an empty board.
pub fn load(path: &Path) -> Result<Leaderboard> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::debug!("No leaderboard at {}, starting empty", path.display());
            return Ok(Leaderboard::new());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Reading {}", path.display()));
        }
    };

    Leaderboard::parse(&text).with_context(|| format!("Parsing {}", path.display()))
}

/// Adds `score` to the leaderboard file and returns the updated board with the new rank.
pub fn record(path: &Path, score: u32) -> Result<(Leaderboard, Option<usize>)> {
    let mut board = load(path)?;
    let rank = board.record(score);
    fs::write(path, board.to_string()).with_context(|| format!("Writing {}", path.display()))?;
    log::info!("Recorded score {score} at rank {rank:?}");
    Ok((board, rank))
}
