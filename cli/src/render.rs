use std::fmt::Write as _;
use stonestack_core::{Leaderboard, LossReason, SessionSnapshot, SessionState};

/// Plain-text frame: header line, the board with `symbol/height` per cell, then the tray.
pub fn text(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "time {}s  score {}  total {}",
        snapshot.remaining_secs.max(0),
        snapshot.score,
        snapshot.total_score
    );

    let (rows, cols) = snapshot.size;
    out.push_str("   ");
    for col in 0..cols {
        let _ = write!(out, "{col:>6}");
    }
    out.push('\n');
    for row in 0..rows {
        let _ = write!(out, "{row:>3}");
        for col in 0..cols {
            let cell = snapshot.cells[(usize::from(row), usize::from(col))];
            match cell.top {
                Some(top) => {
                    let _ = write!(out, "{:>6}", format!("{top}/{}", cell.height));
                }
                None => out.push_str("     ."),
            }
        }
        out.push('\n');
    }

    out.push_str("tray");
    for (index, slot) in snapshot.tray.iter().enumerate() {
        let locked = index >= usize::from(snapshot.tray_capacity);
        match (slot, locked) {
            (Some(symbol), _) => {
                let _ = write!(out, " [{symbol:>2}]");
            }
            (None, false) => out.push_str(" [  ]"),
            (None, true) => out.push_str("  -- "),
        }
    }
    out.push('\n');
    out
}

pub fn outcome(state: SessionState, reason: Option<LossReason>, total_score: u32) -> String {
    match (state, reason) {
        (SessionState::Won, _) => format!("Board cleared! Total score {total_score}"),
        (SessionState::Lost, Some(LossReason::TimeUp)) => "Out of time, game lost".into(),
        (SessionState::Lost, _) => "Tray jammed with nothing to match, game lost".into(),
        (SessionState::InProgress, _) => "Game abandoned".into(),
    }
}

pub fn leaderboard(board: &Leaderboard) -> String {
    if board.is_empty() {
        return "No recorded scores\n".into();
    }

    let mut out = String::from("Leaderboard\n");
    for (rank, score) in board.scores().iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {score}", rank + 1);
    }
    out
}
