use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use stonestack_core::{Session, SessionSnapshot, SessionState};
use web_time::Instant;

use crate::command::Command;
use crate::{render, scores};

#[derive(Clone, Debug)]
pub struct PlayOptions {
    pub scores_path: PathBuf,
    pub json: bool,
    /// Only `tick` commands move the countdown.
    pub manual_clock: bool,
}

/// Feeds commands from `input` to `session` until the game ends or the player quits.
pub fn run(
    mut session: Session,
    options: &PlayOptions,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<SessionState> {
    let started_at = Instant::now();
    show(&session, options, &mut out)?;

    for line in input.lines() {
        let line = line.context("Reading command")?;

        if !options.manual_clock {
            let elapsed = u32::try_from(started_at.elapsed().as_secs()).unwrap_or(u32::MAX);
            session.tick_elapsed(elapsed)?;
            if session.is_finished() {
                break;
            }
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        log::trace!("command: {command:?}");

        let accepted = match command {
            Command::Pick(coords) => session.pick(coords).map(|report| {
                if report.matched {
                    log::debug!("Cleared symbol {}", report.symbol);
                }
            }),
            Command::Undo => session.undo().map(drop),
            Command::Tick(remaining) => session.tick(remaining).map(drop),
            Command::Show => Ok(()),
            Command::Quit => break,
        };

        match accepted {
            Ok(()) => show(&session, options, &mut out)?,
            Err(err) => writeln!(out, "rejected: {err}")?,
        }

        if session.is_finished() {
            break;
        }
    }

    finish(&session, options, &mut out)?;
    Ok(session.state())
}

fn show(session: &Session, options: &PlayOptions, out: &mut impl Write) -> Result<()> {
    let snapshot = SessionSnapshot::from_session(session);
    if options.json {
        serde_json::to_writer(&mut *out, &snapshot).context("Encoding snapshot")?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render::text(&snapshot))?;
    }
    Ok(())
}

fn finish(session: &Session, options: &PlayOptions, out: &mut impl Write) -> Result<()> {
    let state = session.state();
    writeln!(
        out,
        "{}",
        render::outcome(state, session.loss_reason(), session.total_score())
    )?;

    let board = match state {
        SessionState::Won => {
            let (board, rank) = scores::record(&options.scores_path, session.total_score())?;
            if let Some(rank) = rank {
                writeln!(out, "New high score, rank {rank}")?;
            }
            board
        }
        SessionState::Lost => scores::load(&options.scores_path)?,
        SessionState::InProgress => return Ok(()),
    };
    write!(out, "{}", render::leaderboard(&board))?;
    Ok(())
}
