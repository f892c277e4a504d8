use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use stonestack_core::{Difficulty, RandomBoardGenerator, Session, SessionState, SlotScan};

mod command;
mod play;
mod render;
mod scores;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Play a game, reading commands from stdin
    Play(PlayArgs),
    /// Print the leaderboard
    Scores {
        /// Leaderboard file
        #[arg(long, default_value = "scores.txt")]
        scores: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct PlayArgs {
    #[arg(short, long, value_enum, default_value_t = DifficultyArg::Easy)]
    difficulty: DifficultyArg,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Leaderboard file
    #[arg(long, default_value = "scores.txt")]
    scores: PathBuf,

    /// Print each frame as a JSON snapshot
    #[arg(long)]
    json: bool,

    /// Let picked stones use every tray slot, not just the unlocked ones
    #[arg(long)]
    legacy_tray_scan: bool,

    /// Ignore the wall clock, only `tick` commands move the countdown
    #[arg(long)]
    manual_clock: bool,
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match args.mode {
        Mode::Play(play_args) => {
            let state = start(play_args)?;
            log::debug!("Finished in state {state:?}");
        }
        Mode::Scores { scores } => {
            let board = scores::load(&scores)?;
            print!("{}", render::leaderboard(&board));
        }
    }
    Ok(())
}

fn start(args: PlayArgs) -> Result<SessionState> {
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");

    let mut config = Difficulty::from(args.difficulty).config();
    if args.legacy_tray_scan {
        config.tray.scan = SlotScan::MaxCapacity;
    }
    let session = Session::from_config(config, RandomBoardGenerator::new(seed));

    let options = play::PlayOptions {
        scores_path: args.scores,
        json: args.json,
        manual_clock: args.manual_clock,
    };
    play::run(session, &options, io::stdin().lock(), io::stdout().lock())
}
