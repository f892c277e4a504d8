use core::str::FromStr;
use stonestack_core::{Coord, Coord2};
use thiserror::Error;

/// A line typed at the prompt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Pick(Coord2),
    Undo,
    /// Set the remaining seconds directly.
    Tick(i64),
    Show,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, expected pick, undo, tick, show or quit")]
    Unknown(String),
    #[error("{command} expects {expected}")]
    Arguments {
        command: &'static str,
        expected: &'static str,
    },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("pick" | "p", [row, col]) => {
                let bad = || CommandError::Arguments {
                    command: "pick",
                    expected: "ROW COL",
                };
                let row: Coord = row.parse().map_err(|_| bad())?;
                let col: Coord = col.parse().map_err(|_| bad())?;
                Ok(Self::Pick((row, col)))
            }
            ("pick" | "p", _) => Err(CommandError::Arguments {
                command: "pick",
                expected: "ROW COL",
            }),
            ("undo" | "u", []) => Ok(Self::Undo),
            ("tick" | "t", [secs]) => secs.parse().map(Self::Tick).map_err(|_| {
                CommandError::Arguments {
                    command: "tick",
                    expected: "SECONDS",
                }
            }),
            ("tick" | "t", _) => Err(CommandError::Arguments {
                command: "tick",
                expected: "SECONDS",
            }),
            ("show" | "s", []) => Ok(Self::Show),
            ("quit" | "q" | "exit", []) => Ok(Self::Quit),
            ("undo" | "u" | "show" | "s" | "quit" | "q" | "exit", _) => {
                Err(CommandError::Arguments {
                    command: "this command",
                    expected: "no arguments",
                })
            }
            _ => Err(CommandError::Unknown(name.into())),
        }
    }
}
