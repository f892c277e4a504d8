use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Cell has no stones left")]
    EmptyCell,
    #[error("Tray has no free slot")]
    TrayFull,
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Board shape is not a non-empty rectangle")]
    InvalidBoardShape,
    #[error("Board has no stones to play")]
    EmptyBoard,
    #[error("Symbol {0} is out of range")]
    InvalidSymbol(u8),
}

pub type Result<T> = core::result::Result<T, GameError>;
