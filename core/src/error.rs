use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell index out of range")]
    InvalidIndex,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board shape does not match the 8x8 grid")]
    InvalidBoardShape,
    #[error("Cell state contradicts the mine layout")]
    InconsistentBoard,
}

pub type Result<T> = core::result::Result<T, GameError>;
