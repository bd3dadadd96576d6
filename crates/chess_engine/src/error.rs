use chess_core::BoardError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Configuration that cannot produce a playable game
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}

pub type GameResult<T> = Result<T, GameError>;
