use thiserror::Error;

/// Errors raised by the board model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate outside `[0, BOARD_SIZE)` on either axis.
    #[error("square ({row}, {col}) is outside the {size}x{size} board", size = crate::BOARD_SIZE)]
    OutOfBounds { row: usize, col: usize },

    /// Square notation that does not name a square, e.g. `"q3"` or `"a17"`.
    #[error("invalid square notation: {0:?}")]
    InvalidSquare(String),

    /// Character in a board diagram that is not a piece symbol or `.`.
    #[error("unknown piece symbol {0:?}")]
    UnknownPiece(char),

    #[error("malformed board diagram: {0}")]
    MalformedDiagram(String),
}

pub type BoardResult<T> = Result<T, BoardError>;
