use std::fmt;
use std::str::FromStr;

use crate::error::{BoardError, BoardResult};
use crate::BOARD_SIZE;

/// A square on the board. Rows and columns both run `0..BOARD_SIZE`; row 0 is
/// the Light back rank.
///
/// A `Position` is always on the board: the fields are private and every
/// constructor checks bounds, so code holding one never has to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    /// Like [`Position::new`], but reports the rejected coordinate.
    pub fn try_new(row: usize, col: usize) -> BoardResult<Self> {
        Self::new(row, col).ok_or(BoardError::OutOfBounds { row, col })
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// The square `(d_row, d_col)` away, if it is still on the board.
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        let row = self.row as i32 + d_row;
        let col = self.col as i32 + d_col;
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as usize, col as usize)
    }

    /// Every square, row by row.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| {
            (0..BOARD_SIZE).map(move |col| Position { row: row as u8, col: col as u8 })
        })
    }

    /// Parses `<file><rank>` with files `a..p` and ranks `1..16`, where the
    /// file is the column and rank `n` is row `n - 1`.
    pub fn from_algebraic(notation: &str) -> BoardResult<Self> {
        let invalid = || BoardError::InvalidSquare(notation.to_string());
        let mut chars = notation.chars();
        let file = chars.next().ok_or_else(invalid)?.to_ascii_lowercase();
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let rank: usize = digits.parse().map_err(|_| invalid())?;

        if !file.is_ascii_lowercase() || rank == 0 {
            return Err(invalid());
        }
        let col = (file as u8 - b'a') as usize;
        Self::new(rank - 1, col).ok_or_else(invalid)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Position {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s.trim())
    }
}
