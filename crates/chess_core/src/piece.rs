use std::fmt;

use crate::error::{BoardError, BoardResult};

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Light,
    Dark,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Light => Side::Dark,
            Side::Dark => Side::Light,
        }
    }

    /// Row delta of a pawn advance. Light starts at row 0 and moves up the
    /// board, Dark starts at the far edge and moves down.
    pub fn forward(self) -> i32 {
        match self {
            Side::Light => 1,
            Side::Dark => -1,
        }
    }

    pub fn back_rank(self) -> usize {
        match self {
            Side::Light => 0,
            Side::Dark => crate::BOARD_SIZE - 1,
        }
    }

    /// The rank pawns start on, and the only rank a double step is allowed from.
    pub fn pawn_rank(self) -> usize {
        match self {
            Side::Light => 1,
            Side::Dark => crate::BOARD_SIZE - 2,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Light => write!(f, "light"),
            Side::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Queen,
        PieceType::King,
    ];

    pub fn symbol(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Rook => 'R',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }
}

/// A piece never changes once placed; moving relocates it on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub side: Side,
}

impl Piece {
    pub fn new(piece_type: PieceType, side: Side) -> Self {
        Self { piece_type, side }
    }

    /// Diagram symbol: upper case for Light, lower case for Dark.
    pub fn symbol(self) -> char {
        let c = self.piece_type.symbol();
        match self.side {
            Side::Light => c,
            Side::Dark => c.to_ascii_lowercase(),
        }
    }

    pub fn from_symbol(c: char) -> BoardResult<Self> {
        let side = if c.is_ascii_uppercase() { Side::Light } else { Side::Dark };
        PieceType::ALL
            .into_iter()
            .find(|kind| kind.symbol() == c.to_ascii_uppercase())
            .map(|kind| Piece::new(kind, side))
            .ok_or(BoardError::UnknownPiece(c))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
