use std::fmt;
use std::str::FromStr;

use crate::piece::PieceType;
use crate::BOARD_SIZE;

/// Back-rank pieces, left to right.
pub const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

const _: () = assert!(BOARD_SIZE >= BACK_RANK.len());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackRankLayout {
    /// Rook, knight, bishop, queen from the left edge and king, bishop,
    /// knight, rook against the right edge. Middle columns are empty.
    #[default]
    Split,
    /// All eight pieces in the middle eight columns.
    Centered,
    /// All eight pieces from the left edge.
    LeftAligned,
}

impl BackRankLayout {
    /// Column of each entry of [`BACK_RANK`].
    pub fn columns(self) -> [usize; 8] {
        let half = BACK_RANK.len() / 2;
        let mut cols = [0; 8];
        for (i, col) in cols.iter_mut().enumerate() {
            *col = match self {
                BackRankLayout::Split if i < half => i,
                BackRankLayout::Split => BOARD_SIZE - BACK_RANK.len() + i,
                BackRankLayout::Centered => (BOARD_SIZE - BACK_RANK.len()) / 2 + i,
                BackRankLayout::LeftAligned => i,
            };
        }
        cols
    }

    /// `(column, piece)` pairs for one back rank.
    pub fn placements(self) -> impl Iterator<Item = (usize, PieceType)> {
        self.columns().into_iter().zip(BACK_RANK)
    }
}

impl fmt::Display for BackRankLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackRankLayout::Split => "split",
            BackRankLayout::Centered => "centered",
            BackRankLayout::LeftAligned => "left",
        };
        f.write_str(name)
    }
}

impl FromStr for BackRankLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "split" => Ok(BackRankLayout::Split),
            "centered" | "center" => Ok(BackRankLayout::Centered),
            "left" | "left-aligned" => Ok(BackRankLayout::LeftAligned),
            other => Err(format!("unknown back-rank layout {other:?}")),
        }
    }
}
