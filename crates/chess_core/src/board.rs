use std::fmt;

use log::debug;

use crate::error::{BoardError, BoardResult};
use crate::layout::BackRankLayout;
use crate::{Piece, PieceType, Position, Side, BOARD_SIZE};

/// The grid of squares. The board answers "what is where" and relocates
/// pieces on request; whether a relocation is allowed is decided by the rules
/// in [`crate::moves`] before anyone calls [`Board::move_piece`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Starting position with the default back-rank layout.
    pub fn new() -> Self {
        Self::with_layout(BackRankLayout::default())
    }

    pub fn with_layout(layout: BackRankLayout) -> Self {
        let mut board = Self::empty();
        board.setup_initial_position(layout);
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Clears the board and places both sides: the back rank per `layout`
    /// and a full rank of pawns in front of it.
    pub fn setup_initial_position(&mut self, layout: BackRankLayout) {
        self.squares = [[None; BOARD_SIZE]; BOARD_SIZE];

        for side in [Side::Light, Side::Dark] {
            let pawn_rank = side.pawn_rank();
            for col in 0..BOARD_SIZE {
                self.squares[pawn_rank][col] = Some(Piece::new(PieceType::Pawn, side));
            }

            let back_rank = side.back_rank();
            for (col, piece_type) in layout.placements() {
                self.squares[back_rank][col] = Some(Piece::new(piece_type, side));
            }
        }
        debug!("board set up with {layout} back ranks");
    }

    pub fn get_piece(&self, pos: Position) -> Option<&Piece> {
        self.squares[pos.row()][pos.col()].as_ref()
    }

    /// Bounds-checked lookup by raw coordinates.
    pub fn piece_at(&self, row: usize, col: usize) -> BoardResult<Option<Piece>> {
        let pos = Position::try_new(row, col)?;
        Ok(self.get_piece(pos).copied())
    }

    /// Puts `piece` on `pos` (or clears it), replacing whatever was there.
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[pos.row()][pos.col()] = piece;
    }

    /// Bounds-checked [`Board::set`] by raw coordinates.
    pub fn set_at(&mut self, row: usize, col: usize, piece: Option<Piece>) -> BoardResult<()> {
        let pos = Position::try_new(row, col)?;
        self.set(pos, piece);
        Ok(())
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get_piece(pos).is_some()
    }

    /// Moves the piece on `from` to `to` and empties `from`. Anything on `to`
    /// is captured and returned. Does not consult the rules.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        if from == to {
            return None;
        }
        let piece = self.squares[from.row()][from.col()].take();
        std::mem::replace(&mut self.squares[to.row()][to.col()], piece)
    }

    /// Every piece of `side` with its square, row by row.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| {
            self.get_piece(pos)
                .filter(|piece| piece.side == side)
                .map(|piece| (pos, *piece))
        })
    }

    pub fn count(&self, side: Side, piece_type: PieceType) -> usize {
        self.pieces(side)
            .filter(|(_, piece)| piece.piece_type == piece_type)
            .count()
    }

    /// Parses a diagram in the format produced by `Display`: one line per
    /// row, highest row first, one symbol per column. `.` is an empty square,
    /// upper case is Light, lower case is Dark. Whitespace inside a line and
    /// blank lines are ignored.
    pub fn from_diagram(diagram: &str) -> BoardResult<Self> {
        let rows: Vec<Vec<char>> = diagram
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE {
            return Err(BoardError::MalformedDiagram(format!(
                "expected {BOARD_SIZE} rows, found {}",
                rows.len()
            )));
        }

        let mut board = Self::empty();
        for (i, symbols) in rows.iter().enumerate() {
            let row = BOARD_SIZE - 1 - i;
            if symbols.len() != BOARD_SIZE {
                return Err(BoardError::MalformedDiagram(format!(
                    "row {} has {} squares, expected {BOARD_SIZE}",
                    row + 1,
                    symbols.len()
                )));
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                if symbol != '.' {
                    board.set_at(row, col, Some(Piece::from_symbol(symbol)?))?;
                }
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.squares.iter().rev() {
            for square in row {
                let symbol = square.map_or('.', |piece| piece.symbol());
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn initial_position_has_full_pawn_ranks_and_one_royal_pair_per_side() {
        let board = Board::new();
        for side in [Side::Light, Side::Dark] {
            assert_eq!(board.count(side, PieceType::Pawn), BOARD_SIZE);
            assert_eq!(board.count(side, PieceType::King), 1);
            assert_eq!(board.count(side, PieceType::Queen), 1);
            assert_eq!(board.count(side, PieceType::Rook), 2);
            assert_eq!(board.count(side, PieceType::Knight), 2);
            assert_eq!(board.count(side, PieceType::Bishop), 2);

            for col in 0..BOARD_SIZE {
                let pawn = board.get_piece(pos(side.pawn_rank(), col));
                assert_eq!(pawn, Some(&Piece::new(PieceType::Pawn, side)));
            }
        }
        assert_eq!(board.pieces(Side::Light).count(), 24);
        assert_eq!(board.pieces(Side::Dark).count(), 24);
    }

    #[test]
    fn split_layout_leaves_the_middle_of_the_back_rank_empty() {
        let board = Board::new();
        assert_eq!(board.get_piece(pos(0, 0)).map(|p| p.piece_type), Some(PieceType::Rook));
        assert_eq!(board.get_piece(pos(0, 3)).map(|p| p.piece_type), Some(PieceType::Queen));
        assert_eq!(board.get_piece(pos(0, 12)).map(|p| p.piece_type), Some(PieceType::King));
        assert_eq!(board.get_piece(pos(15, 15)).map(|p| p.piece_type), Some(PieceType::Rook));
        for col in 4..12 {
            assert!(!board.is_occupied(pos(0, col)));
            assert!(!board.is_occupied(pos(15, col)));
        }
        for row in 2..14 {
            for col in 0..BOARD_SIZE {
                assert!(!board.is_occupied(pos(row, col)));
            }
        }
    }

    #[test]
    fn centered_layout_mirrors_between_sides() {
        let board = Board::with_layout(BackRankLayout::Centered);
        for col in 0..BOARD_SIZE {
            let light = board.get_piece(pos(0, col)).map(|p| p.piece_type);
            let dark = board.get_piece(pos(15, col)).map(|p| p.piece_type);
            assert_eq!(light, dark);
        }
        assert_eq!(board.get_piece(pos(0, 8)).map(|p| p.piece_type), Some(PieceType::King));
    }

    #[test]
    fn raw_accessors_reject_out_of_bounds() {
        let mut board = Board::empty();
        assert_eq!(
            board.piece_at(16, 0),
            Err(BoardError::OutOfBounds { row: 16, col: 0 })
        );
        let rook = Piece::new(PieceType::Rook, Side::Dark);
        assert_eq!(
            board.set_at(0, 20, Some(rook)),
            Err(BoardError::OutOfBounds { row: 0, col: 20 })
        );
        board.set_at(5, 5, Some(rook)).unwrap();
        assert_eq!(board.piece_at(5, 5), Ok(Some(rook)));
    }

    #[test]
    fn move_piece_captures_whatever_is_on_the_destination() {
        let mut board = Board::empty();
        let rook = Piece::new(PieceType::Rook, Side::Light);
        let knight = Piece::new(PieceType::Knight, Side::Dark);
        board.set(pos(2, 2), Some(rook));
        board.set(pos(2, 9), Some(knight));

        assert_eq!(board.move_piece(pos(2, 2), pos(2, 9)), Some(knight));
        assert_eq!(board.get_piece(pos(2, 9)), Some(&rook));
        assert!(!board.is_occupied(pos(2, 2)));

        assert_eq!(board.move_piece(pos(2, 9), pos(2, 9)), None);
        assert_eq!(board.get_piece(pos(2, 9)), Some(&rook));
    }

    #[test]
    fn diagram_matches_display() {
        let board = Board::new();
        let text = board.to_string();
        assert_eq!(text.lines().count(), BOARD_SIZE);
        assert_eq!(text.lines().next(), Some("rnbq........kbnr"));
        assert_eq!(text.lines().last(), Some("RNBQ........KBNR"));
        assert_eq!(Board::from_diagram(&text), Ok(board));
    }

    #[test]
    fn malformed_diagrams_fail_loudly() {
        assert!(matches!(
            Board::from_diagram("........"),
            Err(BoardError::MalformedDiagram(_))
        ));

        let mut rows = vec!["................"; BOARD_SIZE];
        rows[3] = ".......x........";
        assert_eq!(
            Board::from_diagram(&rows.join("\n")),
            Err(BoardError::UnknownPiece('x'))
        );

        rows[3] = "...";
        assert!(matches!(
            Board::from_diagram(&rows.join("\n")),
            Err(BoardError::MalformedDiagram(_))
        ));
    }
}
