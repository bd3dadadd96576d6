use std::fmt;

use crate::{Board, Piece, PieceType, Position, Side};

/// A relocation from one square to another. Captures are implicit: whatever
/// stands on `to` is removed when the move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// Whether `side` may play this move on `board`. No check detection: a
    /// move that leaves the own king attacked is still legal.
    pub fn is_valid(&self, board: &Board, side: Side) -> bool {
        if self.from == self.to {
            return false;
        }

        let piece = match board.get_piece(self.from) {
            Some(p) if p.side == side => p,
            _ => return false,
        };

        // No self-capture
        if let Some(dest_piece) = board.get_piece(self.to) {
            if dest_piece.side == side {
                return false;
            }
        }

        self.is_valid_piece_movement(piece, board)
    }

    fn is_valid_piece_movement(&self, piece: &Piece, board: &Board) -> bool {
        match piece.piece_type {
            PieceType::Pawn => self.is_valid_pawn_move(piece.side, board),
            PieceType::Knight => self.is_valid_knight_move(),
            PieceType::Bishop => self.is_valid_diagonal_move(board),
            PieceType::Rook => self.is_valid_straight_move(board),
            PieceType::Queen => {
                self.is_valid_diagonal_move(board) || self.is_valid_straight_move(board)
            }
            PieceType::King => self.is_valid_king_move(),
        }
    }

    fn row_diff(&self) -> i32 {
        self.to.row() as i32 - self.from.row() as i32
    }

    fn col_diff(&self) -> i32 {
        self.to.col() as i32 - self.from.col() as i32
    }

    fn is_valid_pawn_move(&self, side: Side, board: &Board) -> bool {
        let direction = side.forward();
        let row_diff = self.row_diff();
        let col_diff = self.col_diff();

        if col_diff == 0 {
            if row_diff == direction {
                return !board.is_occupied(self.to);
            }
            // Double step, only from the starting rank
            if row_diff == 2 * direction && self.from.row() == side.pawn_rank() {
                return match self.from.offset(direction, 0) {
                    Some(between) => !board.is_occupied(between) && !board.is_occupied(self.to),
                    None => false,
                };
            }
            return false;
        }

        // Diagonal step is capture-only; same-side targets were rejected earlier
        if col_diff.abs() == 1 && row_diff == direction {
            return board
                .get_piece(self.to)
                .is_some_and(|target| target.side != side);
        }

        false
    }

    fn is_valid_knight_move(&self) -> bool {
        let row_diff = self.row_diff().abs();
        let col_diff = self.col_diff().abs();

        (row_diff == 2 && col_diff == 1) || (row_diff == 1 && col_diff == 2)
    }

    fn is_valid_diagonal_move(&self, board: &Board) -> bool {
        let row_diff = self.row_diff().abs();
        let col_diff = self.col_diff().abs();

        if row_diff != col_diff || row_diff == 0 {
            return false;
        }

        self.is_path_clear(board)
    }

    fn is_valid_straight_move(&self, board: &Board) -> bool {
        if self.row_diff() != 0 && self.col_diff() != 0 {
            return false;
        }

        self.is_path_clear(board)
    }

    fn is_valid_king_move(&self) -> bool {
        self.row_diff().abs() <= 1 && self.col_diff().abs() <= 1
    }

    /// True when every square strictly between `from` and `to` is empty.
    /// Only meaningful for moves along a rank, file or diagonal. The
    /// destination itself is not inspected.
    pub fn is_path_clear(&self, board: &Board) -> bool {
        let row_step = self.row_diff().signum();
        let col_step = self.col_diff().signum();

        let mut current = self.from.offset(row_step, col_step);
        while let Some(pos) = current {
            if pos == self.to {
                return true;
            }
            if board.is_occupied(pos) {
                return false;
            }
            current = pos.offset(row_step, col_step);
        }

        // Walked off the board without meeting `to`: not on a line.
        false
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Whether `side` may move the piece on `from` to `to`.
pub fn is_legal(board: &Board, side: Side, from: Position, to: Position) -> bool {
    Move::new(from, to).is_valid(board, side)
}

/// Every square the piece on `from` may move to, by testing the whole board.
/// Empty when `from` is empty or holds a piece of the other side.
pub fn legal_destinations_from(board: &Board, side: Side, from: Position) -> Vec<Position> {
    Position::all()
        .filter(|&to| is_legal(board, side, from, to))
        .collect()
}

/// Every legal move of `side`.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    board
        .pieces(side)
        .flat_map(|(from, _)| {
            legal_destinations_from(board, side, from)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}
