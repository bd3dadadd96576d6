// Board model and movement rules for the 16x16 game
pub mod board;
pub mod error;
pub mod layout;
pub mod moves;
pub mod piece;
pub mod position;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 16;

// Re-export main types for convenience
pub use board::Board;
pub use error::{BoardError, BoardResult};
pub use layout::BackRankLayout;
pub use moves::{is_legal, legal_destinations_from, legal_moves, Move};
pub use piece::{Piece, PieceType, Side};
pub use position::Position;
