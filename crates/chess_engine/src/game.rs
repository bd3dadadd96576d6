// Game state and the select-then-move input state machine

use chess_core::{is_legal, BackRankLayout, Board, Move, Piece, Position, Side};
use log::{debug, info};

use crate::config::GameConfig;

/// Where the input state machine stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the human to pick one of their pieces.
    AwaitingSelection,
    /// A piece is picked; the next activation names its destination.
    AwaitingDestination(Position),
    /// The automated side is to move. Human input is ignored.
    Resolving,
}

/// What a square activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Nothing changed: not the human's turn, or the square holds no piece
    /// of the side to move.
    Ignored,
    /// A piece was picked up.
    Selected(Position),
    /// The pending move was not legal and has been dropped.
    Rejected(Move),
    Moved { mv: Move, captured: Option<Piece> },
}

impl Activation {
    pub fn changed_state(&self) -> bool {
        !matches!(self, Activation::Ignored)
    }
}

/// Moves only happen through [`GameState::activate_square`]; there is no
/// public way to submit an arbitrary move or skip a turn.
///
/// ```compile_fail
/// use chess_engine::{new_game, GameConfig};
/// let mut state = new_game(&GameConfig::default());
/// state.forfeit();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Side,
    move_count: u32,
    human: Side,
    phase: Phase,
}

impl GameState {
    /// Starting position, Light to move.
    pub fn new(layout: BackRankLayout, human: Side) -> Self {
        Self::from_board(Board::with_layout(layout), Side::Light, human)
    }

    /// A game from an arbitrary position with `turn` to move.
    pub fn from_board(board: Board, turn: Side, human: Side) -> Self {
        let mut state = Self {
            board,
            turn,
            move_count: 0,
            human,
            phase: Phase::AwaitingSelection,
        };
        state.reset_phase();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn human_side(&self) -> Side {
        self.human
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> Option<Position> {
        match self.phase {
            Phase::AwaitingDestination(from) => Some(from),
            _ => None,
        }
    }

    pub fn is_automated_turn(&self) -> bool {
        self.turn != self.human
    }

    /// Handles the human picking `square`.
    pub fn activate_square(&mut self, square: Position) -> Activation {
        match self.phase {
            Phase::Resolving => Activation::Ignored,
            Phase::AwaitingSelection => match self.board.get_piece(square) {
                Some(piece) if piece.side == self.turn => {
                    debug!("selected {} on {square}", piece);
                    self.phase = Phase::AwaitingDestination(square);
                    Activation::Selected(square)
                }
                _ => Activation::Ignored,
            },
            Phase::AwaitingDestination(from) => {
                let mv = Move::new(from, square);
                if is_legal(&self.board, self.turn, from, square) {
                    let captured = self.commit(mv);
                    Activation::Moved { mv, captured }
                } else {
                    debug!("rejected {mv} for {}", self.turn);
                    self.phase = Phase::AwaitingSelection;
                    Activation::Rejected(mv)
                }
            }
        }
    }

    /// Plays `mv` for the side to move if it is legal. Only the controller
    /// calls this, for the automated side.
    pub(crate) fn play(&mut self, mv: Move) -> Option<Option<Piece>> {
        if !is_legal(&self.board, self.turn, mv.from, mv.to) {
            return None;
        }
        Some(self.commit(mv))
    }

    /// Ends the current turn without moving.
    pub(crate) fn forfeit(&mut self) {
        info!("{} has no legal move and forfeits the turn", self.turn);
        self.turn = self.turn.opposite();
        self.reset_phase();
    }

    fn commit(&mut self, mv: Move) -> Option<Piece> {
        let captured = self.board.move_piece(mv.from, mv.to);
        self.move_count += 1;
        match captured {
            Some(piece) => info!("move {}: {} {mv} takes {piece}", self.move_count, self.turn),
            None => info!("move {}: {} {mv}", self.move_count, self.turn),
        }
        self.turn = self.turn.opposite();
        self.reset_phase();
        captured
    }

    fn reset_phase(&mut self) {
        self.phase = if self.is_automated_turn() {
            Phase::Resolving
        } else {
            Phase::AwaitingSelection
        };
    }
}

/// A fresh game for `config`.
pub fn new_game(config: &GameConfig) -> GameState {
    GameState::new(config.layout, config.human_side)
}

/// By-value form of [`GameState::activate_square`].
pub fn activate_square(mut state: GameState, square: Position) -> (GameState, Activation) {
    let activation = state.activate_square(square);
    (state, activation)
}
