use chess_core::{is_legal, legal_destinations_from, Board, Move, Position, Side, BOARD_SIZE};
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::SelectionPolicy;

/// The automated opponent. It does not evaluate positions: it picks a legal
/// move at random according to its [`SelectionPolicy`].
#[derive(Debug, Clone)]
pub struct ChessAI {
    policy: SelectionPolicy,
    rng: StdRng,
}

impl ChessAI {
    pub fn new(policy: SelectionPolicy, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        ChessAI { policy, rng }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// A move for `side`, or `None` when the policy finds nothing legal.
    /// `None` means the side forfeits its turn.
    pub fn get_move(&mut self, board: &Board, side: Side) -> Option<Move> {
        match self.policy {
            SelectionPolicy::LegalSet => self.pick_from_legal_set(board, side),
            SelectionPolicy::BoundedRetry { max_attempts } => {
                self.pick_by_sampling(board, side, max_attempts)
            }
        }
    }

    fn pick_from_legal_set(&mut self, board: &Board, side: Side) -> Option<Move> {
        let movable = movable_pieces(board, side);
        debug!("{side} has {} movable pieces", movable.len());

        let (from, destinations) = movable.choose(&mut self.rng)?;
        let to = destinations.choose(&mut self.rng)?;
        Some(Move::new(*from, *to))
    }

    fn pick_by_sampling(&mut self, board: &Board, side: Side, max_attempts: u32) -> Option<Move> {
        let own: Vec<Position> = board.pieces(side).map(|(pos, _)| pos).collect();
        if own.is_empty() {
            return None;
        }

        for attempt in 1..=max_attempts {
            let from = *own.choose(&mut self.rng)?;
            let row = self.rng.gen_range(0..BOARD_SIZE);
            let col = self.rng.gen_range(0..BOARD_SIZE);
            let Some(to) = Position::new(row, col) else {
                continue;
            };
            trace!("attempt {attempt}: {from}-{to}");
            if is_legal(board, side, from, to) {
                return Some(Move::new(from, to));
            }
        }

        warn!("{side} found no legal move in {max_attempts} samples");
        None
    }
}

/// Pieces of `side` with at least one legal destination, each with those
/// destinations, in board order.
pub fn movable_pieces(board: &Board, side: Side) -> Vec<(Position, Vec<Position>)> {
    let own: Vec<Position> = board.pieces(side).map(|(pos, _)| pos).collect();
    own.par_iter()
        .map(|&from| (from, legal_destinations_from(board, side, from)))
        .filter(|(_, destinations)| !destinations.is_empty())
        .collect()
}
