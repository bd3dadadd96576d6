use std::time::Duration;

use chess_core::{Move, Piece, Position};
use log::{debug, info};

use crate::ai::ChessAI;
use crate::clock::{Clock, SystemClock};
use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::game::{new_game, Activation, GameState};

/// What the automated side did with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiOutcome {
    Moved { mv: Move, captured: Option<Piece> },
    /// No legal move was found; the turn passed back without moving.
    Forfeited,
}

type Observer = Box<dyn FnMut(&GameState)>;

/// Owns the live game and sequences every change to it.
///
/// Human input arrives through [`GameController::activate_square`]. When a
/// human move hands the turn to the automated side, its reply is scheduled
/// `ai_delay` later on the controller's clock and played by
/// [`GameController::tick`]. Until then every activation is ignored, so moves
/// apply one at a time in turn order.
pub struct GameController {
    config: GameConfig,
    state: GameState,
    ai: ChessAI,
    clock: Box<dyn Clock>,
    /// Clock time at which the automated move is due.
    pending: Option<Duration>,
    observers: Vec<Observer>,
}

impl GameController {
    pub fn new(config: GameConfig) -> GameResult<Self> {
        Self::with_clock(config, Box::new(SystemClock::new()))
    }

    pub fn with_clock(config: GameConfig, clock: Box<dyn Clock>) -> GameResult<Self> {
        let state = new_game(&config);
        Self::with_state(config, state, clock)
    }

    /// Starts from an arbitrary state instead of the opening position.
    pub fn with_state(
        config: GameConfig,
        state: GameState,
        clock: Box<dyn Clock>,
    ) -> GameResult<Self> {
        config.validate()?;
        if state.human_side() != config.human_side {
            return Err(GameError::InvalidConfig(format!(
                "state has the human on {}, config on {}",
                state.human_side(),
                config.human_side
            )));
        }
        let ai = ChessAI::new(config.ai_policy, config.seed);
        let mut controller = Self {
            config,
            state,
            ai,
            clock,
            pending: None,
            observers: Vec::new(),
        };
        controller.schedule_if_automated();
        Ok(controller)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Registers `observer` to be called with the state after every change.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&GameState) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Replaces the current game with a fresh one.
    pub fn new_game(&mut self) {
        info!("new game, human plays {}", self.config.human_side);
        self.state = new_game(&self.config);
        self.pending = None;
        self.schedule_if_automated();
        self.notify();
    }

    pub fn activate_square(&mut self, square: Position) -> Activation {
        if self.pending.is_some() {
            debug!("ignoring {square} while the automated move is pending");
            return Activation::Ignored;
        }

        let activation = self.state.activate_square(square);
        if activation.changed_state() {
            self.schedule_if_automated();
            self.notify();
        }
        activation
    }

    /// [`GameController::activate_square`] for raw view coordinates.
    /// Coordinates off the board are rejected before touching the game.
    pub fn activate(&mut self, row: usize, col: usize) -> GameResult<Activation> {
        let square = Position::try_new(row, col)?;
        Ok(self.activate_square(square))
    }

    /// Whether an automated move is scheduled and not yet played.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the scheduled automated move is due.
    pub fn time_until_automated_move(&self) -> Option<Duration> {
        self.pending
            .map(|due| due.saturating_sub(self.clock.now()))
    }

    /// Plays the scheduled automated move if its delay has elapsed.
    pub fn tick(&mut self) -> Option<AiOutcome> {
        match self.pending {
            Some(due) if self.clock.now() >= due => self.resolve_pending(),
            _ => None,
        }
    }

    /// Plays the scheduled automated move now, regardless of the delay.
    pub fn resolve_pending(&mut self) -> Option<AiOutcome> {
        self.pending.take()?;
        let outcome = self.play_automated_turn();
        self.notify();
        Some(outcome)
    }

    fn play_automated_turn(&mut self) -> AiOutcome {
        let side = self.state.turn();
        if let Some(mv) = self.ai.get_move(self.state.board(), side) {
            if let Some(captured) = self.state.play(mv) {
                return AiOutcome::Moved { mv, captured };
            }
            debug!("{side} picked {mv}, which is not legal");
        }
        self.state.forfeit();
        AiOutcome::Forfeited
    }

    fn schedule_if_automated(&mut self) {
        if self.state.is_automated_turn() && self.pending.is_none() {
            let due = self.clock.now() + self.config.ai_delay;
            debug!("automated move due in {:?}", self.config.ai_delay);
            self.pending = Some(due);
        }
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer(&self.state);
        }
    }
}
