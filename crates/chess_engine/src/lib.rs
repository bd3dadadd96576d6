pub mod ai;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod game;

pub use ai::ChessAI;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{GameConfig, SelectionPolicy};
pub use controller::{AiOutcome, GameController};
pub use error::{GameError, GameResult};
pub use game::{activate_square, new_game, Activation, GameState, Phase};
