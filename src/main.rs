use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::thread;

use chess_core::{Position, BOARD_SIZE};
use chess_engine::{Activation, AiOutcome, GameConfig, GameController, GameState};
use log::{error, info};

const TITLE: &str = "Lords of the Kingdom";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: GameConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "{TITLE}: human plays {}, opponent policy {}, {} back ranks",
        config.human_side, config.ai_policy, config.layout
    );

    let mut controller = GameController::new(config)?;
    controller.subscribe(|state| print!("{}", render(state)));
    print!("{}", render(controller.state()));
    wait_for_opponent(&mut controller);

    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "new" => {
                controller.new_game();
                wait_for_opponent(&mut controller);
            }
            input => match parse_square(input) {
                Ok(square) => {
                    if let Activation::Rejected(mv) = controller.activate_square(square) {
                        println!("{mv} is not a legal move");
                    }
                    wait_for_opponent(&mut controller);
                }
                Err(e) => println!("{e}"),
            },
        }
        prompt()?;
    }
    Ok(())
}

/// Blocks until the scheduled automated move has been played.
fn wait_for_opponent(controller: &mut GameController) {
    while let Some(remaining) = controller.time_until_automated_move() {
        thread::sleep(remaining);
        match controller.tick() {
            Some(AiOutcome::Moved { mv, .. }) => println!("opponent plays {mv}"),
            Some(AiOutcome::Forfeited) => println!("opponent has no move and passes"),
            None => {}
        }
    }
}

/// Accepts `e2`-style notation or a `row col` pair.
fn parse_square(input: &str) -> Result<Position, String> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    match parts.as_slice() {
        [row, col] => {
            let row: usize = row.parse().map_err(|_| format!("bad row {row:?}"))?;
            let col: usize = col.parse().map_err(|_| format!("bad column {col:?}"))?;
            Position::try_new(row, col).map_err(|e| e.to_string())
        }
        [notation] => notation.parse().map_err(|e: chess_core::BoardError| e.to_string()),
        _ => Err(format!("expected a square like e2 or \"row col\", got {input:?}")),
    }
}

fn render(state: &GameState) -> String {
    let files: String = (0..BOARD_SIZE).map(|col| (b'a' + col as u8) as char).collect();
    let mut out = format!("\n    {files}\n");
    for (i, line) in state.board().to_string().lines().enumerate() {
        out.push_str(&format!("{:>3} {line}\n", BOARD_SIZE - i));
    }
    out.push_str(&format!(
        "{} to move, {} moves played",
        state.turn(),
        state.move_count()
    ));
    if let Some(selected) = state.selected() {
        out.push_str(&format!(", {selected} selected"));
    }
    out.push('\n');
    out
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_parse_in_both_forms() {
        assert_eq!(parse_square("c2"), Ok(Position::new(1, 2).unwrap()));
        assert_eq!(parse_square("1 2"), Ok(Position::new(1, 2).unwrap()));
        assert!(parse_square("16 0").is_err());
        assert!(parse_square("1 2 3").is_err());
        assert!(parse_square("z9").is_err());
    }

    #[test]
    fn render_labels_ranks_and_files() {
        let state = chess_engine::new_game(&GameConfig::default());
        let text = render(&state);
        assert!(text.contains("    abcdefghijklmnop"));
        assert!(text.contains(" 16 rnbq........kbnr"));
        assert!(text.contains("  1 RNBQ........KBNR"));
        assert!(text.contains("light to move, 0 moves played"));
    }
}
