use std::time::Duration;

use chess_core::{legal_moves, PieceType, Position, Side};
use chess_engine::{
    Activation, AiOutcome, ChessAI, GameConfig, GameController, ManualClock, Phase,
    SelectionPolicy,
};

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).unwrap()
}

fn controller_with(policy: SelectionPolicy, seed: u64) -> (GameController, ManualClock) {
    let config = GameConfig {
        ai_policy: policy,
        ai_delay: Duration::from_millis(800),
        seed: Some(seed),
        ..GameConfig::default()
    };
    let clock = ManualClock::new();
    let controller = GameController::with_clock(config, Box::new(clock.clone())).unwrap();
    (controller, clock)
}

#[test]
fn pawn_double_step_then_automated_reply() {
    for policy in [
        SelectionPolicy::LegalSet,
        SelectionPolicy::BoundedRetry { max_attempts: 10_000 },
    ] {
        let (mut controller, clock) = controller_with(policy, 2024);

        assert_eq!(controller.activate(1, 6), Ok(Activation::Selected(pos(1, 6))));
        assert!(matches!(controller.activate(3, 6), Ok(Activation::Moved { .. })));

        let state = controller.state();
        assert_eq!(
            state.board().get_piece(pos(3, 6)).map(|p| (p.piece_type, p.side)),
            Some((PieceType::Pawn, Side::Light))
        );
        assert!(state.board().get_piece(pos(1, 6)).is_none());
        assert_eq!(state.turn(), Side::Dark);
        assert_eq!(state.move_count(), 1);

        let legal_before = legal_moves(state.board(), Side::Dark);
        let board_before = state.board().clone();

        clock.advance(Duration::from_millis(800));
        let mv = match controller.tick() {
            Some(AiOutcome::Moved { mv, captured }) => {
                assert_eq!(captured, None);
                mv
            }
            other => panic!("{policy}: expected an automated move, got {other:?}"),
        };
        assert!(legal_before.contains(&mv), "{policy}: {mv} was not legal");

        let state = controller.state();
        let moved = board_before.get_piece(mv.from).copied();
        assert_eq!(moved.map(|p| p.side), Some(Side::Dark));
        assert_eq!(state.board().get_piece(mv.to).copied(), moved);
        assert!(state.board().get_piece(mv.from).is_none());
        assert_eq!(state.turn(), Side::Light);
        assert_eq!(state.move_count(), 2);
        assert_eq!(state.phase(), Phase::AwaitingSelection);

        // Everything else stayed where it was
        let changed = Position::all()
            .filter(|&sq| state.board().get_piece(sq) != board_before.get_piece(sq))
            .count();
        assert_eq!(changed, 2);
    }
}

#[test]
fn turns_alternate_over_a_long_game() {
    let (mut controller, clock) = controller_with(SelectionPolicy::LegalSet, 77);
    let mut human = ChessAI::new(SelectionPolicy::LegalSet, Some(13));
    let mut expected_moves = 0;

    for _ in 0..60 {
        let state = controller.state();
        assert_eq!(state.turn(), Side::Light);

        let Some(mv) = human.get_move(state.board(), Side::Light) else {
            break;
        };
        assert_eq!(
            controller.activate_square(mv.from),
            Activation::Selected(mv.from)
        );
        assert!(matches!(
            controller.activate_square(mv.to),
            Activation::Moved { .. }
        ));
        expected_moves += 1;
        assert_eq!(controller.state().turn(), Side::Dark);
        assert_eq!(controller.state().move_count(), expected_moves);

        clock.advance(Duration::from_secs(1));
        match controller.tick() {
            Some(AiOutcome::Moved { .. }) => expected_moves += 1,
            Some(AiOutcome::Forfeited) => {}
            None => panic!("automated move did not fire"),
        }
        assert_eq!(controller.state().move_count(), expected_moves);
    }
}

#[test]
fn owned_state_only_moves_through_selection() {
    let state = chess_engine::new_game(&GameConfig::default());
    let start = state.clone();

    // A destination with nothing selected does nothing
    let (state, activation) = chess_engine::activate_square(state, pos(3, 1));
    assert_eq!(activation, Activation::Ignored);
    assert_eq!(state, start);

    let (state, _) = chess_engine::activate_square(state, pos(1, 1));
    let (state, activation) = chess_engine::activate_square(state, pos(3, 1));
    assert!(matches!(activation, Activation::Moved { .. }));

    // The automated reply cannot be played through the human's input
    let before = state.clone();
    let (state, activation) = chess_engine::activate_square(state, pos(14, 4));
    assert_eq!(activation, Activation::Ignored);
    let (state, activation) = chess_engine::activate_square(state, pos(12, 4));
    assert_eq!(activation, Activation::Ignored);
    assert_eq!(state, before);
    assert_eq!(state.phase(), Phase::Resolving);
}
