//! Integration tests for the game loop, driven only through public intents

use tui_tetramino::core::{
    standard_layouts, Bag, EngineConfig, Flow, GameEvent, GameState, Phase,
};
use tui_tetramino::types::{Intent, PieceKind};

fn single_piece_config(kind: PieceKind) -> EngineConfig {
    EngineConfig {
        pieces: vec![standard_layouts().swap_remove(kind.index())],
        ..EngineConfig::default().with_seed(1)
    }
}

fn shift(state: &mut GameState, cols: i32) {
    for _ in 0..cols.abs() {
        assert!(state.try_shift(cols.signum()), "shift blocked");
    }
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(EngineConfig::default().with_seed(12345)).unwrap();
    assert_eq!(state.phase(), Phase::Falling);
    assert!(!state.paused());

    let flow = state.step(&[Intent::HardDrop], 33);
    assert_eq!(flow, Flow::Continue);
    assert_eq!(state.pieces_locked(), 1);
    assert_eq!(state.board().occupied_count(), 4);

    assert_eq!(state.step(&[Intent::Quit], 33), Flow::Quit);
}

#[test]
fn test_same_seed_same_game() {
    let config = EngineConfig::default().with_seed(99);
    let mut a = GameState::new(config.clone()).unwrap();
    let mut b = GameState::new(config).unwrap();

    let script = [
        vec![Intent::MoveLeftDown],
        vec![Intent::MoveLeftUp, Intent::RotateCw],
        vec![Intent::HardDrop],
        vec![Intent::HoldSwap, Intent::MoveRightDown],
        vec![],
        vec![Intent::MoveRightUp, Intent::SoftDropDown],
        vec![Intent::SoftDropUp, Intent::HardDrop],
    ];
    for intents in &script {
        a.step(intents, 120);
        b.step(intents, 120);
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

#[test]
fn test_bag_windows_are_permutations() {
    let mut bag = Bag::with_seed(7, 2024);
    for _ in 0..10 {
        let mut window: Vec<usize> = (0..7).map(|_| bag.draw()).collect();
        window.sort_unstable();
        assert_eq!(window, (0..7).collect::<Vec<_>>());
    }
}

#[test]
fn test_o_piece_hard_drop_scenario() {
    let mut state = GameState::new(single_piece_config(PieceKind::O)).unwrap();
    state.step(&[Intent::HardDrop], 0);

    let snap = state.snapshot();
    let height = snap.height;
    for (row, col) in [(height - 2, 4), (height - 2, 5), (height - 1, 4), (height - 1, 5)] {
        assert_eq!(snap.cell(row, col), 1, "cell ({row}, {col})");
    }
    assert_eq!(state.board().occupied_count(), 4);
}

#[test]
fn test_two_line_clear_with_o_pieces() {
    let mut state = GameState::new(single_piece_config(PieceKind::O)).unwrap();

    for cols in [-4, -2, 0, 2, 4] {
        shift(&mut state, cols);
        state.hard_drop();
    }

    assert_eq!(state.lines(), 2);
    assert_eq!(state.tetrises(), 0);
    assert_eq!(state.board().occupied_count(), 0);
}

#[test]
fn test_tetris_with_vertical_i_pieces() {
    let config = EngineConfig {
        width: 4,
        height: 8,
        ..single_piece_config(PieceKind::I)
    };
    let mut state = GameState::new(config).unwrap();

    // Vertical I sits in column 2 of its 4x4 grid; spawn column is 0.
    for target in 0..4 {
        assert!(state.try_rotate(1));
        shift(&mut state, target - 2);
        let lines = state.hard_drop();
        assert_eq!(lines, if target == 3 { 4 } else { 0 });
    }

    assert_eq!(
        state.take_last_event(),
        Some(GameEvent::Locked {
            lines: 4,
            tetris: true
        })
    );
    assert_eq!(state.tetrises(), 1);
    assert_eq!(state.lines(), 4);
    assert_eq!(state.board().occupied_count(), 0);
}

#[test]
fn test_stack_to_top_resets_game() {
    let mut state = GameState::new(single_piece_config(PieceKind::O)).unwrap();

    // Each O adds two rows in columns 4-5; the eleventh reaches row 0.
    for _ in 0..10 {
        state.hard_drop();
        assert!(!matches!(state.take_last_event(), Some(GameEvent::GameOver { .. })));
    }
    state.hard_drop();

    assert_eq!(
        state.take_last_event(),
        Some(GameEvent::GameOver {
            lines: 0,
            tetrises: 0
        })
    );
    assert_eq!(state.board().occupied_count(), 0);
    assert_eq!(state.pieces_locked(), 0);
    assert_eq!(state.games_played(), 1);
    assert_eq!(state.phase(), Phase::Falling);
}

#[test]
fn test_hold_swap_through_intents() {
    let mut state = GameState::new(EngineConfig::default().with_seed(5)).unwrap();
    let first = state.current().kind();

    state.step(&[Intent::HoldSwap], 0);
    assert_eq!(state.held().map(|p| p.kind()), Some(first));
    assert!(!state.can_hold());

    let current = state.current().kind();
    state.step(&[Intent::HoldSwap], 0);
    assert_eq!(state.current().kind(), current, "second swap ignored");

    state.step(&[Intent::HardDrop], 0);
    assert!(state.can_hold());
}

#[test]
fn test_held_key_repeats_until_released() {
    let mut state = GameState::new(single_piece_config(PieceKind::O)).unwrap();
    assert_eq!(state.current().col(), 4);

    state.step(&[Intent::MoveRightDown], 0);
    assert_eq!(state.current().col(), 5);

    state.step(&[], 90);
    state.step(&[], 90);
    assert_eq!(state.current().col(), 7);

    state.step(&[Intent::MoveRightUp], 90);
    assert_eq!(state.current().col(), 7);
}

#[test]
fn test_gravity_and_soft_drop_intervals() {
    let mut state = GameState::new(single_piece_config(PieceKind::O)).unwrap();

    for _ in 0..15 {
        state.step(&[], 33);
    }
    // 495ms: not yet.
    assert_eq!(state.current().row(), 0);
    state.step(&[], 33);
    assert_eq!(state.current().row(), 1);

    state.step(&[Intent::SoftDropDown], 0);
    assert_eq!(state.current().row(), 2);
    state.step(&[], 90);
    assert_eq!(state.current().row(), 3);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = EngineConfig {
        height: 2,
        ..EngineConfig::default()
    };
    assert!(GameState::new(config).is_err());
}
