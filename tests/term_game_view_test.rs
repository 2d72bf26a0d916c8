use tui_tetramino::core::{ActiveSnapshot, EngineConfig, GameState};
use tui_tetramino::term::{piece_color, GameView, Surface, Viewport};
use tui_tetramino::types::{Intent, PieceKind};

fn game() -> GameState {
    GameState::new(EngineConfig::default().with_seed(1)).unwrap()
}

fn viewport(view: &GameView, state: &GameState) -> Viewport {
    let (w, h) = view.required_size(state.board().width(), state.board().height());
    Viewport::new(w, h)
}

fn find(surface: &Surface, text: &str) -> Option<u16> {
    (0..surface.height()).find(|&y| surface.row_text(y).contains(text))
}

#[test]
fn term_view_renders_border_corners() {
    let state = game();
    let view = GameView::default();
    let vp = viewport(&view, &state);
    let surface = view.render(&state.snapshot(), state.catalog(), vp);

    // 10 cells * 2 columns + border = 22 wide, 22 rows + border = 24 high.
    assert_eq!(surface.get(0, 0).unwrap().ch, '┌');
    assert_eq!(surface.get(21, 0).unwrap().ch, '┐');
    assert_eq!(surface.get(0, 23).unwrap().ch, '└');
    assert_eq!(surface.get(21, 23).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let state = game();
    let mut snap = state.snapshot();
    snap.board[21 * snap.width] = PieceKind::I.index() as u8 + 1;
    snap.active = ActiveSnapshot::default();
    snap.ghost.clear();

    let view = GameView::default();
    let surface = view.render(&snap, state.catalog(), viewport(&view, &state));

    // Inside border: (1, 1) origin. Each cell is 2 chars wide.
    let left = surface.get(1, 22).unwrap();
    let right = surface.get(2, 22).unwrap();
    assert_eq!(left.ch, '█');
    assert_eq!(right.ch, '█');
    assert_eq!(left.style.fg, piece_color(PieceKind::I.index()));
    assert_eq!(surface.get(3, 22).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_and_ghost() {
    let state = game();
    let snap = state.snapshot();
    let view = GameView::default();
    let surface = view.render(&snap, state.catalog(), viewport(&view, &state));

    for &(row, col) in &snap.active.cells {
        let glyph = surface.get(1 + col as u16 * 2, 1 + row as u16).unwrap();
        assert_eq!(glyph.ch, '█');
        assert!(glyph.style.bold);
    }
    for &(row, col) in &snap.ghost {
        let glyph = surface.get(1 + col as u16 * 2, 1 + row as u16).unwrap();
        assert_eq!(glyph.ch, '░');
    }

    let no_ghost = GameView::default().with_ghost(false);
    let surface = no_ghost.render(&snap, state.catalog(), viewport(&no_ghost, &state));
    assert!((0..surface.height()).all(|y| !surface.row_text(y).contains('░')));
}

#[test]
fn term_view_side_panel_shows_counters() {
    let mut state = game();
    state.step(&[Intent::HardDrop], 0);
    let view = GameView::default();
    let surface = view.render(&state.snapshot(), state.catalog(), viewport(&view, &state));

    for label in ["SCORE", "LINES", "TETRISES", "GAMES", "HOLD", "NEXT"] {
        assert!(find(&surface, label).is_some(), "missing {label}");
    }
    let hold = find(&surface, "HOLD").unwrap();
    assert!(surface.row_text(hold + 1).contains('-'));
}

#[test]
fn term_view_shows_pause_overlay() {
    let mut state = game();
    state.step(&[Intent::Pause], 0);
    let view = GameView::default();
    let surface = view.render(&state.snapshot(), state.catalog(), viewport(&view, &state));
    assert!(find(&surface, "PAUSED").is_some());
}

#[test]
fn term_view_tolerates_tiny_viewport() {
    let state = game();
    let surface = GameView::default().render(&state.snapshot(), state.catalog(), Viewport::new(5, 3));
    assert_eq!((surface.width(), surface.height()), (5, 3));
}
