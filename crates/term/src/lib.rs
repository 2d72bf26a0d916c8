//! Terminal rendering for the falling-block game.
//!
//! A small, game-oriented rendering layer: the view draws a snapshot into a
//! plain character surface, and the renderer diffs surfaces and flushes the
//! changes through crossterm. No widget toolkit is involved.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Control the cell aspect ratio precisely (2 columns per board cell by default)

pub mod renderer;
pub mod surface;
pub mod view;

pub use tui_tetramino_core as core;
pub use tui_tetramino_types as types;

pub use renderer::{encode_diff_into, encode_full_into, Frame, TerminalRenderer};
pub use surface::{Glyph, Rgb, Style, Surface};
pub use view::{piece_color, GameView, Viewport, PIECE_COLORS};
