//! Core game logic - pure, deterministic, and testable
//!
//! Everything here runs without a terminal, a clock or any I/O. Callers hand
//! the engine intents and elapsed milliseconds; it hands back state.
//!
//! # Module Structure
//!
//! - [`catalog`]: piece shapes parsed and validated from raw 0/1 layout grids
//! - [`piece`]: a shape instance with position and rotation
//! - [`board`]: the locked-cell grid, collision checks and line clearing
//! - [`repeat`]: held-key auto-repeat and gravity timers
//! - [`rng`]: bag randomizer
//! - [`game_state`]: the controller tying everything into one session
//! - [`snapshot`]: read-only copy of the state for renderers
//! - [`config`] / [`error`]: engine settings and their validation errors
//!
//! # Game Rules
//!
//! - **Bag**: every piece type appears once per bag, in shuffled order
//! - **Rotation**: a rotation that would collide is refused, there are no kicks
//! - **Locking**: a piece locks as soon as a downward move is blocked
//! - **Hold**: once per piece; the held piece comes back at its spawn position
//! - **Game over**: a spawn that collides resets the session and play continues
//!
//! # Example
//!
//! ```
//! use tui_tetramino_core::{EngineConfig, Flow, GameState};
//! use tui_tetramino_types::Intent;
//!
//! let mut game = GameState::new(EngineConfig::default().with_seed(12345)).unwrap();
//!
//! let flow = game.step(&[Intent::MoveRightDown, Intent::RotateCw], 33);
//! assert_eq!(flow, Flow::Continue);
//!
//! game.step(&[Intent::MoveRightUp, Intent::HardDrop], 33);
//! assert_eq!(game.pieces_locked(), 1);
//! ```

pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod game_state;
pub mod piece;
pub mod repeat;
pub mod rng;
pub mod snapshot;

pub use tui_tetramino_types as types;

pub use board::{Board, Offset};
pub use catalog::{standard_layouts, Catalog, RawLayout, ShapeDef};
pub use config::{EngineConfig, MAX_TICK_RATE_HZ};
pub use error::{CatalogError, ConfigError};
pub use game_state::{Flow, GameEvent, GameState, Phase};
pub use piece::Piece;
pub use repeat::{Command, Direction, InputRepeat, RepeatIntervals};
pub use rng::Bag;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
