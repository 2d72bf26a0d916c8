//! Shared types - piece names, player intents and default tuning values
//!
//! Everything here is plain data with no dependencies, so the engine, the input
//! mapping and the terminal view can all agree on the same vocabulary.
//!
//! # Coordinates
//!
//! The engine addresses cells as `(row, col)`:
//!
//! - **row** grows downwards, row 0 is the top of the board
//! - **col** grows to the right, col 0 is the left wall
//!
//! # Default Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_RATE_HZ` | 30 | Frames (engine ticks) per second |
//! | `DEFAULT_KEY_REPEAT_MS` | 90 | Horizontal auto-repeat interval |
//! | `DEFAULT_GRAVITY_MS` | 500 | Automatic downward movement interval |
//! | `DEFAULT_SOFT_DROP_MS` | 90 | Downward interval while soft drop is held |
//!
//! # Examples
//!
//! ```
//! use tui_tetramino_types::{Intent, PieceKind, DEFAULT_BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_index(6), Some(PieceKind::O));
//! assert_eq!(PieceKind::O.index(), 6);
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! ```

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in cells (two hidden-ish rows above the classic 20)
pub const DEFAULT_BOARD_HEIGHT: usize = 22;

/// Default engine tick rate
pub const DEFAULT_TICK_RATE_HZ: u32 = 30;

/// Horizontal auto-repeat interval in milliseconds
pub const DEFAULT_KEY_REPEAT_MS: u32 = 90;

/// Gravity interval in milliseconds
pub const DEFAULT_GRAVITY_MS: u32 = 500;

/// Gravity interval while soft drop is held
pub const DEFAULT_SOFT_DROP_MS: u32 = 90;

/// Default number of previewed pieces
pub const DEFAULT_NEXT_QUEUE_LEN: usize = 6;

/// Upper bound for the next-queue length
pub const MAX_NEXT_QUEUE_LEN: usize = 6;

/// Largest bounding square a piece layout may use
pub const MAX_SHAPE_SIZE: usize = 4;

/// Upper bound on occupied cells in one rotation state
pub const MAX_PIECE_CELLS: usize = MAX_SHAPE_SIZE * MAX_SHAPE_SIZE;

/// Lines cleared by a single lock that count as a "tetris"
pub const TETRIS_LINES: usize = 4;

/// Board cell value: 0 is empty, otherwise piece type index + 1
pub type CellValue = u8;

/// Value of an empty board cell
pub const EMPTY: CellValue = 0;

/// The seven standard piece types, in catalog order
///
/// The discriminant is the type index used by the engine, so a locked cell
/// holding value `v` belongs to `PieceKind::from_index(v - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    T,
    S,
    Z,
    L,
    J,
    O,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
    ];

    /// Catalog index of this piece kind
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Piece kind for a catalog index, if it is one of the standard seven
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Piece kind for a nonzero board cell value
    ///
    /// ```
    /// use tui_tetramino_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_cell(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_cell(0), None);
    /// ```
    pub fn from_cell(value: CellValue) -> Option<Self> {
        match value {
            EMPTY => None,
            v => Self::from_index(v as usize - 1),
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "o" => Some(PieceKind::O),
            _ => None,
        }
    }

    /// Single uppercase letter, as shown in previews
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::O => "O",
        }
    }
}

/// Discrete player intents delivered to the engine once per tick
///
/// Movement and soft drop come as down/up pairs because the engine owns the
/// auto-repeat cadence; everything else is a one-shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveLeftDown,
    MoveLeftUp,
    MoveRightDown,
    MoveRightUp,
    SoftDropDown,
    SoftDropUp,
    RotateCw,
    RotateCcw,
    HoldSwap,
    HardDrop,
    /// Toggle pause
    Pause,
    /// Throw the current game away and start over
    Restart,
    Quit,
}

impl Intent {
    /// Parse an intent from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use tui_tetramino_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeftDown"), Some(Intent::MoveLeftDown));
    /// assert_eq!(Intent::from_str("rotateccw"), Some(Intent::RotateCcw));
    /// assert_eq!(Intent::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleftdown" => Some(Intent::MoveLeftDown),
            "moveleftup" => Some(Intent::MoveLeftUp),
            "moverightdown" => Some(Intent::MoveRightDown),
            "moverightup" => Some(Intent::MoveRightUp),
            "softdropdown" => Some(Intent::SoftDropDown),
            "softdropup" => Some(Intent::SoftDropUp),
            "rotatecw" => Some(Intent::RotateCw),
            "rotateccw" => Some(Intent::RotateCcw),
            "holdswap" => Some(Intent::HoldSwap),
            "harddrop" => Some(Intent::HardDrop),
            "pause" => Some(Intent::Pause),
            "restart" => Some(Intent::Restart),
            "quit" => Some(Intent::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeftDown => "moveLeftDown",
            Intent::MoveLeftUp => "moveLeftUp",
            Intent::MoveRightDown => "moveRightDown",
            Intent::MoveRightUp => "moveRightUp",
            Intent::SoftDropDown => "softDropDown",
            Intent::SoftDropUp => "softDropUp",
            Intent::RotateCw => "rotateCw",
            Intent::RotateCcw => "rotateCcw",
            Intent::HoldSwap => "holdSwap",
            Intent::HardDrop => "hardDrop",
            Intent::Pause => "pause",
            Intent::Restart => "restart",
            Intent::Quit => "quit",
        }
    }

    /// True for the key-up half of a held intent
    pub fn is_release(&self) -> bool {
        matches!(
            self,
            Intent::MoveLeftUp | Intent::MoveRightUp | Intent::SoftDropUp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_kind_index_roundtrips_through_cell_values() {
        for kind in PieceKind::ALL {
            let cell = (kind.index() + 1) as CellValue;
            assert_eq!(PieceKind::from_cell(cell), Some(kind));
        }
        assert_eq!(PieceKind::from_cell(8), None);
    }

    #[test]
    fn intent_names_parse_back() {
        let all = [
            Intent::MoveLeftDown,
            Intent::MoveLeftUp,
            Intent::MoveRightDown,
            Intent::MoveRightUp,
            Intent::SoftDropDown,
            Intent::SoftDropUp,
            Intent::RotateCw,
            Intent::RotateCcw,
            Intent::HoldSwap,
            Intent::HardDrop,
            Intent::Pause,
            Intent::Restart,
            Intent::Quit,
        ];
        for intent in all {
            assert_eq!(Intent::from_str(intent.as_str()), Some(intent));
        }
    }

    #[test]
    fn default_timing_values() {
        assert_eq!(DEFAULT_TICK_RATE_HZ, 30);
        assert_eq!(DEFAULT_KEY_REPEAT_MS, 90);
        assert_eq!(DEFAULT_GRAVITY_MS, 500);
        assert!(DEFAULT_SOFT_DROP_MS < DEFAULT_GRAVITY_MS);
        assert!(DEFAULT_NEXT_QUEUE_LEN <= MAX_NEXT_QUEUE_LEN);
    }
}
