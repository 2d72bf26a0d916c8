//! Startup errors
//!
//! These are the only failures the engine reports. Everything that happens
//! during play (blocked moves, blocked spawns) is game logic, not an error.

use thiserror::Error;

/// A raw piece layout that cannot be turned into a shape definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("piece catalog is empty")]
    NoPieces,

    #[error("piece {piece} has no rotation states")]
    NoRotations { piece: usize },

    #[error("piece {piece} rotation {rotation}: {len} flags do not form a square grid")]
    NotSquare {
        piece: usize,
        rotation: usize,
        len: usize,
    },

    #[error("piece {piece} rotation {rotation}: grid size {size} exceeds {max}")]
    TooLarge {
        piece: usize,
        rotation: usize,
        size: usize,
        max: usize,
    },

    #[error("piece {piece} rotation {rotation}: flag {value} at index {index} is not 0 or 1")]
    InvalidFlag {
        piece: usize,
        rotation: usize,
        index: usize,
        value: u8,
    },

    #[error("piece {piece} rotation {rotation} has no occupied cells")]
    EmptyRotation { piece: usize, rotation: usize },

    #[error("piece {piece} rotation {rotation} has {found} cells, rotation 0 has {expected}")]
    CellCountMismatch {
        piece: usize,
        rotation: usize,
        expected: usize,
        found: usize,
    },

    #[error("piece {piece} rotation {rotation} uses grid size {found}, rotation 0 uses {expected}")]
    SizeMismatch {
        piece: usize,
        rotation: usize,
        expected: usize,
        found: usize,
    },

    #[error("catalog has {count} piece types, cell values only fit {max}")]
    TooManyPieces { count: usize, max: usize },
}

/// Engine configuration rejected before any game state exists
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("board must be at least {min}x{min} cells, got {width}x{height}")]
    BoardTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("next queue length {len} is outside 0..={max}")]
    NextQueueLen { len: usize, max: usize },

    #[error("{name} must be greater than zero")]
    ZeroInterval { name: &'static str },

    #[error("tick rate {rate} Hz is above {max} Hz")]
    TickRateTooHigh { rate: u32, max: u32 },
}
