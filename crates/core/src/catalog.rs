//! Piece catalog - shape definitions built from raw layout grids
//!
//! A raw layout lists the rotation states of one piece type. Each rotation
//! state is a flat, row-major list of 0/1 flags whose length is a perfect
//! square (4, 9 or 16 for the standard pieces). The catalog converts every
//! state into relative `(row, col)` offsets once, at startup, and refuses to
//! build if any layout is malformed.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::error::CatalogError;
use crate::piece::Piece;
use crate::types::{CellValue, MAX_PIECE_CELLS, MAX_SHAPE_SIZE};

/// Rotation states of one piece type, each a flat square grid of 0/1 flags
pub type RawLayout = Vec<Vec<u8>>;

/// Offset of a single cell from the piece origin, as `(row, col)`
pub type CellOffset = (i32, i32);

/// Occupied cells of one rotation state
pub type ShapeCells = ArrayVec<CellOffset, MAX_PIECE_CELLS>;

/// Immutable shape data for one piece type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDef {
    kind: usize,
    size: usize,
    rotations: Vec<ShapeCells>,
}

impl ShapeDef {
    /// Piece type index inside the catalog
    pub fn kind(&self) -> usize {
        self.kind
    }

    /// Width (and height) of the bounding square
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// Cells occupied at `rotation`, taken modulo the rotation count
    pub fn cells(&self, rotation: usize) -> &[CellOffset] {
        &self.rotations[rotation % self.rotations.len()]
    }

    /// Value written into the board when this piece locks
    pub fn cell_value(&self) -> CellValue {
        (self.kind + 1) as CellValue
    }

    fn parse(piece: usize, layout: &[Vec<u8>]) -> Result<Self, CatalogError> {
        if layout.is_empty() {
            return Err(CatalogError::NoRotations { piece });
        }

        let mut size = 0;
        let mut rotations = Vec::with_capacity(layout.len());
        for (rotation, flags) in layout.iter().enumerate() {
            let dim = square_side(flags.len()).ok_or(CatalogError::NotSquare {
                piece,
                rotation,
                len: flags.len(),
            })?;
            if dim > MAX_SHAPE_SIZE {
                return Err(CatalogError::TooLarge {
                    piece,
                    rotation,
                    size: dim,
                    max: MAX_SHAPE_SIZE,
                });
            }

            let mut cells = ShapeCells::new();
            for (index, &value) in flags.iter().enumerate() {
                match value {
                    0 => {}
                    1 => cells.push(((index / dim) as i32, (index % dim) as i32)),
                    _ => {
                        return Err(CatalogError::InvalidFlag {
                            piece,
                            rotation,
                            index,
                            value,
                        })
                    }
                }
            }
            if cells.is_empty() {
                return Err(CatalogError::EmptyRotation { piece, rotation });
            }

            if rotation == 0 {
                size = dim;
            } else {
                let expected: &ShapeCells = &rotations[0];
                if dim != size {
                    return Err(CatalogError::SizeMismatch {
                        piece,
                        rotation,
                        expected: size,
                        found: dim,
                    });
                }
                if cells.len() != expected.len() {
                    return Err(CatalogError::CellCountMismatch {
                        piece,
                        rotation,
                        expected: expected.len(),
                        found: cells.len(),
                    });
                }
            }
            rotations.push(cells);
        }

        Ok(Self {
            kind: piece,
            size,
            rotations,
        })
    }
}

/// Side length of a square grid holding `len` cells, if there is one
fn square_side(len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    (1..=len).take_while(|d| d * d <= len).find(|d| d * d == len)
}

/// All piece types available to a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    shapes: Vec<Arc<ShapeDef>>,
}

impl Catalog {
    /// Build a catalog from raw layouts, validating every grid
    pub fn from_layouts(layouts: &[RawLayout]) -> Result<Self, CatalogError> {
        if layouts.is_empty() {
            return Err(CatalogError::NoPieces);
        }
        let max = CellValue::MAX as usize;
        if layouts.len() > max {
            return Err(CatalogError::TooManyPieces {
                count: layouts.len(),
                max,
            });
        }

        let shapes = layouts
            .iter()
            .enumerate()
            .map(|(piece, layout)| ShapeDef::parse(piece, layout).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { shapes })
    }

    /// The seven standard pieces (I, T, S, Z, L, J, O)
    pub fn standard() -> Self {
        Self::from_layouts(&standard_layouts()).expect("built-in layouts are valid")
    }

    /// Number of piece types
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shape(&self, kind: usize) -> Option<&Arc<ShapeDef>> {
        self.shapes.get(kind)
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Arc<ShapeDef>> {
        self.shapes.iter()
    }

    /// Relative cells of `kind` at `rotation`
    pub fn cells(&self, kind: usize, rotation: usize) -> Option<&[CellOffset]> {
        self.shape(kind).map(|s| s.cells(rotation))
    }

    /// Largest bounding square across all piece types
    pub fn max_size(&self) -> usize {
        self.shapes.iter().map(|s| s.size()).max().unwrap_or(0)
    }

    /// Column that centers `kind` horizontally on a board `board_width` wide
    pub fn spawn_col(&self, kind: usize, board_width: usize) -> Option<i32> {
        self.shape(kind).map(|s| centered_col(s, board_width))
    }

    /// A fresh piece of `kind` at its spawn position
    pub fn spawn(&self, kind: usize, board_width: usize) -> Option<Piece> {
        self.shape(kind).map(|shape| spawn_shape(shape, board_width))
    }

    /// Spawn a kind known to come from this catalog (bag draws, queue refills)
    pub(crate) fn spawn_kind(&self, kind: usize, board_width: usize) -> Piece {
        spawn_shape(&self.shapes[kind], board_width)
    }
}

fn centered_col(shape: &ShapeDef, board_width: usize) -> i32 {
    (board_width as i32 - shape.size() as i32) / 2
}

fn spawn_shape(shape: &Arc<ShapeDef>, board_width: usize) -> Piece {
    Piece::spawn(Arc::clone(shape), centered_col(shape, board_width))
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[rustfmt::skip]
const I_LAYOUT: [[u8; 16]; 4] = [
    [0, 0, 0, 0,
     1, 1, 1, 1,
     0, 0, 0, 0,
     0, 0, 0, 0],
    [0, 0, 1, 0,
     0, 0, 1, 0,
     0, 0, 1, 0,
     0, 0, 1, 0],
    [0, 0, 0, 0,
     0, 0, 0, 0,
     1, 1, 1, 1,
     0, 0, 0, 0],
    [0, 1, 0, 0,
     0, 1, 0, 0,
     0, 1, 0, 0,
     0, 1, 0, 0],
];

#[rustfmt::skip]
const T_LAYOUT: [[u8; 9]; 4] = [
    [0, 1, 0,
     1, 1, 1,
     0, 0, 0],
    [0, 1, 0,
     0, 1, 1,
     0, 1, 0],
    [0, 0, 0,
     1, 1, 1,
     0, 1, 0],
    [0, 1, 0,
     1, 1, 0,
     0, 1, 0],
];

#[rustfmt::skip]
const S_LAYOUT: [[u8; 9]; 4] = [
    [1, 1, 0,
     0, 1, 1,
     0, 0, 0],
    [0, 0, 1,
     0, 1, 1,
     0, 1, 0],
    [0, 0, 0,
     1, 1, 0,
     0, 1, 1],
    [0, 1, 0,
     1, 1, 0,
     1, 0, 0],
];

#[rustfmt::skip]
const Z_LAYOUT: [[u8; 9]; 4] = [
    [0, 1, 1,
     1, 1, 0,
     0, 0, 0],
    [0, 1, 0,
     0, 1, 1,
     0, 0, 1],
    [0, 0, 0,
     0, 1, 1,
     1, 1, 0],
    [1, 0, 0,
     1, 1, 0,
     0, 1, 0],
];

#[rustfmt::skip]
const L_LAYOUT: [[u8; 9]; 4] = [
    [0, 0, 1,
     1, 1, 1,
     0, 0, 0],
    [0, 1, 0,
     0, 1, 0,
     0, 1, 1],
    [0, 0, 0,
     1, 1, 1,
     1, 0, 0],
    [1, 1, 0,
     0, 1, 0,
     0, 1, 0],
];

#[rustfmt::skip]
const J_LAYOUT: [[u8; 9]; 4] = [
    [1, 0, 0,
     1, 1, 1,
     0, 0, 0],
    [0, 1, 1,
     0, 1, 0,
     0, 1, 0],
    [0, 0, 0,
     1, 1, 1,
     0, 0, 1],
    [0, 1, 0,
     0, 1, 0,
     1, 1, 0],
];

#[rustfmt::skip]
const O_LAYOUT: [[u8; 4]; 1] = [
    [1, 1,
     1, 1],
];

fn to_layout<const N: usize>(states: &[[u8; N]]) -> RawLayout {
    states.iter().map(|grid| grid.to_vec()).collect()
}

/// Raw layouts of the standard pieces, in `PieceKind` order
pub fn standard_layouts() -> Vec<RawLayout> {
    vec![
        to_layout(&I_LAYOUT),
        to_layout(&T_LAYOUT),
        to_layout(&S_LAYOUT),
        to_layout(&Z_LAYOUT),
        to_layout(&L_LAYOUT),
        to_layout(&J_LAYOUT),
        to_layout(&O_LAYOUT),
    ]
}
