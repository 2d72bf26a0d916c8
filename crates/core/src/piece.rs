//! Piece instances - a shape plus its position and rotation
//!
//! Mutators here never check for collisions. The game state asks the board
//! first and only then commits a move or rotation.

use std::fmt;
use std::sync::Arc;

use crate::catalog::{ShapeDef, ShapeCells};

/// Absolute board position of a cell, as `(row, col)`
pub type Position = (i32, i32);

/// A movable piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    shape: Arc<ShapeDef>,
    rotation: usize,
    row: i32,
    col: i32,
    spawn_col: i32,
}

impl Piece {
    /// New piece at rotation 0, row 0, column `spawn_col`
    pub(crate) fn spawn(shape: Arc<ShapeDef>, spawn_col: i32) -> Self {
        Self {
            shape,
            rotation: 0,
            row: 0,
            col: spawn_col,
            spawn_col,
        }
    }

    pub fn kind(&self) -> usize {
        self.shape.kind()
    }

    pub fn shape(&self) -> &ShapeDef {
        &self.shape
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    pub fn spawn_col(&self) -> i32 {
        self.spawn_col
    }

    /// Rotation index reached after rotating by `amount` (may be negative)
    pub fn rotation_after(&self, amount: i32) -> usize {
        let count = self.shape.rotation_count() as i32;
        (self.rotation as i32 + amount).rem_euclid(count) as usize
    }

    /// Absolute cells for a hypothetical rotation, without committing it
    pub fn cells_at(&self, rotation_offset: i32) -> impl Iterator<Item = Position> + '_ {
        let (row, col) = (self.row, self.col);
        self.shape
            .cells(self.rotation_after(rotation_offset))
            .iter()
            .map(move |&(dr, dc)| (row + dr, col + dc))
    }

    /// Absolute cells at the current rotation and position
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells_at(0)
    }

    /// Current cells collected into a stack buffer
    pub fn cell_buf(&self) -> ShapeCells {
        self.cells().collect()
    }

    pub fn rotate(&mut self, amount: i32) {
        self.rotation = self.rotation_after(amount);
    }

    pub fn translate(&mut self, rows: i32, cols: i32) {
        self.row += rows;
        self.col += cols;
    }

    /// Back to rotation 0 at the spawn position
    pub fn reset_to_spawn(&mut self) {
        self.rotation = 0;
        self.row = 0;
        self.col = self.spawn_col;
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "piece {} rot {} at ({}, {})",
            self.kind(),
            self.rotation,
            self.row,
            self.col
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::PieceKind;

    fn piece(kind: PieceKind) -> Piece {
        Catalog::standard().spawn(kind.index(), 10).unwrap()
    }

    #[test]
    fn spawn_centers_by_bounding_square() {
        assert_eq!(piece(PieceKind::I).col(), 3);
        assert_eq!(piece(PieceKind::T).col(), 3);
        assert_eq!(piece(PieceKind::O).col(), 4);
        assert_eq!(piece(PieceKind::O).row(), 0);
    }

    #[test]
    fn cells_at_does_not_mutate() {
        let p = piece(PieceKind::T);
        let rotated: Vec<_> = p.cells_at(1).collect();
        assert_eq!(rotated, vec![(0, 4), (1, 4), (1, 5), (2, 4)]);
        assert_eq!(p.rotation(), 0);
    }

    #[test]
    fn rotate_wraps_both_ways() {
        let mut p = piece(PieceKind::S);
        p.rotate(-1);
        assert_eq!(p.rotation(), 3);
        p.rotate(1);
        p.rotate(1);
        assert_eq!(p.rotation(), 1);

        let mut o = piece(PieceKind::O);
        o.rotate(1);
        assert_eq!(o.rotation(), 0);
    }

    #[test]
    fn reset_to_spawn_restores_origin() {
        let mut p = piece(PieceKind::L);
        p.translate(7, -2);
        p.rotate(1);
        p.reset_to_spawn();
        assert_eq!((p.row(), p.col(), p.rotation()), (0, 3, 0));
    }
}
