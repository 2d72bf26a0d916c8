//! Board module - the grid of locked cells
//!
//! The board is `width x height` cells stored as one flat, row-major `Vec`.
//! Cell value 0 is empty; any other value is the locked piece's type + 1.
//! Coordinates are `(row, col)` with row 0 at the top.
//!
//! The board is the only authority on legality: every move, rotation, spawn
//! and hold restore asks [`Board::has_collision`] before it is committed.

use std::iter::FusedIterator;

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{CellValue, EMPTY, MAX_PIECE_CELLS};

/// A hypothetical displacement of a piece: rows down, columns right, rotation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Offset {
    pub row: i32,
    pub col: i32,
    pub rot: i32,
}

impl Offset {
    pub const NONE: Offset = Offset::new(0, 0, 0);
    pub const DOWN: Offset = Offset::new(1, 0, 0);
    pub const LEFT: Offset = Offset::new(0, -1, 0);
    pub const RIGHT: Offset = Offset::new(0, 1, 0);
    pub const CW: Offset = Offset::new(0, 0, 1);
    pub const CCW: Offset = Offset::new(0, 0, -1);

    pub const fn new(row: i32, col: i32, rot: i32) -> Self {
        Self { row, col, rot }
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major cells (row * width + col)
    cells: Vec<CellValue>,
}

impl Board {
    /// Create an empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell value at `(row, col)`, `None` if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<CellValue> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Set a cell. Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, value: CellValue) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_free(&self, row: i32, col: i32) -> bool {
        self.get(row, col) == Some(EMPTY)
    }

    /// One row as a slice
    pub fn row(&self, row: usize) -> Option<&[CellValue]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Every column in `row` is occupied
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|&c| c != EMPTY))
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Locked cells as `(row, col)`, top-left first
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.positions()
            .filter(move |&(row, col)| self.cells[row * self.width + col] != EMPTY)
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Every `(row, col)` on the board, top-left first
    pub fn positions(&self) -> Positions {
        Positions::new(self.width, self.height)
    }

    /// Would `piece`, displaced by `offset`, leave the board or overlap a locked cell?
    pub fn has_collision(&self, piece: &Piece, offset: Offset) -> bool {
        piece
            .cells_at(offset.rot)
            .any(|(row, col)| !self.is_free(row + offset.row, col + offset.col))
    }

    /// How many rows `piece` can fall before it would collide
    pub fn drop_distance(&self, piece: &Piece) -> i32 {
        let mut distance = 0;
        while !self.has_collision(piece, Offset::new(distance + 1, 0, 0)) {
            distance += 1;
        }
        distance
    }

    /// Write `piece` into the grid and remove any rows it completed
    ///
    /// Only the rows the piece touches are checked. Full rows are removed from
    /// the bottom up so earlier removals never shift rows still waiting to be
    /// removed, then the same number of empty rows is inserted at the top.
    /// Returns the number of rows removed.
    pub fn lock_and_clear_lines(&mut self, piece: &Piece) -> usize {
        let value = piece.shape().cell_value();
        let mut touched = ArrayVec::<usize, MAX_PIECE_CELLS>::new();

        for (row, col) in piece.cells() {
            if !self.set(row, col, value) {
                continue;
            }
            let row = row as usize;
            if !touched.contains(&row) {
                touched.push(row);
            }
        }

        let mut full: ArrayVec<usize, MAX_PIECE_CELLS> =
            touched.into_iter().filter(|&r| self.is_row_full(r)).collect();
        if full.is_empty() {
            return 0;
        }

        full.sort_unstable_by(|a, b| b.cmp(a));
        for &row in &full {
            let start = row * self.width;
            self.cells.drain(start..start + self.width);
        }

        let removed = full.len();
        self.cells
            .splice(0..0, std::iter::repeat(EMPTY).take(removed * self.width));
        debug_assert_eq!(self.cells.len(), self.width * self.height);

        removed
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Build a board from text rows for tests; `.` is empty, a digit is a cell value
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let mut board = Self::new(width, height);
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                let value = ch.to_digit(10).unwrap_or(0) as CellValue;
                board.set(r as i32, c as i32, value);
            }
        }
        board
    }
}

/// Lazy iterator over every `(row, col)` of a grid, row by row
///
/// Finite and cheap to build; [`Board::positions`] hands out a fresh pass on every call.
#[derive(Debug, Clone)]
pub struct Positions {
    width: usize,
    next: usize,
    end: usize,
}

impl Positions {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            next: 0,
            end: width * height,
        }
    }
}

impl Iterator for Positions {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some((i / self.width, i % self.width))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Positions {}

impl FusedIterator for Positions {}
