use arrayvec::ArrayVec;

use crate::catalog::ShapeCells;
use crate::types::{CellValue, EMPTY, MAX_NEXT_QUEUE_LEN};

/// The falling piece, with its cells already in board coordinates
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveSnapshot {
    pub kind: usize,
    pub rotation: usize,
    pub cells: ShapeCells,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Locked cells, row-major; the active piece is not included
    pub board: Vec<CellValue>,
    pub active: ActiveSnapshot,
    /// Where the active piece would land
    pub ghost: ShapeCells,
    pub next_queue: ArrayVec<usize, MAX_NEXT_QUEUE_LEN>,
    pub hold: Option<usize>,
    pub can_hold: bool,
    pub paused: bool,
    pub score: u32,
    pub lines: u32,
    pub tetrises: u32,
    pub games_played: u32,
}

impl GameSnapshot {
    /// Locked cell value, `EMPTY` outside the board
    pub fn cell(&self, row: usize, col: usize) -> CellValue {
        if row >= self.height || col >= self.width {
            return EMPTY;
        }
        self.board[row * self.width + col]
    }

    /// Locked cells row by row
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.board.chunks(self.width.max(1))
    }

    pub fn clear(&mut self) {
        self.board.fill(EMPTY);
        self.active = ActiveSnapshot::default();
        self.ghost.clear();
        self.next_queue.clear();
        self.hold = None;
        self.can_hold = true;
        self.paused = false;
        self.score = 0;
        self.lines = 0;
        self.tetrises = 0;
        self.games_played = 0;
    }

    /// Input reaches the piece
    pub fn playable(&self) -> bool {
        !self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_outside_board_is_empty() {
        let snap = GameSnapshot {
            width: 2,
            height: 2,
            board: vec![0, 1, 2, 0],
            ..GameSnapshot::default()
        };
        assert_eq!(snap.cell(0, 1), 1);
        assert_eq!(snap.cell(1, 0), 2);
        assert_eq!(snap.cell(2, 0), EMPTY);
        assert_eq!(snap.cell(0, 5), EMPTY);
        assert_eq!(snap.rows().count(), 2);
    }

    #[test]
    fn clear_keeps_board_allocation() {
        let mut snap = GameSnapshot {
            width: 2,
            height: 1,
            board: vec![3, 3],
            score: 9,
            ..GameSnapshot::default()
        };
        snap.clear();
        assert_eq!(snap.board, vec![EMPTY, EMPTY]);
        assert_eq!(snap.score, 0);
        assert!(snap.playable());
    }
}
