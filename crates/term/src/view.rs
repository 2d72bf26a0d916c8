//! GameView: maps a `GameSnapshot` onto a terminal surface.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Catalog, GameSnapshot};
use crate::surface::{Glyph, Rgb, Style, Surface};
use crate::types::{CellValue, EMPTY};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Piece colors by type index; custom catalogs with more types wrap around.
pub const PIECE_COLORS: [Rgb; 7] = [
    Rgb::new(0, 255, 255),
    Rgb::new(128, 0, 128),
    Rgb::new(0, 128, 0),
    Rgb::new(255, 0, 0),
    Rgb::new(255, 165, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 255, 0),
];

const SCREEN_BG: Rgb = Rgb::new(20, 20, 20);
const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const GRID_FG: Rgb = Rgb::new(100, 100, 100);
const TEXT_FG: Rgb = Rgb::new(220, 220, 220);

const PANEL_GAP: u16 = 2;
const PANEL_W: u16 = 14;

pub fn piece_color(kind: usize) -> Rgb {
    PIECE_COLORS[kind % PIECE_COLORS.len()]
}

/// Terminal layout of the board and its side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    show_ghost: bool,
    show_grid: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            show_ghost: true,
            show_grid: true,
        }
    }
}

/// Top-left corner of the board interior.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_ghost(mut self, show: bool) -> Self {
        self.show_ghost = show;
        self
    }

    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Columns and rows the whole view needs for a `width x height` board.
    pub fn required_size(&self, width: usize, height: usize) -> (u16, u16) {
        let frame_w = width as u16 * self.cell_w + 2;
        let frame_h = height as u16 * self.cell_h + 2;
        (frame_w + PANEL_GAP + PANEL_W, frame_h)
    }

    /// Draw `snap` into an existing surface.
    ///
    /// `catalog` supplies the shapes for the hold and next previews.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        catalog: &Catalog,
        viewport: Viewport,
        surface: &mut Surface,
    ) {
        surface.resize(viewport.width, viewport.height);
        surface.clear(Glyph::blank(Style::new(TEXT_FG, SCREEN_BG)));

        let board_w = snap.width as u16 * self.cell_w;
        let board_h = snap.height as u16 * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let (total_w, _) = self.required_size(snap.width, snap.height);

        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;
        let origin = Origin {
            x: start_x + 1,
            y: start_y + 1,
        };

        surface.fill_rect(origin.x, origin.y, board_w, board_h, ' ', Style::new(GRID_FG, BOARD_BG));
        draw_border(
            surface,
            start_x,
            start_y,
            frame_w,
            frame_h,
            Style::new(TEXT_FG, SCREEN_BG),
        );

        for (row, cells) in snap.rows().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                self.draw_locked(surface, origin, row as i32, col as i32, value);
            }
        }

        if self.show_ghost {
            let style = Style::new(piece_color(snap.active.kind), BOARD_BG).dim();
            for &(row, col) in &snap.ghost {
                self.fill_cell(surface, origin, snap, row, col, '░', style);
            }
        }

        let active = Style::new(piece_color(snap.active.kind), BOARD_BG).bold();
        for &(row, col) in &snap.active.cells {
            self.fill_cell(surface, origin, snap, row, col, '█', active);
        }

        let panel_x = start_x + frame_w + PANEL_GAP;
        self.draw_panel(surface, snap, catalog, viewport, panel_x, start_y);

        if snap.paused {
            let text = "PAUSED";
            let x = start_x + frame_w.saturating_sub(text.len() as u16) / 2;
            let y = start_y + frame_h / 2;
            surface.put_str(x, y, text, Style::new(Rgb::new(255, 255, 255), SCREEN_BG).bold());
        }
    }

    /// Convenience helper that allocates a new surface.
    pub fn render(&self, snap: &GameSnapshot, catalog: &Catalog, viewport: Viewport) -> Surface {
        let mut surface = Surface::new(viewport.width, viewport.height);
        self.render_into(snap, catalog, viewport, &mut surface);
        surface
    }

    fn draw_locked(&self, surface: &mut Surface, origin: Origin, row: i32, col: i32, value: CellValue) {
        if value == EMPTY {
            if self.show_grid {
                let style = Style::new(GRID_FG, BOARD_BG).dim();
                self.put_cell(surface, origin, row as u16, col as u16, '·', style);
            }
            return;
        }
        let style = Style::new(piece_color(value as usize - 1), BOARD_BG);
        self.put_cell(surface, origin, row as u16, col as u16, '█', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        surface: &mut Surface,
        origin: Origin,
        snap: &GameSnapshot,
        row: i32,
        col: i32,
        ch: char,
        style: Style,
    ) {
        if row < 0 || col < 0 || row as usize >= snap.height || col as usize >= snap.width {
            return;
        }
        self.put_cell(surface, origin, row as u16, col as u16, ch, style);
    }

    fn put_cell(&self, surface: &mut Surface, origin: Origin, row: u16, col: u16, ch: char, style: Style) {
        let x = origin.x + col * self.cell_w;
        let y = origin.y + row * self.cell_h;
        surface.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_panel(
        &self,
        surface: &mut Surface,
        snap: &GameSnapshot,
        catalog: &Catalog,
        viewport: Viewport,
        x: u16,
        mut y: u16,
    ) {
        if x.saturating_add(PANEL_W) > viewport.width {
            return;
        }
        let label = Style::new(TEXT_FG, SCREEN_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), SCREEN_BG);

        for (name, n) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("TETRISES", snap.tetrises),
            ("GAMES", snap.games_played),
        ] {
            surface.put_str(x, y, name, label);
            surface.put_u32(x, y + 1, n, value);
            y += 3;
        }

        surface.put_str(x, y, "HOLD", label);
        y += 1;
        match snap.hold {
            Some(kind) => {
                y += self.draw_preview(surface, catalog, kind, x, y, !snap.can_hold);
            }
            None => {
                surface.put_str(x, y, "-", value);
                y += 1;
            }
        }
        y += 1;

        surface.put_str(x, y, "NEXT", label);
        y += 1;
        for &kind in &snap.next_queue {
            if y >= viewport.height {
                break;
            }
            y += self.draw_preview(surface, catalog, kind, x, y, false) + 1;
        }
    }

    /// Draw rotation 0 of `kind` trimmed to its occupied rows; returns rows used.
    fn draw_preview(
        &self,
        surface: &mut Surface,
        catalog: &Catalog,
        kind: usize,
        x: u16,
        y: u16,
        dim: bool,
    ) -> u16 {
        let Some(cells) = catalog.cells(kind, 0) else {
            return 0;
        };
        let min_row = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
        let max_row = cells.iter().map(|&(r, _)| r).max().unwrap_or(0);
        let min_col = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);

        let mut style = Style::new(piece_color(kind), SCREEN_BG);
        if dim {
            style = style.dim();
        }
        for &(r, c) in cells {
            let px = x + (c - min_col) as u16 * self.cell_w;
            let py = y + (r - min_row) as u16;
            surface.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
        (max_row - min_row + 1) as u16
    }
}

fn draw_border(surface: &mut Surface, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }

    surface.put_char(x, y, '┌', style);
    surface.put_char(x + w - 1, y, '┐', style);
    surface.put_char(x, y + h - 1, '└', style);
    surface.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        surface.put_char(x + dx, y, '─', style);
        surface.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        surface.put_char(x, y + dy, '│', style);
        surface.put_char(x + w - 1, y + dy, '│', style);
    }
}
