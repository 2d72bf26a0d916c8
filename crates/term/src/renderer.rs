//! TerminalRenderer: flushes surfaces to a real terminal.
//!
//! Drawing goes through a [`Frame`]: `begin_frame` hands out the back surface,
//! `present` diffs it against what is on screen and writes only the changed
//! runs. A frame dropped without `present` (early return, `?`) still flushes,
//! so the terminal never falls behind the game state.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};
use tracing::{debug, warn};

use crate::surface::{Glyph, Rgb, Style, Surface};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    back: Surface,
    /// What the terminal currently shows; `None` forces a full redraw
    front: Option<Surface>,
    buf: Vec<u8>,
    key_release_events: bool,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Render into any writer; tests use a `Vec<u8>`.
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            back: Surface::new(0, 0),
            front: None,
            buf: Vec::with_capacity(64 * 1024),
            key_release_events: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.front = None;
        Ok(())
    }

    /// Ask the terminal to report key releases.
    ///
    /// Returns false when the terminal does not support it; callers then fall
    /// back to synthetic releases.
    pub fn enable_key_release_events(&mut self) -> Result<bool> {
        if !terminal::supports_keyboard_enhancement()? {
            debug!("keyboard enhancement not supported");
            return Ok(false);
        }
        self.buf.clear();
        self.buf.queue(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
        self.flush_buf()?;
        self.key_release_events = true;
        Ok(true)
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.key_release_events {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
            self.key_release_events = false;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next present to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Start a frame of `width x height` cells.
    pub fn begin_frame(&mut self, width: u16, height: u16) -> Frame<'_, W> {
        self.back.resize(width, height);
        self.back.clear(Glyph::default());
        Frame {
            renderer: self,
            presented: false,
        }
    }

    fn present_back(&mut self) -> Result<()> {
        self.buf.clear();
        let (w, h) = (self.back.width(), self.back.height());
        match self.front.as_mut() {
            Some(front) if front.width() == w && front.height() == h => {
                encode_diff_into(front, &self.back, &mut self.buf)?;
                std::mem::swap(front, &mut self.back);
            }
            _ => {
                encode_full_into(&self.back, &mut self.buf)?;
                let shown = std::mem::replace(&mut self.back, Surface::new(w, h));
                self.front = Some(shown);
            }
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// One frame being drawn; flushes on `present` or on drop.
pub struct Frame<'a, W: Write = io::Stdout> {
    renderer: &'a mut TerminalRenderer<W>,
    presented: bool,
}

impl<W: Write> Frame<'_, W> {
    pub fn surface(&mut self) -> &mut Surface {
        &mut self.renderer.back
    }

    /// Write the frame to the terminal.
    pub fn present(mut self) -> Result<()> {
        self.presented = true;
        self.renderer.present_back()
    }
}

impl<W: Write> Drop for Frame<'_, W> {
    fn drop(&mut self) {
        if self.presented {
            return;
        }
        if let Err(err) = self.renderer.present_back() {
            warn!(error = %err, "flushing unpresented frame failed");
        }
    }
}

/// Encode a full redraw of `surface` into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(surface: &Surface, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<Style> = None;
    for y in 0..surface.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..surface.width() {
            let glyph = surface.get(x, y).unwrap_or_default();
            write_glyph(out, glyph, &mut current)?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the runs that differ between `prev` and `next`.
///
/// Both surfaces must have the same size.
pub fn encode_diff_into(prev: &Surface, next: &Surface, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<Style> = None;

    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let glyph = next.get(x + dx, y).unwrap_or_default();
            write_glyph(out, glyph, &mut current)?;
        }
    }

    if current.is_some() {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn write_glyph(out: &mut Vec<u8>, glyph: Glyph, current: &mut Option<Style>) -> Result<()> {
    if *current != Some(glyph.style) {
        apply_style_into(out, glyph.style)?;
        *current = Some(glyph.style);
    }
    out.queue(Print(glyph.ch))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// `(x, y, len)` for every horizontal run of changed glyphs, top to bottom
fn changed_runs<'a>(prev: &'a Surface, next: &'a Surface) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let w = next.width();
    (0..next.height()).flat_map(move |y| {
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < w && prev.get(x, y) == next.get(x, y) {
                x += 1;
            }
            if x >= w {
                return None;
            }
            let start = x;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            Some((start, y, x - start))
        })
    })
}
