//! TerminalRenderer: puts a framebuffer on a real terminal.
//!
//! The game screen is small and changes a few rows at a time (the falling
//! piece, the score line), so updates are done per screen row: a row is
//! rewritten in full whenever any of its cells differ from what is shown.
//! The first frame, a resize, or [`TerminalRenderer::invalidate`] clears the
//! screen and writes every row.
//!
//! Styling is tracked as a `Pen` so consecutive cells with the same colors
//! are printed as one string, and a color change only sends that color.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal currently shows; `None` forces a clear and full write
    shown: Option<FrameBuffer>,
    scratch: Vec<u8>,
    raw: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            scratch: Vec::with_capacity(8 * 1024),
            raw: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        self.shown = None;
        queue!(
            self.stdout,
            terminal::EnterAlternateScreen,
            terminal::DisableLineWrap,
            cursor::Hide
        )?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Give the terminal back to the shell. Does nothing if not entered.
    pub fn exit(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        self.raw = false;
        queue!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            cursor::Show,
            terminal::EnableLineWrap,
            terminal::LeaveAlternateScreen
        )?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget what is on screen; the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`, then hand back the previously shown buffer in its place.
    ///
    /// Keep one `FrameBuffer` for the whole session and pass it every frame:
    /// the two buffers trade places, so nothing is cloned. The buffer handed
    /// back holds an older frame and should be redrawn before the next call.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.scratch.clear();
        let rows = encode_frame(self.shown.as_ref(), fb, &mut self.scratch)?;
        if rows > 0 {
            self.stdout.write_all(&self.scratch)?;
            self.stdout.flush()?;
        }

        let mut back = self
            .shown
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        back.resize(fb.width(), fb.height());
        std::mem::swap(&mut back, fb);
        self.shown = Some(back);
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        // Leaves the shell usable if the game loop bailed out with an error.
        let _ = self.exit();
    }
}

/// Terminal drawing state carried between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pen {
    fg: Rgb,
    bg: Rgb,
    bold: bool,
    dim: bool,
}

impl From<CellStyle> for Pen {
    fn from(style: CellStyle) -> Self {
        Self {
            fg: style.fg,
            bg: style.bg,
            bold: style.bold,
            dim: style.dim,
        }
    }
}

/// Append the escape sequences that turn the screen showing `shown` into
/// `next`. Returns how many rows were written; 0 means `out` is untouched.
///
/// With no `shown` frame, or one of a different size, the screen is cleared
/// and every row of `next` is written.
pub fn encode_frame(
    shown: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<usize> {
    let width = next.width() as usize;
    if width == 0 || next.height() == 0 {
        return Ok(0);
    }

    let shown = shown.filter(|s| s.width() == next.width() && s.height() == next.height());
    if shown.is_none() {
        queue!(
            out,
            SetAttribute(Attribute::Reset),
            terminal::Clear(terminal::ClearType::All)
        )?;
    }

    let mut pen = None;
    let mut rows = 0;
    for (y, row) in next.cells().chunks(width).enumerate() {
        let dirty = match shown {
            Some(s) => row_changed(&s.cells()[y * width..(y + 1) * width], row),
            None => true,
        };
        if dirty {
            encode_row(y as u16, row, &mut pen, out)?;
            rows += 1;
        }
    }

    if rows > 0 {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    Ok(rows)
}

fn row_changed(before: &[Cell], after: &[Cell]) -> bool {
    before != after
}

/// Write one screen row from column 0, one `Print` per run of equal style.
fn encode_row(y: u16, row: &[Cell], pen: &mut Option<Pen>, out: &mut Vec<u8>) -> Result<()> {
    queue!(out, cursor::MoveTo(0, y))?;

    let mut text = String::with_capacity(row.len());
    let mut run_style: Option<Pen> = None;
    for cell in row {
        let style = Pen::from(cell.style);
        if run_style != Some(style) {
            if !text.is_empty() {
                queue!(out, Print(&text))?;
                text.clear();
            }
            queue_pen(*pen, style, out)?;
            *pen = Some(style);
            run_style = Some(style);
        }
        text.push(cell.ch);
    }
    if !text.is_empty() {
        queue!(out, Print(&text))?;
    }
    Ok(())
}

/// Move the terminal from pen `from` to `to`, sending only what differs.
///
/// Attributes can only be switched off with a full reset, which also drops
/// the colors, so an attribute change resends everything.
fn queue_pen(from: Option<Pen>, to: Pen, out: &mut Vec<u8>) -> Result<()> {
    let from = match from {
        Some(from) if from.bold == to.bold && from.dim == to.dim => from,
        _ => {
            queue!(
                out,
                SetAttribute(Attribute::Reset),
                SetForegroundColor(color(to.fg)),
                SetBackgroundColor(color(to.bg))
            )?;
            if to.bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            if to.dim {
                queue!(out, SetAttribute(Attribute::Dim))?;
            }
            return Ok(());
        }
    };

    if from.fg != to.fg {
        queue!(out, SetForegroundColor(color(to.fg)))?;
    }
    if from.bg != to.bg {
        queue!(out, SetBackgroundColor(color(to.bg)))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
