//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Board row 0 is the bottom row, so it is drawn on the last line of the
//! play area and row 19 on the first.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

pub const START_PROMPT: &str = "PRESS SPACE TO START";
pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const RESTART_PROMPT: &str = "SPACE: RESTART";

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const BLACK: Rgb = Rgb::new(0, 0, 0);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Screen placement of the board frame, computed once per frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_ghost: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            show_ghost: true,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_ghost(mut self, show_ghost: bool) -> Self {
        self.show_ghost = show_ghost;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Callers can reuse one framebuffer across frames.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let w = board_px_w + 2;
        let h = board_px_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        draw_border(
            fb,
            frame,
            CellStyle::new(Rgb::new(200, 200, 200), BLACK),
        );

        for row in 0..BOARD_HEIGHT as i8 {
            for col in 0..BOARD_WIDTH as i8 {
                match PieceKind::from_code(snap.board[row as usize][col as usize]) {
                    Some(kind) => self.draw_block(fb, frame, row, col, kind),
                    None => self.fill_board_cell(
                        fb,
                        frame,
                        row,
                        col,
                        '·',
                        CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim(),
                    ),
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_row) = snap.ghost_row.filter(|_| self.show_ghost) {
                if ghost_row != active.row {
                    let style = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
                    for (row, col) in active.cells_at_row(ghost_row) {
                        self.fill_board_cell(fb, frame, row, col, '░', style);
                    }
                }
            }
            for (row, col) in active.cells {
                self.draw_block(fb, frame, row, col, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.phase {
            GamePhase::AwaitingStart => draw_overlay(fb, frame, &[START_PROMPT]),
            GamePhase::GameOver => draw_overlay(fb, frame, &[GAME_OVER_TEXT, RESTART_PROMPT]),
            GamePhase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Screen position of the top-left character of board cell `(row, col)`.
    fn cell_origin(&self, frame: Frame, row: i8, col: i8) -> Option<(u16, u16)> {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        let flipped = (BOARD_HEIGHT as u16 - 1) - row as u16;
        Some((
            frame.x + 1 + col as u16 * self.cell_w,
            frame.y + 1 + flipped * self.cell_h,
        ))
    }

    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        row: i8,
        col: i8,
        ch: char,
        style: CellStyle,
    ) {
        if let Some((x, y)) = self.cell_origin(frame, row, col) {
            fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, row: i8, col: i8, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), PLAY_BG).bold();
        self.fill_board_cell(fb, frame, row, col, '█', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "HOLD", label);
        let hold_style = if snap.can_hold { value } else { value.dim() };
        draw_preview(fb, panel_x, y + 1, snap.hold, hold_style);
        y = y.saturating_add(4);

        fb.put_str(panel_x, y, "NEXT", label);
        draw_preview(fb, panel_x, y + 1, snap.next, value);
    }
}

/// Small drawing of a piece in spawn orientation, two lines tall.
fn draw_preview(fb: &mut FrameBuffer, x: u16, y: u16, kind: Option<PieceKind>, style: CellStyle) {
    let Some(kind) = kind else {
        fb.put_str(x, y, "-", style);
        return;
    };

    let shape = get_shape(kind, crate::types::Rotation::North);
    let top = shape.iter().map(|&(_, r)| r).max().unwrap_or(0);
    let left = shape.iter().map(|&(c, _)| c).min().unwrap_or(0);
    let color = CellStyle {
        fg: piece_color(kind),
        ..style
    };
    for (c, r) in shape {
        let px = x + ((c - left) as u16) * 2;
        let py = y + (top - r) as u16;
        fb.fill_rect(px, py, 2, 1, '█', color);
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centred lines of text over the board, starting at its middle.
fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), BLACK).bold();
    let mid_y = frame.y.saturating_add(frame.h / 2);
    for (i, text) in lines.iter().enumerate() {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y.saturating_add(i as u16), text, style);
    }
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
