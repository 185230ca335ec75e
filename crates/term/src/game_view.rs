//! GameView: maps a core [`Snapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Snapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Piece, BOARD_HEIGHT, BOARD_WIDTH};

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

/// Columns reserved beside the well for score and legend.
const SIDEBAR_W: u16 = 16;

const COLOR_WIRE: Rgb = Rgb::new(220, 220, 220);
const COLOR_POWERED: Rgb = Rgb::new(80, 160, 255);
const COLOR_DESTINATION: Rgb = Rgb::new(80, 160, 255);
const COLOR_JUNK: Rgb = Rgb::new(110, 110, 110);
const COLOR_FIRE: Rgb = Rgb::new(255, 150, 60);
const COLOR_BORDER: Rgb = Rgb::new(150, 150, 150);
const COLOR_TEXT: Rgb = Rgb::new(170, 170, 170);

/// Two characters per board cell, compensating for terminal glyph aspect
/// ratio (2x1 cells).
fn glyph(piece: Piece) -> [char; 2] {
    match piece {
        Piece::Empty => [' ', ' '],
        Piece::HorizConn => ['─', '─'],
        Piece::VertConn => ['│', ' '],
        Piece::UpLeft => ['┘', ' '],
        Piece::DownLeft => ['┐', ' '],
        Piece::DownRight => ['┌', '─'],
        Piece::UpRight => ['└', '─'],
        Piece::Destination => ['◎', ' '],
        Piece::Junk => ['▒', '▒'],
        Piece::Fire => ['✶', ' '],
    }
}

fn style_for(piece: Piece, powered: bool) -> CellStyle {
    let fg = match piece {
        Piece::Destination => COLOR_DESTINATION,
        Piece::Junk => COLOR_JUNK,
        Piece::Fire => COLOR_FIRE,
        _ if powered => COLOR_POWERED,
        _ => COLOR_WIRE,
    };
    CellStyle {
        fg,
        bold: powered,
        ..CellStyle::default()
    }
}

/// A lightweight terminal renderer for the Nettis well.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

impl GameView {
    /// Render a snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path: callers reuse one framebuffer
    /// across frames and only resize on terminal size changes.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_w = BOARD_WIDTH as u16 * self.cell_w;
        let board_h = BOARD_HEIGHT as u16;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + SIDEBAR_W) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        // Board cells, with the falling brick composed on top.
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                let piece = snap.board[y as usize][x as usize];
                let powered = !snap.powers[y as usize][x as usize].is_empty();
                self.draw_piece(fb, start_x, start_y, x as u16, y as u16, piece, powered);
            }
        }
        for (i, &(x, y)) in snap.brick.locations().iter().enumerate() {
            let piece = snap.brick.pieces[i];
            if piece == Piece::Empty {
                continue;
            }
            if x >= 0 && x < BOARD_WIDTH && y >= 0 && y < BOARD_HEIGHT {
                self.draw_piece(fb, start_x, start_y, x as u16, y as u16, piece, false);
            }
        }

        self.draw_sidebar(fb, start_x + frame_w + 2, start_y, snap.score);
    }

    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        piece: Piece,
        powered: bool,
    ) {
        let chars = glyph(piece);
        let style = style_for(piece, powered);
        let px = start_x + 1 + x * self.cell_w;
        let py = start_y + 1 + y;
        for (i, ch) in chars.iter().enumerate() {
            fb.put_char(px + i as u16, py, *ch, style);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle {
            fg: COLOR_BORDER,
            ..CellStyle::default()
        };
        for cx in x + 1..x + w - 1 {
            fb.put_char(cx, y, '─', style);
            fb.put_char(cx, y + h - 1, '─', style);
        }
        for cy in y + 1..y + h - 1 {
            fb.put_char(x, cy, '│', style);
            fb.put_char(x + w - 1, cy, '│', style);
        }
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
    }

    fn draw_sidebar(&self, fb: &mut FrameBuffer, x: u16, y: u16, score: u32) {
        let text = CellStyle {
            fg: COLOR_TEXT,
            ..CellStyle::default()
        };

        fb.put_str(x, y, "NETTIS", text);
        fb.put_str(x, y + 2, &format!("Score: {score}"), text);

        let legend: [(Piece, &str); 4] = [
            (Piece::Destination, "Nodes"),
            (Piece::HorizConn, "Connections"),
            (Piece::Fire, "Fire"),
            (Piece::Junk, "Junk"),
        ];
        for (i, (piece, label)) in legend.iter().enumerate() {
            let row = y + 4 + 2 * i as u16;
            let chars = glyph(*piece);
            let style = style_for(*piece, false);
            fb.put_char(x, row, chars[0], style);
            fb.put_char(x + 1, row, chars[1], style);
            fb.put_str(x + 3, row, label, text);
        }
    }
}
