// Copyright (c) 2026 rezky_nightky

use crate::cell::Cell;
use crate::frame::Frame;
use crate::palette::Palette;
use crate::session::Session;

/// Each board cell is two terminal columns wide so cells come out
/// roughly square.
pub const CELL_W: u16 = 2;
const BLOCK: char = '\u{2588}';
const PANEL_GAP: u16 = 2;

/// Where the board lands inside the terminal. The bottom row is reserved
/// for the status line; the rest centers the board, clipping if the
/// terminal is smaller than the configured grid.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    pub term_w: u16,
    pub term_h: u16,
    pub board_x: u16,
    pub board_y: u16,
    grid_w: u16,
    grid_h: u16,
}

impl Layout {
    pub fn new(term_w: u16, term_h: u16, grid_w: usize, grid_h: usize) -> Self {
        let grid_w = grid_w.min(u16::MAX as usize) as u16;
        let grid_h = grid_h.min(u16::MAX as usize) as u16;
        let board_w = grid_w.saturating_mul(CELL_W);
        let avail_h = term_h.saturating_sub(1);
        Self {
            term_w,
            term_h,
            board_x: term_w.saturating_sub(board_w) / 2,
            board_y: avail_h.saturating_sub(grid_h) / 2,
            grid_w,
            grid_h,
        }
    }

    /// Maps a mouse position to the board cell under it.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        if y < self.board_y || x < self.board_x {
            return None;
        }
        let row = y - self.board_y;
        let col = (x - self.board_x) / CELL_W;
        if row >= self.grid_h || col >= self.grid_w {
            return None;
        }
        Some((row as usize, col as usize))
    }
}

fn put_str(frame: &mut Frame, x: u16, y: u16, s: &str, cell: Cell) {
    for (i, ch) in s.chars().enumerate() {
        if i as u16 >= frame.width.saturating_sub(x) {
            break;
        }
        frame.set(x + i as u16, y, Cell { ch, ..cell });
    }
}

/// Paints the whole scene into the frame: board, export panel when it
/// fits, status line. The frame dedups, so repainting an unchanged
/// scene queues nothing for the terminal.
pub fn draw(session: &Session, layout: &Layout, palette: &Palette, frame: &mut Frame) {
    let blank = Cell::blank_with_bg(palette.bg);
    for y in 0..frame.height {
        for x in 0..frame.width {
            frame.set(x, y, blank);
        }
    }

    let cell_fg = if session.is_animating() {
        palette.noise
    } else {
        palette.active
    };
    for row in 0..session.grid.height() {
        for col in 0..session.grid.width() {
            if !session.grid.is_active(row, col) {
                continue;
            }
            let y = layout.board_y + row as u16;
            let x = layout.board_x + col as u16 * CELL_W;
            for dx in 0..CELL_W {
                frame.set(x + dx, y, Cell::glyph(BLOCK, cell_fg, palette.bg));
            }
        }
    }

    draw_export_panel(session, layout, palette, frame);
    draw_status_line(session, layout, palette, frame);
}

fn draw_export_panel(session: &Session, layout: &Layout, palette: &Palette, frame: &mut Frame) {
    let Some(rows) = session.last_export() else {
        return;
    };

    let panel_x = layout
        .board_x
        .saturating_add(layout.grid_w.saturating_mul(CELL_W))
        .saturating_add(PANEL_GAP);
    let panel_w = rows
        .iter()
        .map(|r| r.chars().count())
        .max()
        .unwrap_or(0)
        .max("export:".len()) as u16;
    if panel_x.saturating_add(panel_w) > layout.term_w {
        return;
    }

    let dim = Cell::glyph(' ', palette.dim, palette.bg);
    put_str(frame, panel_x, layout.board_y, "export:", dim);
    for (i, row) in rows.iter().enumerate() {
        let y = layout.board_y.saturating_add(1).saturating_add(i as u16);
        if y.saturating_add(1) >= layout.term_h {
            break;
        }
        put_str(frame, panel_x, y, row, dim);
    }
}

fn draw_status_line(session: &Session, layout: &Layout, palette: &Palette, frame: &mut Frame) {
    if layout.term_h < 2 {
        return;
    }
    let y = layout.term_h - 1;

    let (text, fg) = if let Some(warning) = session.warning() {
        (format!("warning: {}", warning), palette.active)
    } else {
        let mut s = match session.shown_face() {
            Some(name) => format!("face: {}", name),
            None => "face: ?".to_string(),
        };
        if !session.is_animating() && !session.rotation_armed() {
            s.push_str("  (rotation paused)");
        }
        s.push_str("  [space] random  [n] next  [i] reset  [q] quit");
        (s, palette.text)
    };

    put_str(frame, 0, y, &text, Cell::glyph(' ', fg, palette.bg));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::FaceLibrary;
    use crate::config::Profile;
    use crate::palette::build_palette;
    use crate::runtime::{ColorMode, ColorScheme};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn small_session() -> Session {
        let profile = Profile {
            width: 4,
            height: 3,
            frames: 2,
            frame_delay: Duration::from_millis(10),
            noise_chance: 0.1,
            rotate_every: Some(Duration::from_secs(5)),
        };
        Session::new(FaceLibrary::builtin(), profile, StdRng::seed_from_u64(1))
    }

    #[test]
    fn layout_centers_the_board() {
        // 4x3 board in an 80x25 terminal: 8 columns wide, 24 usable rows
        let l = Layout::new(80, 25, 4, 3);
        assert_eq!(l.board_x, (80 - 8) / 2);
        assert_eq!(l.board_y, (24 - 3) / 2);
    }

    #[test]
    fn hit_testing_maps_both_block_columns_to_one_cell() {
        let l = Layout::new(20, 10, 4, 3);
        let (bx, by) = (l.board_x, l.board_y);
        assert_eq!(l.cell_at(bx, by), Some((0, 0)));
        assert_eq!(l.cell_at(bx + 1, by), Some((0, 0)));
        assert_eq!(l.cell_at(bx + 2, by + 2), Some((2, 1)));
        assert_eq!(l.cell_at(bx + 8, by), None); // right of the board
        assert_eq!(l.cell_at(0, 0), None);
    }

    #[test]
    fn active_cells_render_as_double_blocks() {
        let mut s = small_session();
        assert!(s.toggle_cell(1, 2));

        let palette = build_palette(ColorScheme::Pink, ColorMode::TrueColor, true);
        let layout = Layout::new(30, 10, 4, 3);
        let mut frame = Frame::new(30, 10, palette.bg);
        draw(&s, &layout, &palette, &mut frame);

        let x = layout.board_x + 2 * CELL_W;
        let y = layout.board_y + 1;
        assert_eq!(frame.get(x, y).unwrap().ch, BLOCK);
        assert_eq!(frame.get(x + 1, y).unwrap().ch, BLOCK);
        assert_eq!(frame.get(x, y).unwrap().fg, palette.active);
        // neighbor cell stays blank
        assert_eq!(frame.get(x + 2, y).unwrap().ch, ' ');
    }

    #[test]
    fn export_panel_clips_at_a_full_height_terminal() {
        let profile = Profile {
            width: 1,
            height: u16::MAX,
            frames: 2,
            frame_delay: Duration::from_millis(10),
            noise_chance: 0.1,
            rotate_every: None,
        };
        let mut s = Session::new(FaceLibrary::builtin(), profile, StdRng::seed_from_u64(1));
        s.toggle_cell(0, 0);
        s.toggle_cell(u16::MAX as usize - 1, 0);

        let palette = build_palette(ColorScheme::Pink, ColorMode::Mono, true);
        let layout = Layout::new(20, u16::MAX, 1, u16::MAX as usize);
        let mut frame = Frame::new(20, u16::MAX, palette.bg);
        draw(&s, &layout, &palette, &mut frame);

        let panel_x = layout.board_x + CELL_W + PANEL_GAP;
        assert_eq!(frame.get(panel_x, layout.board_y).unwrap().ch, 'e');
        assert_eq!(frame.get(panel_x, layout.board_y + 1).unwrap().ch, 'x');
    }

    #[test]
    fn export_panel_appears_after_a_toggle() {
        let mut s = small_session();
        s.toggle_cell(0, 0);

        let palette = build_palette(ColorScheme::Pink, ColorMode::Mono, true);
        let layout = Layout::new(40, 12, 4, 3);
        let mut frame = Frame::new(40, 12, palette.bg);
        draw(&s, &layout, &palette, &mut frame);

        let panel_x = layout.board_x + 4 * CELL_W + PANEL_GAP;
        assert_eq!(frame.get(panel_x, layout.board_y).unwrap().ch, 'e');
        assert_eq!(frame.get(panel_x, layout.board_y + 1).unwrap().ch, 'x');
    }
}
