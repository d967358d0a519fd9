// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::frame::Frame;

/// Raw-mode alternate-screen guard with mouse capture. Restores the
/// terminal on drop and, via `restore_terminal_best_effort`, from the
/// panic hook and signal handlers.
pub struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(event::EnableMouseCapture)?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self { stdout: out })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: std::time::Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    /// Flushes a frame's dirty cells; falls back to a full repaint when
    /// the frame asks for one or most of it changed anyway.
    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        let total = frame.width as usize * frame.height as usize;
        let full = frame.is_dirty_all() || (total > 0 && frame.dirty_indices().len() >= total / 2);

        let mut cur_fg: Option<Color> = None;
        let mut cur_bg: Option<Color> = None;

        if full {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..frame.height {
                self.stdout.queue(cursor::MoveTo(0, y))?;
                for x in 0..frame.width {
                    let idx = y as usize * frame.width as usize + x as usize;
                    let cell = frame.cell_at_index(idx);
                    self.apply_colors(cell.fg, cell.bg, &mut cur_fg, &mut cur_bg)?;
                    self.stdout.queue(Print(cell.ch))?;
                }
            }
        } else {
            frame.sort_dirty();
            let width = frame.width as usize;
            let mut cur_pos: Option<(u16, u16)> = None;
            for &idx in frame.dirty_indices() {
                let x = (idx % width) as u16;
                let y = (idx / width) as u16;
                let cell = frame.cell_at_index(idx);

                if cur_pos != Some((x, y)) {
                    self.stdout.queue(cursor::MoveTo(x, y))?;
                }
                self.apply_colors(cell.fg, cell.bg, &mut cur_fg, &mut cur_bg)?;
                self.stdout.queue(Print(cell.ch))?;

                let next_x = x.saturating_add(1);
                cur_pos = (next_x < frame.width).then_some((next_x, y));
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }

    fn apply_colors(
        &mut self,
        fg: Option<Color>,
        bg: Option<Color>,
        cur_fg: &mut Option<Color>,
        cur_bg: &mut Option<Color>,
    ) -> Result<()> {
        if fg != *cur_fg {
            self.stdout
                .queue(SetForegroundColor(fg.unwrap_or(Color::Reset)))?;
            *cur_fg = fg;
        }
        if bg != *cur_bg {
            self.stdout
                .queue(SetBackgroundColor(bg.unwrap_or(Color::Reset)))?;
            *cur_bg = bg;
        }
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore_terminal_best_effort();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(ResetColor);
    let _ = out.execute(event::DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
