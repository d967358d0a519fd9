// Copyright (c) 2026 rezky_nightky

use crate::cell::Cell;

/// Off-screen cell buffer with dirty tracking. `set` records only real
/// changes, so a full repaint of an unchanged scene leaves the dirty
/// list empty and the terminal untouched.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
    dirty_all: bool,
    dirty_map: Vec<bool>,
    dirty: Vec<usize>,
}

impl Frame {
    pub fn new(width: u16, height: u16, bg: Option<crossterm::style::Color>) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::blank_with_bg(bg); len],
            dirty_all: true,
            dirty_map: vec![false; len],
            dirty: Vec::new(),
        }
    }

    pub fn is_dirty_all(&self) -> bool {
        self.dirty_all
    }

    pub fn has_changes(&self) -> bool {
        self.dirty_all || !self.dirty.is_empty()
    }

    pub fn dirty_indices(&self) -> &[usize] {
        &self.dirty
    }

    pub fn sort_dirty(&mut self) {
        if !self.dirty_all && self.dirty.len() > 1 {
            self.dirty.sort_unstable();
        }
    }

    pub fn clear_dirty(&mut self) {
        if self.dirty_all {
            self.dirty_all = false;
            self.dirty_map.fill(false);
            self.dirty.clear();
            return;
        }
        for &i in &self.dirty {
            if let Some(v) = self.dirty_map.get_mut(i) {
                *v = false;
            }
        }
        self.dirty.clear();
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn cell_at_index(&self, i: usize) -> Cell {
        self.cells[i]
    }

    #[cfg(test)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            if self.cells[i] == cell {
                return;
            }
            self.cells[i] = cell;
            if !self.dirty_all && !self.dirty_map[i] {
                self.dirty_map[i] = true;
                self.dirty.push(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_tracks_only_real_changes() {
        let mut f = Frame::new(3, 2, None);
        f.clear_dirty();

        f.set(1, 1, Cell::glyph('x', None, None));
        f.set(1, 1, Cell::glyph('x', None, None)); // same cell, no new entry
        f.set(0, 0, Cell::blank_with_bg(None)); // unchanged, not dirty
        assert_eq!(f.dirty_indices(), &[4]);
        assert_eq!(f.get(1, 1).unwrap().ch, 'x');

        f.clear_dirty();
        assert!(!f.has_changes());
    }

    #[test]
    fn out_of_range_set_is_ignored() {
        let mut f = Frame::new(2, 2, None);
        f.clear_dirty();
        f.set(5, 5, Cell::glyph('x', None, None));
        assert!(!f.has_changes());
    }
}
