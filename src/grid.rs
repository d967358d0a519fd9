// Copyright (c) 2026 rezky_nightky

/// Board model: a fixed-size field of on/off cells addressed by
/// `(row, col)` with row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    pub fn is_active(&self, row: usize, col: usize) -> bool {
        self.index(row, col)
            .map(|i| self.cells[i])
            .unwrap_or(false)
    }

    pub fn set_active(&mut self, row: usize, col: usize, active: bool) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = active;
        }
    }

    pub fn toggle(&mut self, row: usize, col: usize) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = !self.cells[i];
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    #[allow(dead_code)]
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_clear_resets() {
        let mut g = Grid::new(4, 3);
        assert!(!g.is_active(2, 3));
        g.toggle(2, 3);
        assert!(g.is_active(2, 3));
        g.toggle(2, 3);
        assert!(!g.is_active(2, 3));

        g.set_active(0, 0, true);
        g.set_active(2, 3, true);
        assert_eq!(g.active_count(), 2);
        g.clear();
        assert_eq!(g.active_count(), 0);
    }

    #[test]
    fn out_of_bounds_access_is_inert() {
        let mut g = Grid::new(2, 2);
        g.set_active(5, 0, true);
        g.toggle(0, 9);
        assert_eq!(g.active_count(), 0);
        assert!(!g.is_active(5, 0));
    }
}
