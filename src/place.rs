// Copyright (c) 2026 rezky_nightky

use std::fmt;

use crate::bitmap::{Bitmap, GLYPH_OFF, GLYPH_ON};
use crate::grid::Grid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceError {
    TooTall { bitmap: usize, grid: usize },
    TooWide { bitmap: usize, grid: usize },
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceError::TooTall { bitmap, grid } => {
                write!(f, "face is {} rows tall, board has {}", bitmap, grid)
            }
            PlaceError::TooWide { bitmap, grid } => {
                write!(f, "face is {} cells wide, board has {}", bitmap, grid)
            }
        }
    }
}

impl std::error::Error for PlaceError {}

/// A glyph outside {' ', 'x'} found while placing. Reported but not fatal:
/// the rest of the bitmap is still placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidGlyph {
    pub row: usize,
    pub col: usize,
    pub glyph: char,
}

impl fmt::Display for InvalidGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid glyph {:?} at {},{}", self.glyph, self.row, self.col)
    }
}

/// Round-half-up midpoint of the slack between board and bitmap.
fn center_offset(grid_dim: usize, bitmap_dim: usize) -> usize {
    (grid_dim - bitmap_dim + 1) / 2
}

/// Clears the board and writes `bitmap` centered on it.
///
/// Fails without touching the board when the bitmap does not fit. Stray
/// glyphs leave their cell off and are returned as warnings.
pub fn place(grid: &mut Grid, bitmap: &Bitmap) -> Result<Vec<InvalidGlyph>, PlaceError> {
    if bitmap.height() > grid.height() {
        return Err(PlaceError::TooTall {
            bitmap: bitmap.height(),
            grid: grid.height(),
        });
    }
    if bitmap.width() > grid.width() {
        return Err(PlaceError::TooWide {
            bitmap: bitmap.width(),
            grid: grid.width(),
        });
    }

    let off_y = center_offset(grid.height(), bitmap.height());
    let off_x = center_offset(grid.width(), bitmap.width());

    grid.clear();

    let mut warnings = Vec::new();
    for (i, row) in bitmap.rows().iter().enumerate() {
        for (j, glyph) in row.chars().enumerate() {
            match glyph {
                GLYPH_OFF => {}
                GLYPH_ON => grid.set_active(off_y + i, off_x + j, true),
                other => warnings.push(InvalidGlyph {
                    row: i,
                    col: j,
                    glyph: other,
                }),
            }
        }
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap(rows: &[&str]) -> Bitmap {
        Bitmap::parse(rows).unwrap()
    }

    #[test]
    fn placement_matches_footprint_exactly() {
        let mut g = Grid::new(8, 6);
        g.set_active(0, 0, true); // stale cell, must be cleared
        let b = bitmap(&["x x", " x "]);

        let warnings = place(&mut g, &b).unwrap();
        assert!(warnings.is_empty());

        // slack: rows 6-2=4 -> off_y 2, cols 8-3=5 -> off_x 3 (half-up)
        let expected = [(2, 3), (2, 5), (3, 4)];
        for row in 0..6 {
            for col in 0..8 {
                let want = expected.contains(&(row, col));
                assert_eq!(g.is_active(row, col), want, "cell {},{}", row, col);
            }
        }
    }

    #[test]
    fn centering_rounds_half_up() {
        // 26x35 board, 10x10 face: offsets round(16/2)=8 and round(25/2)=13.
        assert_eq!(center_offset(26, 10), 8);
        assert_eq!(center_offset(35, 10), 13);
        assert_eq!(center_offset(5, 5), 0);
    }

    #[test]
    fn oversized_bitmap_leaves_grid_untouched() {
        let mut g = Grid::new(3, 3);
        g.set_active(1, 1, true);

        let tall = bitmap(&["x", "x", "x", "x"]);
        assert_eq!(
            place(&mut g, &tall),
            Err(PlaceError::TooTall { bitmap: 4, grid: 3 })
        );

        let wide = bitmap(&["xxxx"]);
        assert_eq!(
            place(&mut g, &wide),
            Err(PlaceError::TooWide { bitmap: 4, grid: 3 })
        );

        assert!(g.is_active(1, 1));
        assert_eq!(g.active_count(), 1);
    }

    #[test]
    fn stray_glyphs_are_reported_but_placement_continues() {
        let mut g = Grid::new(3, 3);
        let b = bitmap(&["x?x"]);

        let warnings = place(&mut g, &b).unwrap();
        assert_eq!(
            warnings,
            vec![InvalidGlyph {
                row: 0,
                col: 1,
                glyph: '?'
            }]
        );
        // both 'x' cells landed despite the bad glyph between them
        assert_eq!(g.active_count(), 2);
        assert!(g.is_active(1, 0));
        assert!(g.is_active(1, 2));
    }

    #[test]
    fn empty_bitmap_just_clears() {
        let mut g = Grid::new(4, 4);
        g.set_active(2, 2, true);
        let warnings = place(&mut g, &bitmap(&[])).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(g.active_count(), 0);
    }
}
