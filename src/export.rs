// Copyright (c) 2026 rezky_nightky

use crate::bitmap::{GLYPH_OFF, GLYPH_ON};
use crate::grid::Grid;

fn row_has_on(row: &str) -> bool {
    row.contains(GLYPH_ON)
}

fn edge_col_has_on(rows: &[String], last: bool) -> bool {
    rows.iter().any(|r| {
        let c = if last { r.chars().last() } else { r.chars().next() };
        c == Some(GLYPH_ON)
    })
}

/// Serializes the board into face-format rows and trims every all-off
/// border away: top, bottom, left, right, each to a fixed point. A fully
/// inactive board exports as zero rows.
pub fn export_pattern(grid: &Grid) -> Vec<String> {
    let mut rows: Vec<String> = (0..grid.height())
        .map(|row| {
            (0..grid.width())
                .map(|col| {
                    if grid.is_active(row, col) {
                        GLYPH_ON
                    } else {
                        GLYPH_OFF
                    }
                })
                .collect()
        })
        .collect();

    while rows.first().is_some_and(|r| !row_has_on(r)) {
        rows.remove(0);
    }

    while rows.last().is_some_and(|r| !row_has_on(r)) {
        rows.pop();
    }

    while !rows.is_empty()
        && rows.iter().all(|r| !r.is_empty())
        && !edge_col_has_on(&rows, false)
    {
        for r in &mut rows {
            r.remove(0);
        }
    }

    while !rows.is_empty()
        && rows.iter().all(|r| !r.is_empty())
        && !edge_col_has_on(&rows, true)
    {
        for r in &mut rows {
            r.pop();
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use crate::place::place;

    #[test]
    fn single_cell_trims_to_one_glyph() {
        let mut g = Grid::new(10, 10);
        g.set_active(5, 5, true);
        assert_eq!(export_pattern(&g), vec!["x".to_string()]);
    }

    #[test]
    fn inactive_grid_exports_empty() {
        let g = Grid::new(12, 7);
        assert!(export_pattern(&g).is_empty());
    }

    #[test]
    fn interior_gaps_survive_the_trim() {
        let mut g = Grid::new(9, 5);
        g.set_active(1, 2, true);
        g.set_active(1, 6, true);
        g.set_active(3, 4, true);
        assert_eq!(
            export_pattern(&g),
            vec![
                "x   x".to_string(),
                "     ".to_string(),
                "  x  ".to_string(),
            ]
        );
    }

    #[test]
    fn export_is_idempotent_through_replacement() {
        let mut g = Grid::new(14, 9);
        g.set_active(2, 3, true);
        g.set_active(2, 9, true);
        g.set_active(6, 5, true);
        g.set_active(6, 6, true);

        let first = export_pattern(&g);
        let bitmap = Bitmap::from_rows(first.clone()).unwrap();

        let mut again = Grid::new(14, 9);
        place(&mut again, &bitmap).unwrap();
        assert_eq!(export_pattern(&again), first);
    }
}
