// Copyright (c) 2026 rezky_nightky

use std::collections::BTreeMap;
use std::fmt;

use crate::faces::BUILTIN_FACES;

pub const GLYPH_ON: char = 'x';
pub const GLYPH_OFF: char = ' ';

/// A rectangular on/off pattern: rows of equal length over {' ', 'x'}.
/// Zero rows is a valid (empty) bitmap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    rows: Vec<String>,
    width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitmapError {
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
}

impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitmapError::RaggedRow { row, len, expected } => write!(
                f,
                "row {} has {} glyphs, expected {}",
                row, len, expected
            ),
        }
    }
}

impl std::error::Error for BitmapError {}

impl Bitmap {
    /// Builds a bitmap, rejecting ragged input. Glyphs are not validated
    /// here; the placement engine reports stray glyphs cell by cell.
    pub fn from_rows(rows: Vec<String>) -> Result<Self, BitmapError> {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        for (i, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(BitmapError::RaggedRow {
                    row: i,
                    len,
                    expected: width,
                });
            }
        }
        Ok(Self { rows, width })
    }

    pub fn parse(rows: &[&str]) -> Result<Self, BitmapError> {
        Self::from_rows(rows.iter().map(|r| r.to_string()).collect())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

/// Read-only name -> bitmap mapping. BTreeMap keeps the names sorted,
/// which fixes the cycling order of `show_next_face`.
#[derive(Clone, Debug, Default)]
pub struct FaceLibrary {
    faces: BTreeMap<String, Bitmap>,
}

impl FaceLibrary {
    pub fn builtin() -> Self {
        let mut lib = Self::default();
        for (name, rows) in BUILTIN_FACES {
            let bitmap = Bitmap::parse(rows).expect("builtin face is well formed");
            lib.insert(name, bitmap);
        }
        lib
    }

    pub fn insert(&mut self, name: &str, bitmap: Bitmap) {
        self.faces.insert(name.to_string(), bitmap);
    }

    pub fn lookup(&self, name: &str) -> Option<&Bitmap> {
        self.faces.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.faces.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn name_at(&self, idx: usize) -> Option<&str> {
        self.faces.keys().nth(idx).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Bitmap::parse(&["xx ", "x"]).unwrap_err();
        assert_eq!(
            err,
            BitmapError::RaggedRow {
                row: 1,
                len: 1,
                expected: 3
            }
        );
    }

    #[test]
    fn empty_bitmap_is_valid() {
        let b = Bitmap::parse(&[]).unwrap();
        assert!(b.is_empty());
        assert_eq!(b.width(), 0);
        assert_eq!(b.height(), 0);
    }

    #[test]
    fn builtin_faces_parse_and_fit_default_board() {
        let lib = FaceLibrary::builtin();
        assert!(lib.len() >= 4);
        for name in lib.names() {
            let face = lib.lookup(name).unwrap();
            assert!(face.height() <= 26, "{} too tall", name);
            assert!(face.width() <= 35, "{} too wide", name);
            for row in face.rows() {
                assert!(
                    row.chars().all(|c| c == GLYPH_ON || c == GLYPH_OFF),
                    "{} has stray glyphs",
                    name
                );
            }
        }
    }

    #[test]
    fn names_come_back_sorted() {
        let mut lib = FaceLibrary::default();
        lib.insert("wink", Bitmap::parse(&["x"]).unwrap());
        lib.insert("grin", Bitmap::parse(&["x"]).unwrap());
        lib.insert("neutral", Bitmap::parse(&["x"]).unwrap());
        let names: Vec<&str> = lib.names().collect();
        assert_eq!(names, vec!["grin", "neutral", "wink"]);
        assert_eq!(lib.name_at(1), Some("neutral"));
    }
}
