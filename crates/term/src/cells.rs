//! The terminal side of the field: one [`FieldCell`] per glyph cell.
//!
//! A cell carries the glyph picked from the brightness ramp, the ink it is drawn in and
//! the backdrop sampled from the picture surface. [`CellGrid`] holds one screen of
//! cells in row-major order.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::types;

/// 24-bit terminal color, `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TermColor(pub [u8; 3]);

impl TermColor {
    pub const BLACK: Self = Self([0, 0, 0]);
    pub const WHITE: Self = Self([255, 255, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }
}

impl From<types::Rgb> for TermColor {
    fn from(c: types::Rgb) -> Self {
        Self(c.to_u8())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldCell {
    pub glyph: char,
    pub ink: TermColor,
    pub backdrop: TermColor,
}

impl FieldCell {
    /// No ink over a black backdrop.
    pub const EMPTY: Self = Self::new(' ', TermColor::WHITE, TermColor::BLACK);

    pub const fn new(glyph: char, ink: TermColor, backdrop: TermColor) -> Self {
        Self { glyph, ink, backdrop }
    }
}

impl Default for FieldCell {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// A screen of [`FieldCell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    columns: u16,
    rows: u16,
    cells: Vec<FieldCell>,
}

impl CellGrid {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            cells: vec![FieldCell::EMPTY; columns as usize * rows as usize],
        }
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn same_shape(&self, other: &CellGrid) -> bool {
        self.columns == other.columns && self.rows == other.rows
    }

    /// Match a new terminal size. Contents are unspecified afterwards; the allocation
    /// is kept when it is large enough.
    pub fn reshape(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
        self.cells.resize(columns as usize * rows as usize, FieldCell::EMPTY);
    }

    pub fn cells(&self) -> &[FieldCell] {
        &self.cells
    }

    pub fn cell(&self, column: u16, row: u16) -> Option<FieldCell> {
        self.row(row)?.get(column as usize).copied()
    }

    pub fn put(&mut self, column: u16, row: u16, cell: FieldCell) {
        if let Some(slot) = self.row_mut(row).and_then(|r| r.get_mut(column as usize)) {
            *slot = cell;
        }
    }

    pub fn row(&self, row: u16) -> Option<&[FieldCell]> {
        if row >= self.rows {
            return None;
        }
        let start = row as usize * self.columns as usize;
        Some(&self.cells[start..start + self.columns as usize])
    }

    pub fn row_mut(&mut self, row: u16) -> Option<&mut [FieldCell]> {
        if row >= self.rows {
            return None;
        }
        let start = row as usize * self.columns as usize;
        Some(&mut self.cells[start..start + self.columns as usize])
    }

    pub fn fill(&mut self, cell: FieldCell) {
        self.cells.fill(cell);
    }

    /// Write `text` on `row` starting at `column`. Characters past the right edge are
    /// dropped.
    pub fn write_text(&mut self, column: u16, row: u16, text: &str, ink: TermColor, backdrop: TermColor) {
        let Some(cells) = self.row_mut(row) else {
            return;
        };
        let start = (column as usize).min(cells.len());
        for (slot, glyph) in cells[start..].iter_mut().zip(text.chars()) {
            *slot = FieldCell::new(glyph, ink, backdrop);
        }
    }

    /// Content hash. Equal grids have equal digests.
    pub fn digest(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.columns.hash(&mut hasher);
        self.rows.hash(&mut hasher);
        self.cells.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_clipped_at_the_right_edge() {
        let mut grid = CellGrid::new(4, 1);
        grid.write_text(2, 0, "abc", TermColor::WHITE, TermColor::BLACK);
        assert_eq!(grid.cell(2, 0).map(|c| c.glyph), Some('a'));
        assert_eq!(grid.cell(3, 0).map(|c| c.glyph), Some('b'));
        assert_eq!(grid.cell(4, 0), None);

        // Starting past the edge writes nothing.
        grid.write_text(9, 0, "z", TermColor::WHITE, TermColor::BLACK);
        assert!(grid.cells().iter().all(|c| c.glyph != 'z'));
    }

    #[test]
    fn digest_follows_glyphs_and_colors() {
        let mut a = CellGrid::new(3, 2);
        let b = CellGrid::new(3, 2);
        assert_eq!(a.digest(), b.digest());

        a.put(1, 1, FieldCell::new('#', TermColor::WHITE, TermColor::BLACK));
        assert_ne!(a.digest(), b.digest());

        let mut c = CellGrid::new(3, 2);
        c.put(1, 1, FieldCell::new(' ', TermColor::WHITE, TermColor::rgb(0, 0, 255)));
        assert_ne!(c.digest(), b.digest());
    }

    #[test]
    fn shape_is_part_of_the_digest() {
        assert_ne!(CellGrid::new(6, 1).digest(), CellGrid::new(3, 2).digest());
    }

    #[test]
    fn reshape_keeps_rows_addressable() {
        let mut grid = CellGrid::new(2, 2);
        grid.reshape(5, 3);
        assert_eq!(grid.cells().len(), 15);
        assert_eq!(grid.row(2).map(<[FieldCell]>::len), Some(5));
        assert!(grid.row(3).is_none());
    }

    #[test]
    fn field_colors_convert_to_bytes() {
        assert_eq!(TermColor::from(types::Rgb::WHITE), TermColor::WHITE);
    }
}
