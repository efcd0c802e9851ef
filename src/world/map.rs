//! Grid map
//!
//! Fixed-size 2D array of cell kinds, stored row-major.

use super::tile::CellKind;
use crate::data::GridConfig;
use crate::entities::Position;

/// The dungeon grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    rows: i32,
    cols: i32,
    cells: Vec<CellKind>,
}

impl GridMap {
    /// Create a new map filled with walls
    pub fn new(rows: i32, cols: i32) -> Self {
        assert!(rows > 0 && cols > 0, "grid must not be empty ({}x{})", rows, cols);
        Self {
            rows,
            cols,
            cells: vec![CellKind::Wall; (rows * cols) as usize],
        }
    }

    pub fn from_config(grid: &GridConfig) -> Self {
        Self::new(grid.rows, grid.cols)
    }

    /// Build a map from rows of glyphs (`#`, `.`, `!`, `/`, `E`, `@`).
    /// Returns `None` for an empty grid, ragged rows or unknown glyphs.
    pub fn from_glyphs(rows: &[&str]) -> Option<Self> {
        let cols = rows.first()?.chars().count();
        if cols == 0 {
            return None;
        }
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.chars().count() != cols {
                return None;
            }
            for glyph in row.chars() {
                cells.push(CellKind::from_glyph(glyph)?);
            }
        }
        Some(Self {
            rows: rows.len() as i32,
            cols: cols as i32,
            cells,
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Convert a position to an index into `cells`
    #[inline]
    fn idx(&self, pos: Position) -> usize {
        (pos.y * self.cols + pos.x) as usize
    }

    /// Check if a position is within bounds
    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.cols && pos.y >= 0 && pos.y < self.rows
    }

    /// Cell at `pos`, or `None` outside the grid
    pub fn get(&self, pos: Position) -> Option<CellKind> {
        if self.in_bounds(pos) {
            Some(self.cells[self.idx(pos)])
        } else {
            None
        }
    }

    /// Cell at `pos`. Panics outside the grid.
    pub fn cell(&self, pos: Position) -> CellKind {
        self.assert_in_bounds(pos);
        self.cells[self.idx(pos)]
    }

    /// Overwrite the cell at `pos`. Panics outside the grid.
    pub fn set(&mut self, pos: Position, kind: CellKind) {
        self.assert_in_bounds(pos);
        let idx = self.idx(pos);
        self.cells[idx] = kind;
    }

    /// True if `pos` is inside the grid and holds `kind`
    pub fn is(&self, pos: Position, kind: CellKind) -> bool {
        self.get(pos) == Some(kind)
    }

    /// Number of cells of `kind`
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| **c == kind).count()
    }

    /// Positions holding `kind`, row by row
    pub fn positions_of(&self, kind: CellKind) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == kind)
            .map(|(idx, _)| {
                let idx = idx as i32;
                Position::new(idx % self.cols, idx / self.cols)
            })
            .collect()
    }

    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    fn assert_in_bounds(&self, pos: Position) {
        assert!(
            self.in_bounds(pos),
            "position ({}, {}) outside {}x{} grid",
            pos.x,
            pos.y,
            self.cols,
            self.rows
        );
    }
}
