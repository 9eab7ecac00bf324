//! Grid module - fixed-size 2D color grid
//!
//! The grid maps (row, col) to a [`BlockColor`]; row 0 is the top.
//! Storage is a flat row-major vector for cache locality.
//!
//! Every operation that changes cells returns a new grid and leaves `self`
//! untouched. The engine relies on this to build "grid without the falling
//! piece" as a throwaway intermediate without corrupting the committed grid.

use std::fmt;

use crate::shape::Shape;
use crate::types::{BlockColor, GRID_COLUMNS, GRID_ROWS, PREVIEW_COLUMNS, PREVIEW_ROWS};

/// Invalid grid construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Rows or columns is zero
    ZeroDimension { rows: usize, cols: usize },
    /// Row `row` has `found` cells where `expected` were required
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Character at (`row`, `col`) is not a color code
    UnknownCode { row: usize, col: usize, ch: char },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::ZeroDimension { rows, cols } => {
                write!(f, "grid must be non-empty, got {}x{}", rows, cols)
            }
            GridError::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid row {} has {} cells, expected {}",
                row, found, expected
            ),
            GridError::UnknownCode { row, col, ch } => {
                write!(f, "unknown color code {:?} at ({}, {})", ch, row, col)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Result of a merge that also reports cells lost off the edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub grid: Grid,
    /// Shape cells that fell outside the grid and were dropped
    pub dropped: usize,
}

/// Rectangular color grid with fixed dimensions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<BlockColor>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::ZeroDimension { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![BlockColor::Empty; rows * cols],
        })
    }

    /// Empty 15x10 play grid
    pub fn main() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLUMNS,
            cells: vec![BlockColor::Empty; GRID_ROWS * GRID_COLUMNS],
        }
    }

    /// Empty 4x3 next-piece grid
    pub fn preview() -> Self {
        Self {
            rows: PREVIEW_ROWS,
            cols: PREVIEW_COLUMNS,
            cells: vec![BlockColor::Empty; PREVIEW_ROWS * PREVIEW_COLUMNS],
        }
    }

    /// Build a grid from rows of colors
    pub fn from_rows<R: AsRef<[BlockColor]>>(rows: &[R]) -> Result<Self, GridError> {
        let row_count = rows.len();
        let col_count = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if row_count == 0 || col_count == 0 {
            return Err(GridError::ZeroDimension {
                rows: row_count,
                cols: col_count,
            });
        }

        let mut cells = Vec::with_capacity(row_count * col_count);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != col_count {
                return Err(GridError::Ragged {
                    row: i,
                    expected: col_count,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            rows: row_count,
            cols: col_count,
            cells,
        })
    }

    /// Build a grid from text rows of color codes (`.` empty, `R`, `B`, ...)
    pub fn from_text(rows: &[&str]) -> Result<Self, GridError> {
        let mut parsed: Vec<Vec<BlockColor>> = Vec::with_capacity(rows.len());
        for (row, line) in rows.iter().enumerate() {
            let cells = line
                .chars()
                .enumerate()
                .map(|(col, ch)| {
                    BlockColor::from_code(ch).ok_or(GridError::UnknownCode { row, col, ch })
                })
                .collect::<Result<Vec<_>, _>>()?;
            parsed.push(cells);
        }
        Self::from_rows(&parsed)
    }

    /// Calculate flat index from signed (row, col), `None` if out of bounds
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get cell at (row, col), `None` if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<BlockColor> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Slice of one row
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[BlockColor] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Iterate over rows top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[BlockColor]> + '_ {
        self.cells.chunks(self.cols)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.rows {
            return false;
        }
        self.row(row).iter().all(|cell| cell.is_playable())
    }

    /// True if every cell is empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Iterate over non-empty cells as (row, col, color)
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, BlockColor)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_playable())
            .map(move |(i, &cell)| (i / cols, i % cols, cell))
    }

    /// Return a copy with one cell replaced (out-of-bounds writes are ignored)
    pub fn with_cell(&self, row: i32, col: i32, color: BlockColor) -> Self {
        let mut next = self.deep_copy();
        if let Some(idx) = next.index(row, col) {
            next.cells[idx] = color;
        }
        next
    }

    /// Return a copy with a whole row filled with `color`
    ///
    /// Panics if `row` is out of bounds.
    pub fn with_row(&self, row: usize, color: BlockColor) -> Self {
        let mut next = self.deep_copy();
        let start = row * next.cols;
        let end = start + next.cols;
        next.cells[start..end].fill(color);
        next
    }

    /// Independent clone of this grid
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Paint every non-empty shape cell onto a copy of the grid
    ///
    /// `top_row`/`left_col` is where the shape's top-left corner lands. Shape
    /// cells outside the grid are dropped silently; empty shape cells never
    /// overwrite (stencil).
    pub fn merge_shape(&self, shape: &Shape, top_row: i32, left_col: i32) -> Self {
        self.merge_shape_counted(shape, top_row, left_col).grid
    }

    /// [`merge_shape`](Self::merge_shape), also counting dropped cells
    pub fn merge_shape_counted(&self, shape: &Shape, top_row: i32, left_col: i32) -> MergeOutcome {
        self.stamp(shape, BlockColor::Empty, top_row, left_col)
    }

    /// Merge with a custom transparent color, centering when no position is given
    ///
    /// Missing coordinates are `floor((grid_dim - shape_dim) / 2)` on that axis,
    /// which can be negative when the shape is larger than the grid.
    pub fn merge_and_center_shape(
        &self,
        shape: &Shape,
        empty_color: BlockColor,
        start_row: Option<i32>,
        start_col: Option<i32>,
    ) -> Self {
        if shape.is_degenerate() {
            return self.deep_copy();
        }

        let start_row =
            start_row.unwrap_or_else(|| centered_offset(self.rows, shape.rows()));
        let start_col =
            start_col.unwrap_or_else(|| centered_offset(self.cols, shape.cols()));

        self.stamp(shape, empty_color, start_row, start_col).grid
    }

    fn stamp(&self, shape: &Shape, empty_color: BlockColor, top_row: i32, left_col: i32) -> MergeOutcome {
        let mut grid = self.deep_copy();
        let mut dropped = 0;

        for (r, c, color) in shape.cells_except(empty_color) {
            match grid.index(top_row + r as i32, left_col + c as i32) {
                Some(idx) => grid.cells[idx] = color,
                None => dropped += 1,
            }
        }

        MergeOutcome { grid, dropped }
    }

    /// Reset every cell covered by a non-empty shape cell to `Empty`
    ///
    /// The grid's current color at those cells does not matter.
    pub fn clear_shape(&self, shape: &Shape, top_row: i32, left_col: i32) -> Self {
        let mut grid = self.deep_copy();
        for (r, c, _) in shape.filled_cells() {
            if let Some(idx) = grid.index(top_row + r as i32, left_col + c as i32) {
                grid.cells[idx] = BlockColor::Empty;
            }
        }
        grid
    }

    /// Check whether the shape would overlap a wall, the floor, the ceiling or a block
    ///
    /// Any part of the shape above row 0 is a collision: pieces must be fully
    /// inside the grid. An empty or degenerate shape never collides.
    pub fn has_collision(&self, shape: &Shape, top_row: i32, left_col: i32) -> bool {
        shape.filled_cells().any(|(r, c, _)| {
            let row = top_row + r as i32;
            let col = left_col + c as i32;

            if col < 0 || col >= self.cols as i32 || row >= self.rows as i32 || row < 0 {
                return true;
            }

            self.cells[row as usize * self.cols + col as usize].is_playable()
        })
    }

    /// Remove completed rows, shifting everything above down
    ///
    /// Scans bottom to top. After a clear the same row index is examined again,
    /// since the row above has moved into it. Returns the new grid and the
    /// number of rows cleared.
    pub fn clear_completed_lines(&self) -> (Self, u32) {
        let mut grid = self.deep_copy();
        let width = grid.cols;
        let mut cleared = 0u32;
        let mut row = grid.rows as isize - 1;

        while row >= 0 {
            let r = row as usize;
            if grid.is_row_full(r) {
                cleared += 1;

                // copy_within handles the overlapping ranges
                for dst in (1..=r).rev() {
                    let src_start = (dst - 1) * width;
                    grid.cells
                        .copy_within(src_start..src_start + width, dst * width);
                }
                grid.cells[..width].fill(BlockColor::Empty);
            } else {
                row -= 1;
            }
        }

        (grid, cleared)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::main()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for cell in row {
                write!(f, "{}", cell.code())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// `floor((grid_dim - shape_dim) / 2)` in signed arithmetic
fn centered_offset(grid_dim: usize, shape_dim: usize) -> i32 {
    (grid_dim as i32 - shape_dim as i32).div_euclid(2)
}
