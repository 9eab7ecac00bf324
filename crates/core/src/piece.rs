//! Piece module - the currently falling piece

use crate::catalog::template;
use crate::grid::Grid;
use crate::shape::Shape;
use crate::types::BlockColor;

/// Active falling piece
///
/// `row`/`col` is the top-left corner of `shape` on the main grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: Shape,
    pub color: BlockColor,
    pub row: i32,
    pub col: i32,
}

impl Piece {
    /// Create a piece of `color` at spawn position on `grid`
    ///
    /// Spawn is row 0, horizontally centered: `(grid_cols - shape_cols) / 2`.
    /// Returns `None` for `Empty`.
    pub fn spawn(color: BlockColor, grid: &Grid) -> Option<Self> {
        let shape = template(color)?.colorize(color);
        let col = (grid.cols() as i32 - shape.cols() as i32) / 2;
        Some(Self {
            shape,
            color,
            row: 0,
            col,
        })
    }

    /// Same piece shifted by (d_row, d_col)
    pub fn moved(&self, d_col: i32, d_row: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..self.clone()
        }
    }

    /// Same piece at another row
    pub fn at_row(&self, row: i32) -> Self {
        Self {
            row,
            ..self.clone()
        }
    }

    /// Same position with the shape rotated clockwise
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotate_clockwise(),
            ..self.clone()
        }
    }

    /// Check if the piece fits on `grid` at its position
    pub fn collides(&self, grid: &Grid) -> bool {
        grid.has_collision(&self.shape, self.row, self.col)
    }

    /// `grid` with this piece painted in
    pub fn merged_into(&self, grid: &Grid) -> Grid {
        grid.merge_shape(&self.shape, self.row, self.col)
    }

    /// `grid` with this piece's cells reset to empty
    pub fn cleared_from(&self, grid: &Grid) -> Grid {
        grid.clear_shape(&self.shape, self.row, self.col)
    }
}
