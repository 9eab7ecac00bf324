//! Shape module - small rectangular color templates
//!
//! A shape is an R x C block of colors where `Empty` cells are transparent.
//! Shapes are bounded to 4x4 and stored inline (no heap allocation), so
//! rotating or colorizing a piece never allocates.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::BlockColor;

/// Largest side length a shape may have
pub const MAX_SHAPE_SIDE: usize = 4;

/// Maximum number of cells in a shape
const MAX_SHAPE_CELLS: usize = MAX_SHAPE_SIDE * MAX_SHAPE_SIDE;

/// Malformed shape template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// Row `row` has `found` cells where `expected` were required
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Shape exceeds `MAX_SHAPE_SIDE` in some dimension
    TooLarge { rows: usize, cols: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "shape row {} has {} cells, expected {}",
                row, found, expected
            ),
            ShapeError::TooLarge { rows, cols } => write!(
                f,
                "shape is {}x{}, max side is {}",
                rows, cols, MAX_SHAPE_SIDE
            ),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Immutable rectangular template of block colors
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    /// Row-major cells (r * cols + c)
    cells: ArrayVec<BlockColor, MAX_SHAPE_CELLS>,
}

impl Shape {
    /// Build a shape from rows of colors
    ///
    /// Every row must have the same length. A shape with no rows, or rows with
    /// no cells, is allowed and is treated as degenerate (never collides,
    /// never paints anything).
    pub fn from_rows<R: AsRef<[BlockColor]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let row_count = rows.len();
        let col_count = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);

        if row_count > MAX_SHAPE_SIDE || col_count > MAX_SHAPE_SIDE {
            return Err(ShapeError::TooLarge {
                rows: row_count,
                cols: col_count,
            });
        }

        let mut cells = ArrayVec::new();
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != col_count {
                return Err(ShapeError::Ragged {
                    row: i,
                    expected: col_count,
                    found: row.len(),
                });
            }
            cells.extend(row.iter().copied());
        }

        Ok(Self {
            rows: row_count,
            cols: col_count,
            cells,
        })
    }

    /// Build a shape from a 0/1 mask, painting set cells with `color`
    pub fn from_mask<R: AsRef<[u8]>>(mask: &[R], color: BlockColor) -> Result<Self, ShapeError> {
        let rows: ArrayVec<ArrayVec<BlockColor, MAX_SHAPE_SIDE>, MAX_SHAPE_SIDE> = {
            if mask.len() > MAX_SHAPE_SIDE || mask.iter().any(|r| r.as_ref().len() > MAX_SHAPE_SIDE)
            {
                return Err(ShapeError::TooLarge {
                    rows: mask.len(),
                    cols: mask.iter().map(|r| r.as_ref().len()).max().unwrap_or(0),
                });
            }
            mask.iter()
                .map(|row| {
                    row.as_ref()
                        .iter()
                        .map(|&bit| if bit != 0 { color } else { BlockColor::Empty })
                        .collect()
                })
                .collect()
        };
        Self::from_rows(&rows)
    }

    /// The 0x0 shape
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            cells: ArrayVec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when the shape has no cells at all (zero rows or zero columns)
    pub fn is_degenerate(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Get cell at (row, col), `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<BlockColor> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    /// Iterate over cells that differ from `empty`, as (row, col, color)
    pub fn cells_except(
        &self,
        empty: BlockColor,
    ) -> impl Iterator<Item = (usize, usize, BlockColor)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, color)| **color != empty)
            .map(move |(i, &color)| (i / cols, i % cols, color))
    }

    /// Iterate over non-empty cells as (row, col, color)
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, BlockColor)> + '_ {
        self.cells_except(BlockColor::Empty)
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.filled_cells().count()
    }

    /// Rotate 90° clockwise: an R x C shape becomes C x R, (r, c) -> (c, R-1-r)
    pub fn rotate_clockwise(&self) -> Self {
        if self.rows == 0 {
            return Self::empty();
        }
        if self.cols == 0 {
            return self.clone();
        }

        let new_rows = self.cols;
        let new_cols = self.rows;
        let mut cells: ArrayVec<BlockColor, MAX_SHAPE_CELLS> = ArrayVec::new();
        for nr in 0..new_rows {
            for nc in 0..new_cols {
                // (r, c) lands on (c, R-1-r), so (nr, nc) came from (R-1-nc, nr)
                let r = self.rows - 1 - nc;
                let c = nr;
                cells.push(self.cells[r * self.cols + c]);
            }
        }

        Self {
            rows: new_rows,
            cols: new_cols,
            cells,
        }
    }

    /// Replace every non-empty cell with `color`
    pub fn colorize(&self, color: BlockColor) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|&cell| if cell.is_empty() { cell } else { color })
            .collect();
        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Same filled/empty layout, ignoring colors
    pub fn same_mask(&self, other: &Shape) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .cells
                .iter()
                .zip(other.cells.iter())
                .all(|(a, b)| a.is_empty() == b.is_empty())
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.cols {
                write!(f, "{}", self.cells[r * self.cols + c].code())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: BlockColor = BlockColor::Empty;
    const O: BlockColor = BlockColor::Orange;

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Shape::from_rows(&[vec![O, O], vec![O]]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_oversized() {
        let err = Shape::from_rows(&[vec![O; 5]]).unwrap_err();
        assert_eq!(err, ShapeError::TooLarge { rows: 1, cols: 5 });
    }

    #[test]
    fn test_rotate_orange() {
        let shape = Shape::from_rows(&[[E, E, O], [O, O, O]]).unwrap();
        let rotated = shape.rotate_clockwise();

        assert_eq!(rotated.rows(), 3);
        assert_eq!(rotated.cols(), 2);
        assert_eq!(rotated.to_string(), "O.\nO.\nOO\n");
    }

    #[test]
    fn test_rotate_degenerate() {
        assert_eq!(Shape::empty().rotate_clockwise(), Shape::empty());

        let no_cols = Shape::from_rows(&[Vec::<BlockColor>::new(), Vec::new()]).unwrap();
        let rotated = no_cols.rotate_clockwise();
        assert_eq!(rotated.rows(), 2);
        assert_eq!(rotated.cols(), 0);
        assert!(rotated.is_degenerate());
    }

    #[test]
    fn test_colorize_keeps_mask() {
        let shape = Shape::from_mask(&[[0u8, 1], [1, 1]], BlockColor::Red).unwrap();
        let blue = shape.colorize(BlockColor::Blue);

        assert!(shape.same_mask(&blue));
        assert_eq!(blue.get(0, 0), Some(E));
        assert_eq!(blue.get(0, 1), Some(BlockColor::Blue));
        assert_eq!(blue.filled_count(), 3);
    }

    #[test]
    fn test_filled_cells_coordinates() {
        let shape = Shape::from_rows(&[[E, E, O], [O, O, O]]).unwrap();
        let cells: Vec<_> = shape.filled_cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(cells, vec![(0, 2), (1, 0), (1, 1), (1, 2)]);
    }
}
