//! Catalog module - the fixed piece templates
//!
//! Each playable color maps to exactly one shape. There are no alternate spawn
//! orientations; rotation happens at runtime via [`Shape::rotate_clockwise`].

use std::fmt;

use crate::grid::Grid;
use crate::rng::ColorPicker;
use crate::shape::Shape;
use crate::types::BlockColor;

/// Template masks (1 = filled) for one piece kind
type Mask = &'static [&'static [u8]];

/// L-shaped
const ORANGE: Mask = &[&[0, 0, 1], &[1, 1, 1]];
/// J-shaped
const BLUE: Mask = &[&[1, 0, 0], &[1, 1, 1]];
/// Z-shaped
const RED: Mask = &[&[1, 1, 0], &[0, 1, 1]];
/// S-shaped
const GREEN: Mask = &[&[0, 1, 1], &[1, 1, 0]];
/// Square
const YELLOW: Mask = &[&[1, 1], &[1, 1]];
/// T-shaped
const PURPLE: Mask = &[&[0, 1, 0], &[1, 1, 1]];
/// Vertical bar
const PINK: Mask = &[&[1], &[1], &[1], &[1]];

/// Colors that have a template, in catalog order
pub const SPAWN_COLORS: [BlockColor; 7] = [
    BlockColor::Orange,
    BlockColor::Blue,
    BlockColor::Red,
    BlockColor::Green,
    BlockColor::Yellow,
    BlockColor::Purple,
    BlockColor::Pink,
];

fn mask(color: BlockColor) -> Option<Mask> {
    match color {
        BlockColor::Empty => None,
        BlockColor::Orange => Some(ORANGE),
        BlockColor::Blue => Some(BLUE),
        BlockColor::Red => Some(RED),
        BlockColor::Green => Some(GREEN),
        BlockColor::Yellow => Some(YELLOW),
        BlockColor::Purple => Some(PURPLE),
        BlockColor::Pink => Some(PINK),
    }
}

/// Get the template for a color, already painted in that color
///
/// Returns `None` for `Empty`, which has no piece.
pub fn template(color: BlockColor) -> Option<Shape> {
    // The masks are static and at most 4x4; validate_catalog() guards this.
    mask(color).and_then(|m| Shape::from_mask(m, color).ok())
}

/// Draw a spawnable color uniformly; never `Empty`
pub fn random_playable(picker: &mut dyn ColorPicker) -> BlockColor {
    let color = picker.pick(&SPAWN_COLORS);
    if color.is_playable() {
        color
    } else {
        SPAWN_COLORS[0]
    }
}

/// Template for `color` centered in an empty preview grid
pub fn preview_grid(color: BlockColor) -> Grid {
    let preview = Grid::preview();
    match template(color) {
        Some(shape) => preview.merge_and_center_shape(&shape, BlockColor::Empty, None, None),
        None => preview,
    }
}

/// Broken catalog entry, detected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// Color's mask could not be turned into a shape
    Malformed(BlockColor),
    /// Template has no filled cells
    EmptyTemplate(BlockColor),
    /// Template is larger than a grid it must be shown in
    DoesNotFit {
        color: BlockColor,
        grid_rows: usize,
        grid_cols: usize,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Malformed(color) => {
                write!(f, "template for {} is malformed", color.as_str())
            }
            CatalogError::EmptyTemplate(color) => {
                write!(f, "template for {} has no filled cells", color.as_str())
            }
            CatalogError::DoesNotFit {
                color,
                grid_rows,
                grid_cols,
            } => write!(
                f,
                "template for {} does not fit a {}x{} grid",
                color.as_str(),
                grid_rows,
                grid_cols
            ),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Check every template against the main and preview grids
pub fn validate_catalog() -> Result<(), CatalogError> {
    let grids = [Grid::main(), Grid::preview()];

    for color in SPAWN_COLORS {
        let m = mask(color).ok_or(CatalogError::Malformed(color))?;
        let shape = Shape::from_mask(m, color).map_err(|_| CatalogError::Malformed(color))?;

        if shape.filled_count() == 0 {
            return Err(CatalogError::EmptyTemplate(color));
        }

        for grid in &grids {
            if shape.rows() > grid.rows() || shape.cols() > grid.cols() {
                return Err(CatalogError::DoesNotFit {
                    color,
                    grid_rows: grid.rows(),
                    grid_cols: grid.cols(),
                });
            }
        }
    }

    Ok(())
}
