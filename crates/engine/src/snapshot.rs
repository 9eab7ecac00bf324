//! Serializable view of the game state
//!
//! Grids and shapes are written as one string per row using the color codes
//! (`.` empty, `R B G P Y O K`), which keeps the JSON readable.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Grid, Piece, Shape};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub color: String,
    pub row: i32,
    pub col: i32,
    pub shape: Vec<String>,
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            color: piece.color.as_str().to_string(),
            row: piece.row,
            col: piece.col,
            shape: shape_rows(&piece.shape),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: Vec<String>,
    pub current_piece: Option<PieceSnapshot>,
    pub next_piece_color: String,
    pub preview: Vec<String>,
    pub piece_id: u32,
    pub score: u32,
    pub lines_cleared: u32,
    pub level: u32,
    pub is_game_over: bool,
    pub tick_interval_ms: u64,
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            grid: grid_rows(state.grid()),
            current_piece: state.current_piece().map(PieceSnapshot::from),
            next_piece_color: state.next_piece_color().as_str().to_string(),
            preview: grid_rows(&state.preview_grid()),
            piece_id: state.piece_id(),
            score: state.score(),
            lines_cleared: state.lines_cleared(),
            level: state.level(),
            is_game_over: state.is_game_over(),
            tick_interval_ms: state.tick_interval_ms(),
        }
    }
}

/// One color-code string per grid row
pub fn grid_rows(grid: &Grid) -> Vec<String> {
    grid.iter_rows()
        .map(|row| row.iter().map(|cell| cell.code()).collect())
        .collect()
}

fn shape_rows(shape: &Shape) -> Vec<String> {
    shape.to_string().lines().map(str::to_string).collect()
}
