//! Game state module - the complete state of one game session
//!
//! This module ties together the grid, the falling piece, the catalog and the
//! color picker. It implements the transition rules (spawn, move, rotate, hard
//! drop, lock) but owns no timer: something else calls [`GameState::tick`].
//!
//! The falling piece is painted into `grid`. Every transition first clears it
//! from a copy of the grid, tests the candidate position against that copy,
//! and only then writes fields back, so a rejected move leaves the state
//! exactly as it was.

use crate::catalog::{preview_grid, random_playable, SPAWN_COLORS};
use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::ColorPicker;
use crate::types::*;

/// Emitted each time a piece locks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_delta: u32,
    /// Piece cells the lock merge dropped for being outside the grid.
    /// Non-zero means an internal invariant was broken.
    pub dropped_cells: u32,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    grid: Grid,
    current_piece: Option<Piece>,
    next_piece_color: BlockColor,
    score: u32,
    lines_cleared: u32,
    level: u32,
    is_game_over: bool,
    tick_interval_ms: u64,
    /// Monotonic id for spawned pieces (increments only on successful spawn)
    piece_id: u32,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game on an empty main grid, without a piece yet
    pub fn new(picker: &mut dyn ColorPicker, tick_interval_ms: u64) -> Self {
        let next = random_playable(picker);
        Self::with_grid(Grid::main(), next, tick_interval_ms)
    }

    /// Create a game on an existing grid with a chosen next color
    ///
    /// `Empty` is not a valid next color and is replaced by the first catalog color.
    pub fn with_grid(grid: Grid, next_piece_color: BlockColor, tick_interval_ms: u64) -> Self {
        let next_piece_color = if next_piece_color.is_playable() {
            next_piece_color
        } else {
            SPAWN_COLORS[0]
        };

        Self {
            grid,
            current_piece: None,
            next_piece_color,
            score: 0,
            lines_cleared: 0,
            level: INITIAL_LEVEL,
            is_game_over: false,
            tick_interval_ms: tick_interval_ms.max(1),
            piece_id: 0,
            last_event: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current_piece.as_ref()
    }

    pub fn next_piece_color(&self) -> BlockColor {
        self.next_piece_color
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn last_event(&self) -> Option<LockEvent> {
        self.last_event
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Next piece centered in an empty preview grid
    pub fn preview_grid(&self) -> Grid {
        preview_grid(self.next_piece_color)
    }

    /// Spawn the next piece at the top of the grid
    ///
    /// If it collides immediately the game is over. Otherwise the piece is
    /// painted into the grid and a new next color is drawn. Returns whether a
    /// piece was spawned.
    pub fn spawn_piece(&mut self, picker: &mut dyn ColorPicker) -> bool {
        if self.is_game_over {
            return false;
        }

        let Some(piece) = Piece::spawn(self.next_piece_color, &self.grid) else {
            self.is_game_over = true;
            self.current_piece = None;
            return false;
        };

        if piece.collides(&self.grid) {
            self.is_game_over = true;
            self.current_piece = None;
            return false;
        }

        self.grid = piece.merged_into(&self.grid);
        self.current_piece = Some(piece);
        self.next_piece_color = random_playable(picker);
        self.piece_id = self.piece_id.wrapping_add(1);

        true
    }

    /// Try to move the active piece
    ///
    /// A blocked downward move locks the piece at its current position and
    /// spawns the next one. A blocked sideways move changes nothing. Returns
    /// whether the state changed.
    pub fn try_move(&mut self, d_col: i32, d_row: i32, picker: &mut dyn ColorPicker) -> bool {
        if self.is_game_over {
            return false;
        }
        let Some(piece) = self.current_piece.clone() else {
            return false;
        };

        let without_piece = piece.cleared_from(&self.grid);
        let candidate = piece.moved(d_col, d_row);

        if !candidate.collides(&without_piece) {
            self.grid = candidate.merged_into(&without_piece);
            self.current_piece = Some(candidate);
            return true;
        }

        if d_row > 0 {
            self.lock_piece(without_piece, piece, picker);
            return true;
        }

        false
    }

    /// Try to rotate the active piece clockwise in place
    ///
    /// There are no wall kicks: if the rotated shape does not fit at the same
    /// (row, col), the rotation is discarded.
    pub fn try_rotate(&mut self) -> bool {
        if self.is_game_over {
            return false;
        }
        let Some(piece) = self.current_piece.as_ref() else {
            return false;
        };

        let without_piece = piece.cleared_from(&self.grid);
        let rotated = piece.rotated();

        if rotated.collides(&without_piece) {
            return false;
        }

        self.grid = rotated.merged_into(&without_piece);
        self.current_piece = Some(rotated);
        true
    }

    /// Drop the active piece to the lowest free row and lock it
    pub fn hard_drop(&mut self, picker: &mut dyn ColorPicker) -> bool {
        if self.is_game_over {
            return false;
        }
        let Some(piece) = self.current_piece.clone() else {
            return false;
        };

        let without_piece = piece.cleared_from(&self.grid);

        let mut row = piece.row;
        while !without_piece.has_collision(&piece.shape, row + 1, piece.col) {
            row += 1;
        }

        self.lock_piece(without_piece, piece.at_row(row), picker);
        true
    }

    /// One gravity step
    pub fn tick(&mut self, picker: &mut dyn ColorPicker) -> bool {
        self.try_move(0, 1, picker)
    }

    /// Lock `piece` onto `grid` (which must not contain it), clear lines, spawn next
    fn lock_piece(&mut self, grid: Grid, piece: Piece, picker: &mut dyn ColorPicker) {
        let merged = grid.merge_shape_counted(&piece.shape, piece.row, piece.col);
        let (grid, lines) = merged.grid.clear_completed_lines();

        let score_delta = lines.saturating_mul(LINE_CLEAR_POINTS);
        self.score = self.score.saturating_add(score_delta);
        self.lines_cleared = self.lines_cleared.saturating_add(lines);

        self.grid = grid;
        self.current_piece = None;
        self.last_event = Some(LockEvent {
            lines_cleared: lines,
            score_delta,
            dropped_cells: merged.dropped as u32,
        });

        self.spawn_piece(picker);
    }

    /// Replace this state with a fresh game and spawn its first piece
    ///
    /// The tick interval carries over.
    pub fn reset(&mut self, picker: &mut dyn ColorPicker) {
        *self = Self::new(picker, self.tick_interval_ms);
        self.spawn_piece(picker);
    }

    /// Apply a game action, returning whether the state changed
    pub fn apply_action(&mut self, action: GameAction, picker: &mut dyn ColorPicker) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0, picker),
            GameAction::MoveRight => self.try_move(1, 0, picker),
            GameAction::SoftDrop => self.try_move(0, 1, picker),
            GameAction::Rotate => self.try_rotate(),
            GameAction::HardDrop => self.hard_drop(picker),
            GameAction::Reset => {
                self.reset(picker);
                true
            }
        }
    }
}
