//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the grid engine: shapes, the piece catalog, the color
//! grid with its collision and line-clearing rules, and the game state
//! transitions. It has no dependencies on timers, I/O or rendering:
//!
//! - **Deterministic**: randomness comes from an injected [`ColorPicker`]
//! - **Copy-on-write**: every [`Grid`] operation returns a new grid
//! - **Testable**: scripted pickers reproduce exact piece sequences
//!
//! # Module Structure
//!
//! - [`shape`]: bounded 2D color templates and clockwise rotation
//! - [`catalog`]: one template per playable color, preview centering
//! - [`grid`]: 15x10 play grid / 4x3 preview grid operations
//! - [`piece`]: the falling piece (shape, color, top-left position)
//! - [`game_state`]: spawn, move, rotate, hard drop, lock, reset
//! - [`rng`]: the [`ColorPicker`] seam with a seeded LCG and a scripted picker
//!
//! # Game Rules
//!
//! - Pieces spawn at row 0, horizontally centered; a blocked spawn ends the game
//! - A blocked downward move locks the piece; sideways blocks are ignored
//! - Rotation is clockwise in place with no wall kicks
//! - Each cleared line scores 100 points; level and speed stay constant
//!
//! # Example
//!
//! ```
//! use jetris_core::{GameState, SimpleRng};
//! use jetris_types::{GameAction, DEFAULT_TICK_MS};
//!
//! let mut rng = SimpleRng::new(12345);
//! let mut game = GameState::new(&mut rng, DEFAULT_TICK_MS);
//! game.spawn_piece(&mut rng);
//!
//! game.apply_action(GameAction::MoveRight, &mut rng);
//! game.apply_action(GameAction::Rotate, &mut rng);
//! game.apply_action(GameAction::HardDrop, &mut rng);
//!
//! assert_eq!(game.piece_id(), 2);
//! assert!(!game.is_game_over());
//! ```

pub mod catalog;
pub mod game_state;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod shape;

pub use jetris_types as types;

// Re-export commonly used types for convenience
pub use catalog::{preview_grid, random_playable, template, validate_catalog, CatalogError};
pub use game_state::{GameState, LockEvent};
pub use grid::{Grid, GridError, MergeOutcome};
pub use piece::Piece;
pub use rng::{ColorPicker, SequencePicker, SimpleRng};
pub use shape::{Shape, ShapeError};
