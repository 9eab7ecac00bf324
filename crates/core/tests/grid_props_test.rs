//! Property tests for the grid and shape laws
//!
//! - merge then clear restores a grid that was empty under the shape
//! - a cleared piece never collides with its own old position
//! - four clockwise rotations give back the original shape
//! - line clearing removes exactly the full rows and keeps the rest in order
//! - random play never breaks the grid/piece bookkeeping

use proptest::prelude::*;

use jetris_core::types::{BlockColor, GameAction, GRID_COLUMNS, GRID_ROWS};
use jetris_core::{template, GameState, Grid, Shape, SimpleRng};

fn any_color() -> impl Strategy<Value = BlockColor> {
    prop::sample::select(BlockColor::ALL.to_vec())
}

fn playable_color() -> impl Strategy<Value = BlockColor> {
    prop::sample::select(BlockColor::PLAYABLE.to_vec())
}

fn main_grid() -> impl Strategy<Value = Grid> {
    prop::collection::vec(any_color(), GRID_ROWS * GRID_COLUMNS).prop_map(|cells| {
        let rows: Vec<Vec<BlockColor>> =
            cells.chunks(GRID_COLUMNS).map(|row| row.to_vec()).collect();
        Grid::from_rows(&rows).unwrap()
    })
}

/// A catalog template, rotated 0..=3 times
fn piece_shape() -> impl Strategy<Value = Shape> {
    (playable_color(), 0usize..4).prop_map(|(color, turns)| {
        let mut shape = template(color).unwrap();
        for _ in 0..turns {
            shape = shape.rotate_clockwise();
        }
        shape
    })
}

/// Shape plus a top-left position that keeps it fully inside the main grid
fn placed_shape() -> impl Strategy<Value = (Shape, i32, i32)> {
    piece_shape().prop_flat_map(|shape| {
        let max_row = (GRID_ROWS - shape.rows()) as i32;
        let max_col = (GRID_COLUMNS - shape.cols()) as i32;
        (Just(shape), 0..=max_row, 0..=max_col)
    })
}

fn any_shape() -> impl Strategy<Value = Shape> {
    (1usize..=4, 1usize..=4).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(any_color(), cols), rows)
            .prop_map(|rows| Shape::from_rows(&rows).unwrap())
    })
}

fn any_action() -> impl Strategy<Value = GameAction> {
    prop::sample::select(vec![
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::Rotate,
        GameAction::HardDrop,
    ])
}

proptest! {
    #[test]
    fn clear_after_merge_restores_grid(grid in main_grid(), (shape, row, col) in placed_shape()) {
        let base = grid.clear_shape(&shape, row, col);
        let merged = base.merge_shape(&shape, row, col);

        prop_assert_eq!(merged.clear_shape(&shape, row, col), base);
    }

    #[test]
    fn cleared_piece_never_self_collides(grid in main_grid(), (shape, row, col) in placed_shape()) {
        let cleared = grid
            .merge_shape(&shape, row, col)
            .clear_shape(&shape, row, col);

        prop_assert!(!cleared.has_collision(&shape, row, col));
    }

    #[test]
    fn four_rotations_are_identity(shape in any_shape()) {
        let back = shape
            .rotate_clockwise()
            .rotate_clockwise()
            .rotate_clockwise()
            .rotate_clockwise();

        prop_assert_eq!(back, shape);
    }

    #[test]
    fn rotation_swaps_dimensions(shape in any_shape()) {
        let rotated = shape.rotate_clockwise();

        prop_assert_eq!(rotated.rows(), shape.cols());
        prop_assert_eq!(rotated.cols(), shape.rows());
        prop_assert_eq!(rotated.filled_count(), shape.filled_count());
    }

    #[test]
    fn line_clear_drops_exactly_full_rows(grid in main_grid()) {
        let kept: Vec<Vec<BlockColor>> = (0..grid.rows())
            .filter(|&r| !grid.is_row_full(r))
            .map(|r| grid.row(r).to_vec())
            .collect();
        let full = (grid.rows() - kept.len()) as u32;

        let (cleared, count) = grid.clear_completed_lines();
        prop_assert_eq!(count, full);

        // Surviving rows keep their order at the bottom; the top is refilled empty.
        let offset = full as usize;
        for r in 0..offset {
            prop_assert!(cleared.row(r).iter().all(|c| c.is_empty()));
        }
        for (i, row) in kept.iter().enumerate() {
            prop_assert_eq!(cleared.row(offset + i), row.as_slice());
        }
    }

    #[test]
    fn random_play_keeps_piece_painted(seed in any::<u32>(), actions in prop::collection::vec(any_action(), 1..120)) {
        let mut rng = SimpleRng::new(seed);
        let mut state = GameState::new(&mut rng, 1000);
        state.spawn_piece(&mut rng);

        for action in actions {
            let before_lines = state.lines_cleared();
            let before_score = state.score();
            state.apply_action(action, &mut rng);

            prop_assert!(state.lines_cleared() >= before_lines);
            prop_assert_eq!(
                state.score() - before_score,
                (state.lines_cleared() - before_lines) * 100
            );

            match state.current_piece() {
                Some(piece) => {
                    prop_assert!(!state.is_game_over());
                    for (r, c, color) in piece.shape.filled_cells() {
                        let cell = state.grid().get(piece.row + r as i32, piece.col + c as i32);
                        prop_assert_eq!(cell, Some(color));
                    }
                }
                None => prop_assert!(state.is_game_over()),
            }
            if let Some(event) = state.take_last_event() {
                prop_assert_eq!(event.dropped_cells, 0);
            }
        }
    }
}
