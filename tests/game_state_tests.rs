//! Game state tests - spawn, move, lock, rotate, hard drop and game over

use jetris::core::{GameState, Grid, SequencePicker};
use jetris::types::{BlockColor, GameAction, DEFAULT_TICK_MS, GRID_ROWS};

fn start(colors: Vec<BlockColor>) -> (GameState, SequencePicker) {
    let mut picker = SequencePicker::new(colors);
    let mut state = GameState::new(&mut picker, DEFAULT_TICK_MS);
    assert!(state.spawn_piece(&mut picker));
    (state, picker)
}

/// Game on a prepared grid whose first piece is `color`
fn start_on(rows: &[&str], color: BlockColor, picker: &mut SequencePicker) -> GameState {
    let grid = Grid::from_text(rows).unwrap();
    let mut state = GameState::with_grid(grid, color, DEFAULT_TICK_MS);
    assert!(state.spawn_piece(picker));
    state
}

fn empty_rows() -> Vec<&'static str> {
    vec![".........."; GRID_ROWS]
}

#[test]
fn test_orange_spawn_position() {
    let (state, _) = start(vec![BlockColor::Orange, BlockColor::Red]);

    let piece = state.current_piece().unwrap();
    assert_eq!((piece.row, piece.col), (0, 3));

    let filled: Vec<(usize, usize)> = state
        .grid()
        .filled_cells()
        .map(|(r, c, color)| {
            assert_eq!(color, BlockColor::Orange);
            (r, c)
        })
        .collect();
    assert_eq!(filled, vec![(0, 5), (1, 3), (1, 4), (1, 5)]);
}

#[test]
fn test_spawn_into_occupied_top_is_game_over() {
    let mut rows = empty_rows();
    rows[1] = "....R.....";
    let mut picker = SequencePicker::repeat(BlockColor::Orange);
    let grid = Grid::from_text(&rows).unwrap();
    let mut state = GameState::with_grid(grid.clone(), BlockColor::Orange, DEFAULT_TICK_MS);

    assert!(!state.spawn_piece(&mut picker));
    assert!(state.is_game_over());
    assert!(state.current_piece().is_none());
    assert_eq!(state.grid(), &grid);
    assert_eq!(state.piece_id(), 0);

    // Nothing moves once the game is over.
    assert!(!state.spawn_piece(&mut picker));
    assert!(!state.tick(&mut picker));
}

#[test]
fn test_move_down_onto_stack_locks_without_clearing() {
    let mut rows = empty_rows();
    rows[5] = "RRRRRRRRR.";
    let mut picker = SequencePicker::repeat(BlockColor::Blue);
    let mut state = start_on(&rows, BlockColor::Yellow, &mut picker);

    // Yellow square falls to rows 3-4, right above the stack.
    for _ in 0..3 {
        assert!(state.try_move(0, 1, &mut picker));
    }
    assert_eq!(state.current_piece().unwrap().row, 3);
    assert_eq!(state.piece_id(), 1);

    assert!(state.try_move(0, 1, &mut picker));

    let event = state.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 0);
    assert_eq!(event.score_delta, 0);
    assert_eq!(state.lines_cleared(), 0);
    assert_eq!(state.score(), 0);

    // The square stayed where it was; a new blue piece was spawned.
    assert_eq!(state.grid().get(3, 4), Some(BlockColor::Yellow));
    assert_eq!(state.grid().get(4, 5), Some(BlockColor::Yellow));
    assert_eq!(state.grid().get(5, 9), Some(BlockColor::Empty));
    assert!(!state.grid().is_row_full(4));
    assert_eq!(state.piece_id(), 2);
    assert_eq!(state.current_piece().unwrap().color, BlockColor::Blue);
    assert_eq!(state.grid().get(0, 3), Some(BlockColor::Blue));
}

#[test]
fn test_move_down_lock_completes_row() {
    let mut rows = empty_rows();
    rows[4] = "RRRR..RRRR";
    rows[5] = "RRRRRRRRR.";
    let mut picker = SequencePicker::repeat(BlockColor::Blue);
    let mut state = start_on(&rows, BlockColor::Yellow, &mut picker);

    for _ in 0..3 {
        assert!(state.try_move(0, 1, &mut picker));
    }
    assert_eq!(state.piece_id(), 1);
    assert!(state.try_move(0, 1, &mut picker));

    let event = state.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 1);
    assert_eq!(event.score_delta, 100);
    assert_eq!(state.lines_cleared(), 1);
    assert_eq!(state.score(), 100);

    // Row 4 filled and cleared; the top half of the square dropped into it.
    let snapshot = state.grid().to_string();
    let lines: Vec<&str> = snapshot.lines().collect();
    assert_eq!(lines[3], "..........");
    assert_eq!(lines[4], "....YY....");
    assert_eq!(lines[5], "RRRRRRRRR.");
    assert_eq!(state.piece_id(), 2);
    assert_eq!(state.current_piece().unwrap().color, BlockColor::Blue);
}

#[test]
fn test_lock_that_completes_row_scores() {
    let mut rows = empty_rows();
    rows[13] = "YYYY..YYYY";
    rows[14] = "YYYY..YYYY";
    let mut picker = SequencePicker::repeat(BlockColor::Green);
    let mut state = start_on(&rows, BlockColor::Yellow, &mut picker);

    assert!(state.hard_drop(&mut picker));

    let event = state.last_event().unwrap();
    assert_eq!(event.lines_cleared, 2);
    assert_eq!(event.score_delta, 200);
    assert_eq!(state.score(), 200);
    assert_eq!(state.lines_cleared(), 2);

    // Only the freshly spawned green piece is left.
    assert_eq!(state.grid().filled_cells().count(), 4);
    assert_eq!(state.current_piece().unwrap().color, BlockColor::Green);
}

#[test]
fn test_soft_drop_lock_clears_row() {
    let mut rows = empty_rows();
    rows[14] = "PPPP.PPPPP";
    let mut picker = SequencePicker::repeat(BlockColor::Red);
    let mut state = start_on(&rows, BlockColor::Pink, &mut picker);
    assert_eq!(state.current_piece().unwrap().col, 4);

    // Pink bar falls from rows 0-3 to rows 11-14 (11 moves), then locks.
    for _ in 0..11 {
        assert!(state.tick(&mut picker));
    }
    assert_eq!(state.piece_id(), 1);
    assert!(state.tick(&mut picker));
    assert_eq!(state.piece_id(), 2);

    assert_eq!(state.lines_cleared(), 1);
    assert_eq!(state.score(), 100);
    for r in 12..GRID_ROWS as i32 {
        assert_eq!(state.grid().get(r, 4), Some(BlockColor::Pink));
    }
    assert_eq!(state.grid().get(11, 4), Some(BlockColor::Empty));
}

#[test]
fn test_sideways_into_block_is_noop() {
    let mut rows = empty_rows();
    rows[0] = "..R.......";
    rows[1] = "..R.......";
    let mut picker = SequencePicker::repeat(BlockColor::Yellow);
    let mut state = start_on(&rows, BlockColor::Yellow, &mut picker);

    assert!(state.try_move(-1, 0, &mut picker));
    let before = state.clone();
    assert!(!state.try_move(-1, 0, &mut picker));
    assert_eq!(state, before);
}

#[test]
fn test_rotating_square_changes_nothing() {
    let (mut state, _) = start(vec![BlockColor::Yellow]);
    let before = state.grid().clone();

    assert!(state.try_rotate());
    assert_eq!(state.grid(), &before);
    assert_eq!(state.current_piece().unwrap().shape.to_string(), "YY\nYY\n");
}

#[test]
fn test_rotation_blocked_without_wall_kick() {
    let (mut state, mut picker) = start(vec![BlockColor::Pink]);
    // Vertical bar at column 4, rows 0-3. Push it to the right wall.
    while state.try_move(1, 0, &mut picker) {}
    assert_eq!(state.current_piece().unwrap().col, 9);

    // Horizontal would need columns 9..=12.
    let before = state.clone();
    assert!(!state.try_rotate());
    assert_eq!(state, before);
}

#[test]
fn test_rotate_then_move() {
    let (mut state, mut picker) = start(vec![BlockColor::Pink]);
    assert!(state.try_rotate());

    let piece = state.current_piece().unwrap();
    assert_eq!((piece.shape.rows(), piece.shape.cols()), (1, 4));
    assert_eq!(state.grid().row(0), Grid::from_text(&["....KKKK.."]).unwrap().row(0));

    assert!(state.try_move(-1, 0, &mut picker));
    assert_eq!(state.grid().filled_cells().count(), 4);
}

#[test]
fn test_hard_drop_lands_on_stack() {
    let mut rows = empty_rows();
    rows[10] = "....B.....";
    let mut picker = SequencePicker::repeat(BlockColor::Orange);
    let mut state = start_on(&rows, BlockColor::Yellow, &mut picker);

    assert!(state.hard_drop(&mut picker));
    assert_eq!(state.grid().get(8, 4), Some(BlockColor::Yellow));
    assert_eq!(state.grid().get(9, 5), Some(BlockColor::Yellow));
    assert_eq!(state.grid().get(10, 4), Some(BlockColor::Blue));
    assert_eq!(state.current_piece().unwrap().color, BlockColor::Orange);
}

#[test]
fn test_stacking_ends_in_game_over() {
    let (mut state, mut picker) = start(vec![BlockColor::Pink]);

    assert!(state.hard_drop(&mut picker));
    assert!(state.hard_drop(&mut picker));
    assert!(!state.is_game_over());
    assert!(state.hard_drop(&mut picker));

    assert!(state.is_game_over());
    assert!(state.current_piece().is_none());
    assert_eq!(state.piece_id(), 3);
    assert!(!state.apply_action(GameAction::HardDrop, &mut picker));
}

#[test]
fn test_actions_map_to_transitions() {
    let (mut state, mut picker) = start(vec![BlockColor::Purple]);

    assert!(state.apply_action(GameAction::MoveLeft, &mut picker));
    assert_eq!(state.current_piece().unwrap().col, 2);
    assert!(state.apply_action(GameAction::MoveRight, &mut picker));
    assert!(state.apply_action(GameAction::SoftDrop, &mut picker));
    assert_eq!(state.current_piece().unwrap().row, 1);
    assert!(state.apply_action(GameAction::Rotate, &mut picker));
    assert!(state.apply_action(GameAction::HardDrop, &mut picker));
    assert_eq!(state.piece_id(), 2);

    assert!(state.apply_action(GameAction::Reset, &mut picker));
    assert_eq!(state.piece_id(), 1);
    assert_eq!(state.grid().filled_cells().count(), 4);
}

#[test]
fn test_action_names() {
    assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    assert_eq!(GameAction::from_str("teleport"), None);
    assert_eq!(GameAction::SoftDrop.as_str(), "softDrop");
}
