//! Snapshot tests - the JSON view observers read from the engine

use serde::Deserialize;

use jetris::core::SequencePicker;
use jetris::engine::{grid_rows, EngineConfig, GameEngine, GameSnapshot};
use jetris::types::BlockColor;

/// The fields a scoreboard reads out of a snapshot
#[derive(Debug, Deserialize)]
struct Scoreboard {
    score: u32,
    lines_cleared: u32,
    level: u32,
    is_game_over: bool,
}

fn engine(colors: Vec<BlockColor>) -> GameEngine {
    GameEngine::with_picker(EngineConfig::default(), Box::new(SequencePicker::new(colors))).unwrap()
}

#[test]
fn test_snapshot_tracks_engine_state() {
    let engine = engine(vec![BlockColor::Yellow, BlockColor::Pink]);
    assert!(engine.hard_drop());

    let snap = GameSnapshot::from(&engine.current_game_state());
    assert_eq!(snap.grid[13], "....YY....");
    assert_eq!(snap.grid[14], "....YY....");
    assert_eq!(snap.piece_id, 2);
    assert_eq!(snap.next_piece_color, "yellow");
    assert_eq!(snap.preview, vec!["...", "YY.", "YY.", "..."]);

    let piece = snap.current_piece.as_ref().unwrap();
    assert_eq!(piece.color, "pink");
    assert_eq!((piece.row, piece.col), (0, 4));

    let json = serde_json::to_string(&snap).unwrap();
    let board: Scoreboard = serde_json::from_str(&json).unwrap();
    assert_eq!(board.score, 0);
    assert_eq!(board.lines_cleared, 0);
    assert_eq!(board.level, 1);
    assert!(!board.is_game_over);
}

#[test]
fn test_subscriber_sees_commands() {
    tokio_test::block_on(async {
        let engine = engine(vec![BlockColor::Red]);
        let mut rx = engine.subscribe();

        assert!(engine.soft_drop());
        rx.changed().await.unwrap();

        assert_eq!(rx.borrow_and_update().current_piece().unwrap().row, 1);
        let rows = grid_rows(rx.borrow().grid());
        assert_eq!(rows[1], "...RR.....");
        assert_eq!(rows[2], "....RR....");
    });
}
