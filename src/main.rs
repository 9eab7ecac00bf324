//! Headless runner (default binary).
//!
//! Starts a game with gravity running, feeds it random player commands until
//! the game ends or the piece budget runs out, then prints the final state as
//! JSON on stdout. Configuration comes from the environment (`JETRIS_TICK_MS`,
//! `JETRIS_SEED`, `JETRIS_EVENT_LOG`, `JETRIS_MAX_PIECES`).

use std::time::Duration;

use anyhow::{Context, Result};

use jetris::core::SimpleRng;
use jetris::engine::{EngineConfig, GameEngine, GameSnapshot};
use jetris::types::GameAction;

const ENV_MAX_PIECES: &str = "JETRIS_MAX_PIECES";
const DEFAULT_MAX_PIECES: u32 = 200;

/// Commands the autoplayer draws from; repeats weight the draw.
const PLAYER_MOVES: [GameAction; 8] = [
    GameAction::MoveLeft,
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::MoveRight,
    GameAction::Rotate,
    GameAction::SoftDrop,
    GameAction::SoftDrop,
    GameAction::HardDrop,
];

#[tokio::main]
async fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    let max_pieces = std::env::var(ENV_MAX_PIECES)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_MAX_PIECES);

    let seed = config.resolved_seed();
    let tick = Duration::from_millis(config.tick_interval_ms);
    let engine = GameEngine::new(EngineConfig {
        seed: Some(seed),
        ..config
    })
    .context("failed to start game engine")?;

    eprintln!(
        "[Main] seed {}, tick {}ms, up to {} pieces",
        seed,
        tick.as_millis(),
        max_pieces
    );

    let mut player = SimpleRng::new(seed.wrapping_add(1));
    let mut updates = engine.subscribe();
    let mut commands = tokio::time::interval((tick / 4).max(Duration::from_millis(1)));
    engine.start_loop();

    loop {
        tokio::select! {
            _ = commands.tick() => {
                let action = PLAYER_MOVES[player.next_range(PLAYER_MOVES.len() as u32) as usize];
                engine.apply_action(action);
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!("[Main] Interrupted");
                break;
            }
        }

        let state = engine.current_game_state();
        if state.is_game_over() || state.piece_id() > max_pieces {
            break;
        }
    }

    engine.stop_loop();

    let snapshot = GameSnapshot::from(&engine.current_game_state());
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
