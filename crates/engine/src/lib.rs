//! Engine module - runs a game session on a tokio runtime
//!
//! The core crate only knows how to compute the next state. This crate owns
//! the session: it keeps the committed [`GameState`](jetris_core::GameState)
//! in a watch channel, serializes player commands against gravity ticks, and
//! drives the tick loop.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  commands   ┌────────────┐  send_if_modified  ┌──────────────┐
//! │ caller       │ ──────────► │ GameEngine │ ─────────────────► │ watch::Sender│
//! └──────────────┘             └────────────┘                    └──────┬───────┘
//!                                    ▲                                  │ subscribe
//!                               tick │                                  ▼
//!                              ┌─────┴──────┐                    ┌──────────────┐
//!                              │ tick task  │                    │ observers    │
//!                              └────────────┘                    └──────────────┘
//! ```
//!
//! # Observability
//!
//! Lifecycle messages go to stderr with an `[Engine]` prefix. When
//! [`EngineConfig::event_log_path`] is set, spawns, locks, game over and loop
//! changes are also appended to a JSON-lines file (see [`event_log`]).

pub use jetris_core as core;
pub use jetris_types as types;

pub mod config;
pub mod engine;
pub mod event_log;
pub mod snapshot;

pub use config::EngineConfig;
pub use engine::GameEngine;
pub use event_log::{EngineEvent, EventLog};
pub use snapshot::{grid_rows, GameSnapshot, PieceSnapshot};
