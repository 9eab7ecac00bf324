//! Jetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, tests and
//! benches can write `jetris::{core, engine, types}`.

pub use jetris_core as core;
pub use jetris_engine as engine;
pub use jetris_types as types;
