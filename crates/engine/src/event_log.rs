//! JSON-lines event log
//!
//! One JSON object per line, appended to a file. Write failures are reported
//! on stderr and never interrupt the game.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Something worth recording about a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    LoopStarted {
        tick_interval_ms: u64,
    },
    LoopStopped,
    Spawned {
        piece_id: u32,
        color: String,
        next_color: String,
    },
    Locked {
        lines_cleared: u32,
        score_delta: u32,
        score: u32,
        dropped_cells: u32,
    },
    GameOver {
        score: u32,
        lines_cleared: u32,
    },
    Reset,
}

pub struct EventLog {
    writer: Mutex<BufWriter<File>>,
}

impl EventLog {
    /// Open (or create) `path` for appending
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn record(&self, event: &EngineEvent) {
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let result = serde_json::to_writer(&mut *writer, event)
            .map_err(std::io::Error::from)
            .and_then(|_| writer.write_all(b"\n"))
            .and_then(|_| writer.flush());

        if let Err(e) = result {
            eprintln!("[Engine] event log write failed: {}", e);
        }
    }
}
