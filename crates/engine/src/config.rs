//! Engine configuration
//!
//! Defaults suit an interactive game. `from_env` reads overrides the same way
//! for every binary and test harness.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};

use crate::types::DEFAULT_TICK_MS;

/// Gravity interval override, in milliseconds
pub const ENV_TICK_MS: &str = "JETRIS_TICK_MS";
/// Fixed RNG seed
pub const ENV_SEED: &str = "JETRIS_SEED";
/// Path of the JSON-lines event log
pub const ENV_EVENT_LOG: &str = "JETRIS_EVENT_LOG";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub tick_interval_ms: u64,
    /// RNG seed; `None` seeds from the system clock
    pub seed: Option<u32>,
    pub event_log_path: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_MS,
            seed: None,
            event_log_path: None,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key/value source (unset, blank or unparsable keys use defaults)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let tick_interval_ms = get(ENV_TICK_MS)
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TICK_MS);

        let seed = get(ENV_SEED).and_then(|s| s.parse().ok());

        let event_log_path = get(ENV_EVENT_LOG);

        Self {
            tick_interval_ms,
            seed,
            event_log_path,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            bail!("tick interval must be greater than zero");
        }
        Ok(())
    }

    /// Configured seed, or one derived from the clock
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
