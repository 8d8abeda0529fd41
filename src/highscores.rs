//! High score persistence
//!
//! A single non-negative scalar stored under a fixed key. The storage
//! backend is injected so the engine never touches LocalStorage, files, or
//! any other host facility directly, and tests run against an in-memory
//! store. Malformed or missing data degrades to zero and is never fatal.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Fixed storage key for the persisted high score
pub const STORAGE_KEY: &str = "brick_blitz_highscore";

/// Injected storage collaborator.
///
/// Hosts implement this over whatever key-value facility they have
/// (LocalStorage on web, a dotfile natively).
pub trait ScoreStore {
    /// Read the raw value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;
    /// Write `value` under `key`. Failures are the host's problem;
    /// the engine never retries.
    fn write(&mut self, key: &str, value: &str);
}

/// Versionless JSON envelope for the persisted scalar
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HighScoreEnvelope {
    score: u64,
}

/// Load the persisted high score, treating anything malformed as zero.
pub fn load_high_score(store: &dyn ScoreStore) -> u64 {
    match store.read(STORAGE_KEY) {
        Some(json) => match serde_json::from_str::<HighScoreEnvelope>(&json) {
            Ok(envelope) => {
                log::info!("Loaded high score: {}", envelope.score);
                envelope.score
            }
            Err(err) => {
                log::warn!("Malformed high score entry, resetting to 0: {}", err);
                0
            }
        },
        None => {
            log::info!("No high score found, starting fresh");
            0
        }
    }
}

/// Persist a new high score.
pub fn save_high_score(store: &mut dyn ScoreStore, score: u64) {
    let envelope = HighScoreEnvelope { score };
    match serde_json::to_string(&envelope) {
        Ok(json) => {
            store.write(STORAGE_KEY, &json);
            log::info!("High score saved: {}", score);
        }
        Err(err) => log::warn!("Failed to serialize high score: {}", err),
    }
}

/// In-memory store for tests and hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    entries: HashMap<String, String>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a raw value (for tests exercising malformed data).
    pub fn with_raw(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl ScoreStore for MemoryScoreStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}
