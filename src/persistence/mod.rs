//! High score persistence
//!
//! Only a single scalar survives between sessions. Stores are best effort:
//! callers log and swallow `StoreError`, the in-memory score stays authoritative.

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use thiserror::Error;

/// LocalStorage key for the high score
pub const HIGH_SCORE_KEY: &str = "pizzaHighScore";

/// Errors from a high score store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage rejected write: {0}")]
    Write(String),
    #[error("stored value is not a score: {0:?}")]
    Corrupt(String),
}

/// Key-value store holding the high score
pub trait HighScoreStore {
    /// Read the persisted high score (0 if none was ever saved)
    fn load(&self) -> Result<u64, StoreError>;

    /// Persist a new high score
    fn save(&mut self, score: u64) -> Result<(), StoreError>;
}

/// Parse a stored high score. Empty means "never saved".
pub fn parse_high_score(raw: &str) -> Result<u64, StoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u64>()
        .map_err(|_| StoreError::Corrupt(raw.to_string()))
}

/// In-memory store for native runs and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    value: Option<u64>,
    /// When set, every read and write fails
    pub fail: bool,
    /// Number of successful writes
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds a high score
    pub fn with_value(score: u64) -> Self {
        Self {
            value: Some(score),
            ..Self::default()
        }
    }

    /// Store whose reads and writes always fail
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> Option<u64> {
        self.value
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u64, StoreError> {
        if self.fail {
            return Err(StoreError::Unavailable);
        }
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Write("memory store set to fail".to_string()));
        }
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_high_score() {
        assert_eq!(parse_high_score("").unwrap(), 0);
        assert_eq!(parse_high_score(" 1234 ").unwrap(), 1234);
        assert!(matches!(parse_high_score("abc"), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), 0);
        store.save(42).unwrap();
        assert_eq!(store.load().unwrap(), 42);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_failing_store() {
        let mut store = MemoryStore::failing();
        assert!(store.load().is_err());
        assert!(store.save(1).is_err());
        assert_eq!(store.value(), None);
    }
}
