//! Browser LocalStorage backend

use super::{HIGH_SCORE_KEY, HighScoreStore, StoreError, parse_high_score};

/// High score kept in `window.localStorage` as a decimal string
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<u64, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => parse_high_score(&raw),
            Ok(None) => Ok(0),
            Err(_) => Err(StoreError::Unavailable),
        }
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(HIGH_SCORE_KEY, &score.to_string())
            .map_err(|e| StoreError::Write(format!("{:?}", e)))
    }
}
