//! Load and save of the single persisted integer

use super::{KeyValueStore, StoreError};
use crate::consts::BEST_SCORE_KEY;

/// Parse a stored best score
pub fn parse_best_score(value: &str) -> Result<u32, StoreError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| StoreError::InvalidValue {
            key: BEST_SCORE_KEY.to_string(),
            value: value.to_string(),
        })
}

/// Read the best score; any failure yields 0
pub fn load_best_score<S: KeyValueStore + ?Sized>(store: &S) -> u32 {
    let loaded = store
        .get(BEST_SCORE_KEY)
        .and_then(|value| value.map(|v| parse_best_score(&v)).transpose());

    match loaded {
        Ok(Some(best)) => {
            log::info!("Loaded best score {}", best);
            best
        }
        Ok(None) => {
            log::info!("No best score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Failed to load best score: {}", e);
            0
        }
    }
}

/// Write the best score. Returns whether the write reached the store.
pub fn save_best_score<S: KeyValueStore + ?Sized>(store: &mut S, score: u32) -> bool {
    match store.set(BEST_SCORE_KEY, &score.to_string()) {
        Ok(()) => {
            log::info!("Best score saved ({})", score);
            true
        }
        Err(e) => {
            log::warn!("Failed to save best score {}: {}", score, e);
            false
        }
    }
}
