//! Best score tracking
//!
//! A single scalar, read once at boot and written at game over when beaten.

use serde::{Deserialize, Serialize};

use crate::persistence::ScalarStore;

/// Persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// LocalStorage key for the best score
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Check if a score beats the record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run. Returns true if it set a new record.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load from the store; missing or unreadable values start at zero
    pub fn load(store: &dyn ScalarStore) -> Self {
        match store.load_scalar(Self::STORAGE_KEY) {
            Some(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut dyn ScalarStore) {
        store.save_scalar(Self::STORAGE_KEY, self.best);
        log::info!("High score saved ({})", self.best);
    }
}
