//! Personal best
//!
//! A single best score persisted as a decimal string.

use crate::error::Result;
use crate::persistence::KeyValueStore;

/// Best score seen on this device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "quiz_runner_highscore";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Check if a score beats the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished run; returns true when it set a new best
    pub fn submit(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load from the store; missing or unreadable values start fresh
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY).map(|raw| raw.trim().parse::<u32>()) {
            Some(Ok(best)) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Some(Err(e)) => {
                log::warn!("Ignoring corrupt high score: {}", e);
                Self::new()
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<()> {
        store.set(Self::STORAGE_KEY, &self.best.to_string())?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}
