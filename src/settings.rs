//! Player preferences
//!
//! Persisted separately from the high score, as JSON in the key-value store.

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::persistence::KeyValueStore;

/// Music look-ahead window used when none (or a broken one) is configured
pub const DEFAULT_LOOKAHEAD_SECS: f64 = 0.1;
/// Longest accepted look-ahead window; beyond this the music lags screen changes
pub const MAX_LOOKAHEAD_SECS: f64 = 1.0;

/// True for a usable look-ahead window: finite, positive, at most one second
pub fn lookahead_is_valid(secs: f64) -> bool {
    secs.is_finite() && secs > 0.0 && secs <= MAX_LOOKAHEAD_SECS
}

/// What the music cursor does when the screen (and so the track) changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CursorPolicy {
    /// Keep counting notes; the new track picks up mid-phrase
    #[default]
    Continuous,
    /// Restart the new track from its first note
    ResetOnTrackChange,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Success/fail cue volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    pub cursor_policy: CursorPolicy,
    /// How far ahead of the audio clock notes are scheduled, in seconds
    pub lookahead_secs: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            music_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
            cursor_policy: CursorPolicy::Continuous,
            lookahead_secs: DEFAULT_LOOKAHEAD_SECS,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "quiz_runner_settings";

    /// Effective music gain multiplier
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.music_volume.clamp(0.0, 1.0)
        }
    }

    /// Effective cue gain multiplier
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Reject values the audio front end cannot use
    pub fn validate(&self) -> Result<()> {
        for (name, volume) in [
            ("master_volume", self.master_volume),
            ("music_volume", self.music_volume),
            ("sfx_volume", self.sfx_volume),
        ] {
            if !(0.0..=1.0).contains(&volume) {
                return Err(QuizError::InvalidSettings(format!(
                    "{name} must be within 0..=1, got {volume}"
                )));
            }
        }
        if !lookahead_is_valid(self.lookahead_secs) {
            return Err(QuizError::InvalidSettings(format!(
                "lookahead_secs must be within (0, {MAX_LOOKAHEAD_SECS}], got {}",
                self.lookahead_secs
            )));
        }
        Ok(())
    }

    /// Repair unusable values: out-of-range volumes clamp, non-finite ones and
    /// a broken look-ahead window fall back to their defaults
    pub fn sanitized(mut self) -> Self {
        if let Err(e) = self.validate() {
            log::warn!("Repairing settings: {}", e);
        }
        let defaults = Self::default();
        for (volume, default) in [
            (&mut self.master_volume, defaults.master_volume),
            (&mut self.music_volume, defaults.music_volume),
            (&mut self.sfx_volume, defaults.sfx_volume),
        ] {
            *volume = if volume.is_finite() {
                volume.clamp(0.0, 1.0)
            } else {
                default
            };
        }
        if !lookahead_is_valid(self.lookahead_secs) {
            self.lookahead_secs = DEFAULT_LOOKAHEAD_SECS;
        }
        self
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }
        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
