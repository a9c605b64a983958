//! Data-driven game balance
//!
//! Every gameplay constant the engine reads lives here so a JSON file can
//! override any subset of them. Progress values use the 0-100 track scale
//! where 0 is the horizon and 100 is the truck's front bumper.

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};

/// Gameplay tuning for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Progress per tick before any gate is cleared
    pub base_speed: f32,
    /// Extra progress per tick for every point scored
    pub scale_factor: f32,
    /// Hard ceiling on progress per tick
    pub cap_speed: f32,
    /// Points awarded per correct gate
    pub points_per_gate: u32,
    /// Where a fresh gate appears (above the visible road)
    pub spawn_progress: f32,
    /// The judged line; a gate is evaluated the tick it crosses this
    pub collision_line: f32,
    /// Past this a gate is off-screen and discarded
    pub cleanup_progress: f32,
    /// How long the success cue stays visible
    pub success_cue_ticks: u32,
    /// Ticks between a wrong pick and the game-over report (lets the cue play)
    pub fail_report_delay_ticks: u32,
    pub scenery: SceneryTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 0.2,
            scale_factor: 0.001,
            cap_speed: 2.0,
            points_per_gate: 10,
            spawn_progress: -30.0,
            collision_line: 92.0,
            cleanup_progress: 120.0,
            // 1 s and 0.5 s at a 60 Hz display
            success_cue_ticks: 60,
            fail_report_delay_ticks: 30,
            scenery: SceneryTuning::default(),
        }
    }
}

/// Roadside prop cadence and lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneryTuning {
    /// One prop every N ticks
    pub interval_ticks: u64,
    pub spawn_progress: f32,
    pub despawn_progress: f32,
}

impl Default for SceneryTuning {
    fn default() -> Self {
        Self {
            interval_ticks: 30,
            spawn_progress: -20.0,
            despawn_progress: 120.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning file; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the engine's invariants
    pub fn validate(&self) -> Result<()> {
        if !(self.base_speed > 0.0) {
            return Err(QuizError::InvalidTuning(format!(
                "base_speed must be positive, got {}",
                self.base_speed
            )));
        }
        if !(self.cap_speed >= self.base_speed) {
            return Err(QuizError::InvalidTuning(format!(
                "cap_speed {} is below base_speed {}",
                self.cap_speed, self.base_speed
            )));
        }
        if !(self.scale_factor >= 0.0) {
            return Err(QuizError::InvalidTuning(
                "scale_factor must not be negative".into(),
            ));
        }
        if !(self.spawn_progress < self.collision_line && self.collision_line < self.cleanup_progress) {
            return Err(QuizError::InvalidTuning(format!(
                "expected spawn < line < cleanup, got {} / {} / {}",
                self.spawn_progress, self.collision_line, self.cleanup_progress
            )));
        }
        if self.scenery.interval_ticks == 0 {
            return Err(QuizError::InvalidTuning(
                "scenery interval must be at least one tick".into(),
            ));
        }
        if !(self.scenery.spawn_progress < self.scenery.despawn_progress) {
            return Err(QuizError::InvalidTuning(
                "scenery must spawn before its despawn threshold".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "cap_speed": 1.5, "scenery": { "interval_ticks": 10 } }"#)
            .expect("valid tuning");
        assert_eq!(tuning.cap_speed, 1.5);
        assert_eq!(tuning.base_speed, 0.2);
        assert_eq!(tuning.scenery.interval_ticks, 10);
        assert_eq!(tuning.scenery.despawn_progress, 120.0);
    }

    #[test]
    fn test_rejects_cap_below_base() {
        let err = Tuning::from_json(r#"{ "base_speed": 0.5, "cap_speed": 0.1 }"#).unwrap_err();
        assert!(matches!(err, QuizError::InvalidTuning(_)));
    }

    #[test]
    fn test_rejects_line_outside_track() {
        let tuning = Tuning {
            collision_line: 130.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }
}
