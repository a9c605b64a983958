//! Simulation state and the types the engine reports
//!
//! Everything here is owned by [`Engine`](super::Engine) and mutated only
//! inside its tick. Outside readers get a [`Snapshot`].

use serde::{Deserialize, Serialize};

use super::lane::Lane;
use super::scenery::SceneryItem;
use crate::content::Question;
use crate::cosmetics::TruckConfig;

/// Counters and flags for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub score: u32,
    /// Progress units per tick
    pub speed: f32,
    /// Ticks executed while the run was live
    pub frame_count: u64,
    /// Set on victory or on a wrong pick; no further movement or scoring
    pub session_over: bool,
}

impl SimulationState {
    pub fn new(base_speed: f32) -> Self {
        Self {
            score: 0,
            speed: base_speed,
            frame_count: 0,
            session_over: false,
        }
    }
}

/// How a gate was judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Match,
    Mismatch,
}

/// Lifecycle of the in-flight gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstaclePhase {
    /// Just created this tick, not yet moved
    Spawning,
    /// Moving toward the judged line
    Approaching,
    /// Judged; keeps scrolling until cleanup
    Resolved(Verdict),
}

/// The single gate carrying the current question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub progress: f32,
    pub question: Question,
    pub phase: ObstaclePhase,
}

impl Obstacle {
    pub fn new(id: u32, progress: f32, question: Question) -> Self {
        Self {
            id,
            progress,
            question,
            phase: ObstaclePhase::Spawning,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, ObstaclePhase::Resolved(_))
    }
}

/// One-shot feedback kinds (visual flash + sound)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CueKind {
    Success,
    Fail,
}

/// A cue currently showing on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCue {
    pub kind: CueKind,
    /// `None` for the fail cue, which stays up until the session closes
    pub ticks_left: Option<u32>,
}

/// Terminal result of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every question answered correctly
    Victory { score: u32 },
    /// Wrong door; carries the text the player should have picked
    GameOver { score: u32, correct_answer: String },
}

impl Outcome {
    pub fn score(&self) -> u32 {
        match self {
            Outcome::Victory { score } | Outcome::GameOver { score, .. } => *score,
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Victory { .. })
    }

    pub fn correct_answer(&self) -> Option<&str> {
        match self {
            Outcome::Victory { .. } => None,
            Outcome::GameOver { correct_answer, .. } => Some(correct_answer),
        }
    }
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A correct gate; carries the new total
    ScoreChanged(u32),
    /// Request a one-shot sound
    Cue(CueKind),
    /// Emitted exactly once per session
    Finished(Outcome),
}

/// Read-only copy of the engine after a completed tick
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub lane: Lane,
    pub state: SimulationState,
    pub obstacle: Option<Obstacle>,
    pub scenery: Vec<SceneryItem>,
    pub cue: Option<ActiveCue>,
    pub truck: TruckConfig,
}
