//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per host callback
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod lane;
pub mod scenery;
pub mod sequencer;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use lane::{Lane, LaneInput};
pub use scenery::{HouseColor, RoadSide, Scenery, SceneryItem, SceneryKind};
pub use sequencer::{Draw, Sequencer};
pub use state::{
    ActiveCue, CueKind, Obstacle, ObstaclePhase, Outcome, SimEvent, SimulationState, Snapshot,
    Verdict,
};
pub use tick::{Engine, speed_for_score};
