//! Quiz Runner - a three-lane driving quiz
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gates, lanes, scoring, scenery)
//! - `session`: Screen flow and high-score bookkeeping
//! - `audio`: Look-ahead music and one-shot cues over a pluggable backend
//! - `content`: Question bank shape and validation
//! - `cosmetics`: Truck customization (never affects gameplay)
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `platform`: Browser frame and timer callbacks
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod audio;
pub mod content;
pub mod cosmetics;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::App;
pub use content::{Category, Question, QuestionSet};
pub use cosmetics::TruckConfig;
pub use error::{QuizError, Result};
pub use highscores::HighScore;
pub use session::{Screen, Session, SessionListener, SessionResult};
pub use settings::{CursorPolicy, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Lanes on the road: left, center, right
    pub const LANE_COUNT: usize = 3;
    /// Nominal display refresh the tuning values were balanced for
    pub const NOMINAL_TICK_HZ: u32 = 60;
    /// Music timer period (well inside the look-ahead window)
    pub const MUSIC_TIMER_MS: i32 = 25;
}
