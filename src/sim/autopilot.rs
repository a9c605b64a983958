//! Idle/demo mode: steers the truck like a keyboard player would
//!
//! Picks a door once per gate (right with probability `accuracy`) and walks
//! there one lane per tick.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::lane::{Lane, LaneInput};
use super::tick::Engine;

#[derive(Debug, Clone)]
pub struct Autopilot {
    accuracy: f64,
    rng: Pcg32,
    /// Gate id the current target was picked for
    decided_for: Option<u32>,
    target: Lane,
}

impl Autopilot {
    pub fn new(accuracy: f64, seed: u64) -> Self {
        Self {
            accuracy: accuracy.clamp(0.0, 1.0),
            rng: Pcg32::seed_from_u64(seed),
            decided_for: None,
            target: Lane::CENTER,
        }
    }

    /// Steering for this tick, if any
    pub fn steer(&mut self, engine: &Engine) -> Option<LaneInput> {
        let obstacle = engine.obstacle().filter(|o| !o.is_resolved())?;

        if self.decided_for != Some(obstacle.id) {
            let correct = obstacle.question.correct_lane();
            self.target = if self.rng.random_bool(self.accuracy) {
                correct
            } else {
                let shift = self.rng.random_range(1..3);
                Lane::new(((correct.index() + shift) % 3) as i32)
            };
            self.decided_for = Some(obstacle.id);
        }

        match self.target.cmp(&engine.lane()) {
            std::cmp::Ordering::Less => Some(LaneInput::Left),
            std::cmp::Ordering::Greater => Some(LaneInput::Right),
            std::cmp::Ordering::Equal => None,
        }
    }
}
