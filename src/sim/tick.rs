//! Per-callback simulation step
//!
//! One call to [`Engine::tick`] is one logical step, no matter how much wall
//! time passed since the last call. The host drives it from its display
//! callback, so the road scrolls at the display's refresh rate.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::lane::{Lane, LaneInput};
use super::scenery::Scenery;
use super::sequencer::{Draw, Sequencer};
use super::state::{
    ActiveCue, CueKind, Obstacle, ObstaclePhase, Outcome, SimEvent, SimulationState, Snapshot,
    Verdict,
};
use crate::content::{Question, QuestionSet};
use crate::cosmetics::TruckConfig;
use crate::tuning::Tuning;

/// RNG stream for the prop spawner; the question order has its own
const SCENERY_STREAM: u64 = 0x5ce2e;

/// Road speed for a cumulative score
pub fn speed_for_score(tuning: &Tuning, score: u32) -> f32 {
    (tuning.base_speed + score as f32 * tuning.scale_factor).min(tuning.cap_speed)
}

/// A mismatch waiting for its cue to finish before being reported
#[derive(Debug, Clone)]
struct PendingReport {
    ticks_left: u32,
    outcome: Outcome,
}

/// The session's simulation: gate, lane, score, speed and props
#[derive(Debug, Clone)]
pub struct Engine {
    tuning: Tuning,
    truck: TruckConfig,
    sequencer: Sequencer,
    scenery: Scenery,
    state: SimulationState,
    lane: Lane,
    obstacle: Option<Obstacle>,
    cue: Option<ActiveCue>,
    pending: Option<PendingReport>,
    finished: bool,
    next_id: u32,
    events: Vec<SimEvent>,
}

impl Engine {
    /// Fresh session over a shuffled bank; the same seed replays the same run
    pub fn start(questions: QuestionSet, tuning: Tuning, truck: TruckConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let sequencer = Sequencer::shuffled(questions, &mut rng);
        Self::with_sequencer(sequencer, tuning, truck, seed)
    }

    /// Fresh session over a caller-built question order
    pub fn with_sequencer(
        sequencer: Sequencer,
        tuning: Tuning,
        truck: TruckConfig,
        seed: u64,
    ) -> Self {
        let scenery = Scenery::new(tuning.scenery.clone(), Pcg32::new(seed, SCENERY_STREAM));
        Self {
            state: SimulationState::new(tuning.base_speed),
            tuning,
            truck,
            sequencer,
            scenery,
            lane: Lane::default(),
            obstacle: None,
            cue: None,
            pending: None,
            finished: false,
            next_id: 1,
            events: Vec::new(),
        }
    }

    /// Advance one step
    pub fn tick(&mut self) {
        if self.finished {
            return;
        }
        if self.state.session_over {
            self.count_down_report();
            return;
        }

        self.state.frame_count += 1;
        self.decay_cue();

        if self.obstacle.is_some() {
            self.advance_obstacle();
        } else if !self.spawn_obstacle() {
            return;
        }

        self.scenery.tick(self.state.frame_count, self.state.speed);
    }

    /// Apply a steering command; ignored once the run is over
    pub fn steer(&mut self, input: LaneInput) {
        if self.state.session_over {
            return;
        }
        self.lane = input.apply(self.lane);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lane: self.lane,
            state: self.state.clone(),
            obstacle: self.obstacle.clone(),
            scenery: self.scenery.items().to_vec(),
            cue: self.cue,
            truck: self.truck.clone(),
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    pub fn obstacle(&self) -> Option<&Obstacle> {
        self.obstacle.as_ref()
    }

    pub fn scenery(&self) -> &Scenery {
        &self.scenery
    }

    pub fn cue(&self) -> Option<ActiveCue> {
        self.cue
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// True once the outcome has been reported
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns false when the bank is exhausted and the run ended in victory
    fn spawn_obstacle(&mut self) -> bool {
        let question = match self.sequencer.next() {
            Draw::Next(question) => question.clone(),
            Draw::Exhausted => {
                self.state.session_over = true;
                self.finish(Outcome::Victory {
                    score: self.state.score,
                });
                return false;
            }
        };

        let id = self.next_id;
        self.next_id += 1;
        log::debug!(
            "Gate {} spawned with question {} ({} left)",
            id,
            question.id,
            self.sequencer.remaining()
        );
        self.obstacle = Some(Obstacle::new(id, self.tuning.spawn_progress, question));
        true
    }

    fn advance_obstacle(&mut self) {
        let Some(mut obstacle) = self.obstacle.take() else {
            return;
        };

        let previous = obstacle.progress;
        obstacle.progress += self.state.speed;
        if obstacle.phase == ObstaclePhase::Spawning {
            obstacle.phase = ObstaclePhase::Approaching;
        }

        // Entering [line, line + speed) this tick is the same as crossing the
        // line this tick, so each gate is judged on exactly one tick
        let line = self.tuning.collision_line;
        if !obstacle.is_resolved() && previous < line && obstacle.progress >= line {
            let verdict = self.judge(&obstacle.question);
            log::debug!(
                "Gate {} judged {:?} (lane {}, answer {})",
                obstacle.id,
                verdict,
                self.lane.index(),
                obstacle.question.correct_index
            );
            obstacle.phase = ObstaclePhase::Resolved(verdict);
        }

        if obstacle.progress > self.tuning.cleanup_progress {
            if !obstacle.is_resolved() {
                log::warn!("Gate {} left the road without being judged", obstacle.id);
            }
            debug_assert!(obstacle.is_resolved(), "gate skipped the judged line");
            return;
        }

        self.obstacle = Some(obstacle);
    }

    fn judge(&mut self, question: &Question) -> Verdict {
        if self.lane == question.correct_lane() {
            let before = self.state.speed;
            self.state.score += self.tuning.points_per_gate;
            self.state.speed = speed_for_score(&self.tuning, self.state.score);
            debug_assert!(self.state.speed >= before, "speed must not decrease");

            self.cue = Some(ActiveCue {
                kind: CueKind::Success,
                ticks_left: Some(self.tuning.success_cue_ticks),
            });
            self.events.push(SimEvent::Cue(CueKind::Success));
            self.events.push(SimEvent::ScoreChanged(self.state.score));
            Verdict::Match
        } else {
            self.state.session_over = true;
            self.cue = Some(ActiveCue {
                kind: CueKind::Fail,
                ticks_left: None,
            });
            self.events.push(SimEvent::Cue(CueKind::Fail));

            let outcome = Outcome::GameOver {
                score: self.state.score,
                correct_answer: question.correct_answer().to_owned(),
            };
            if self.tuning.fail_report_delay_ticks == 0 {
                self.finish(outcome);
            } else {
                self.pending = Some(PendingReport {
                    ticks_left: self.tuning.fail_report_delay_ticks,
                    outcome,
                });
            }
            Verdict::Mismatch
        }
    }

    fn count_down_report(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        pending.ticks_left = pending.ticks_left.saturating_sub(1);
        if pending.ticks_left == 0 {
            if let Some(pending) = self.pending.take() {
                self.finish(pending.outcome);
            }
        }
    }

    fn decay_cue(&mut self) {
        if let Some(ActiveCue {
            ticks_left: Some(ticks),
            ..
        }) = self.cue.as_mut()
        {
            *ticks = ticks.saturating_sub(1);
            if *ticks == 0 {
                self.cue = None;
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        debug_assert!(!self.finished, "outcome reported twice");
        log::info!(
            "Run finished: {} with {} points",
            if outcome.passed() { "victory" } else { "game over" },
            outcome.score()
        );
        self.finished = true;
        self.events.push(SimEvent::Finished(outcome));
    }
}
