//! Screen flow and session lifecycle
//!
//! ```text
//! MENU --start--> PLAYING --victory--> VICTORY --retry--> PLAYING
//!  |  ^             |   \--mismatch--> GAME_OVER --retry--> PLAYING
//!  |  |save         |abandon               \--menu--> MENU
//!  v  |             v
//! CUSTOMIZE        MENU
//! ```
//!
//! Entering PLAYING builds a fresh [`Engine`] (new question order, score 0).
//! Leaving PLAYING drops it, which is what stops scoring and spawning.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::content::QuestionSet;
use crate::cosmetics::TruckConfig;
use crate::error::{QuizError, Result};
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::sim::{CueKind, Engine, LaneInput, Outcome, SimEvent, Snapshot};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Menu,
    Customize,
    Playing,
    GameOver,
    Victory,
}

impl Screen {
    pub fn is_terminal(self) -> bool {
        matches!(self, Screen::GameOver | Screen::Victory)
    }
}

/// Hooks for the score display, result screen and sound
pub trait SessionListener {
    /// Every correct gate
    fn on_score_update(&mut self, _score: u32) {}

    /// Exactly once per session
    fn on_game_over(&mut self, _score: u32, _passed: bool, _correct_answer: Option<&str>) {}

    fn on_play_sound(&mut self, _kind: CueKind) {}
}

impl SessionListener for () {}

/// What the result screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    pub score: u32,
    pub passed: bool,
    /// The answer the player missed (game over only)
    pub correct_answer: Option<String>,
    pub new_high_score: bool,
}

pub struct Session<S: KeyValueStore> {
    screen: Screen,
    questions: QuestionSet,
    tuning: Tuning,
    truck: TruckConfig,
    engine: Option<Engine>,
    score: u32,
    high_score: HighScore,
    store: S,
    seeds: Pcg32,
    last_result: Option<SessionResult>,
}

impl<S: KeyValueStore> Session<S> {
    /// Validates the tuning and loads the stored high score. The question set
    /// is already validated, so a session can always enter PLAYING.
    pub fn new(questions: QuestionSet, tuning: Tuning, store: S, seed: u64) -> Result<Self> {
        tuning.validate()?;
        let high_score = HighScore::load(&store);
        Ok(Self {
            screen: Screen::Menu,
            questions,
            tuning,
            truck: TruckConfig::default(),
            engine: None,
            score: 0,
            high_score,
            store,
            seeds: Pcg32::seed_from_u64(seed),
            last_result: None,
        })
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Score of the current (or last) run
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn last_result(&self) -> Option<&SessionResult> {
        self.last_result.as_ref()
    }

    pub fn truck(&self) -> &TruckConfig {
        &self.truck
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// The live engine, only while PLAYING
    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    /// Render view of the live run
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.engine.as_ref().map(Engine::snapshot)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The session's own store, for preferences saved alongside the high score
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// MENU -> PLAYING
    pub fn start(&mut self) -> Result<()> {
        self.require(&[Screen::Menu], "start")?;
        self.enter_playing();
        Ok(())
    }

    /// GAME_OVER | VICTORY -> PLAYING with a fresh run
    pub fn retry(&mut self) -> Result<()> {
        self.require(&[Screen::GameOver, Screen::Victory], "retry")?;
        self.enter_playing();
        Ok(())
    }

    /// MENU -> CUSTOMIZE
    pub fn open_garage(&mut self) -> Result<()> {
        self.require(&[Screen::Menu], "open the garage")?;
        self.screen = Screen::Customize;
        Ok(())
    }

    /// Edit the truck; only allowed in the garage
    pub fn customize(&mut self, edit: impl FnOnce(&mut TruckConfig)) -> Result<()> {
        self.require(&[Screen::Customize], "customize")?;
        edit(&mut self.truck);
        Ok(())
    }

    /// CUSTOMIZE -> MENU
    pub fn save_garage(&mut self) -> Result<()> {
        self.require(&[Screen::Customize], "save the garage")?;
        self.screen = Screen::Menu;
        Ok(())
    }

    /// GAME_OVER | VICTORY -> MENU
    pub fn back_to_menu(&mut self) -> Result<()> {
        self.require(&[Screen::GameOver, Screen::Victory], "return to menu")?;
        self.screen = Screen::Menu;
        Ok(())
    }

    /// PLAYING -> MENU without an outcome (the game view went away)
    pub fn abandon(&mut self) -> Result<()> {
        self.require(&[Screen::Playing], "abandon")?;
        log::info!("Run abandoned at {} points", self.score);
        self.engine = None;
        self.screen = Screen::Menu;
        Ok(())
    }

    /// Lane input; ignored outside PLAYING
    pub fn steer(&mut self, input: LaneInput) {
        if let Some(engine) = self.engine.as_mut() {
            engine.steer(input);
        }
    }

    /// Game loop body: advance the engine one step and relay what happened
    pub fn tick(&mut self, listener: &mut dyn SessionListener) {
        let events = match self.engine.as_mut() {
            Some(engine) => {
                engine.tick();
                engine.drain_events()
            }
            None => return,
        };

        for event in events {
            match event {
                SimEvent::ScoreChanged(score) => {
                    self.score = score;
                    listener.on_score_update(score);
                }
                SimEvent::Cue(kind) => listener.on_play_sound(kind),
                SimEvent::Finished(outcome) => self.conclude(outcome, listener),
            }
        }
    }

    fn enter_playing(&mut self) {
        let seed: u64 = self.seeds.random();
        log::info!(
            "Starting run with {} questions (seed {})",
            self.questions.len(),
            seed
        );
        self.engine = Some(Engine::start(
            self.questions.clone(),
            self.tuning.clone(),
            self.truck.clone(),
            seed,
        ));
        self.score = 0;
        self.last_result = None;
        self.screen = Screen::Playing;
    }

    fn conclude(&mut self, outcome: Outcome, listener: &mut dyn SessionListener) {
        let score = outcome.score();
        let passed = outcome.passed();

        let new_high_score = self.high_score.submit(score);
        if new_high_score {
            if let Err(e) = self.high_score.save(&mut self.store) {
                log::warn!("Could not persist high score: {}", e);
            }
        }

        self.engine = None;
        self.score = score;
        self.screen = if passed {
            Screen::Victory
        } else {
            Screen::GameOver
        };
        self.last_result = Some(SessionResult {
            score,
            passed,
            correct_answer: outcome.correct_answer().map(str::to_owned),
            new_high_score,
        });

        listener.on_game_over(score, passed, outcome.correct_answer());
    }

    fn require(&self, allowed: &[Screen], action: &'static str) -> Result<()> {
        if allowed.contains(&self.screen) {
            Ok(())
        } else {
            Err(QuizError::InvalidTransition {
                from: self.screen,
                action,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::question;
    use crate::persistence::MemoryStore;

    fn session() -> Session<MemoryStore> {
        let set = QuestionSet::new(vec![question(1, 1), question(2, 0)]).unwrap();
        Session::new(set, Tuning::default(), MemoryStore::new(), 4).unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        scores: Vec<u32>,
        sounds: Vec<CueKind>,
        endings: Vec<(u32, bool, Option<String>)>,
    }

    impl SessionListener for Recorder {
        fn on_score_update(&mut self, score: u32) {
            self.scores.push(score);
        }

        fn on_game_over(&mut self, score: u32, passed: bool, correct_answer: Option<&str>) {
            self.endings
                .push((score, passed, correct_answer.map(str::to_owned)));
        }

        fn on_play_sound(&mut self, kind: CueKind) {
            self.sounds.push(kind);
        }
    }

    fn play_out(session: &mut Session<MemoryStore>, recorder: &mut Recorder, correct: bool) {
        for _ in 0..100_000 {
            let target = session
                .engine()
                .and_then(|e| e.obstacle())
                .map(|o| o.question.correct_index as i32);
            if let Some(lane) = target {
                let lane = if correct { lane } else { (lane + 1) % 3 };
                session.steer(LaneInput::Set(lane));
            }
            session.tick(recorder);
            if session.screen() != Screen::Playing {
                return;
            }
        }
        panic!("session never ended");
    }

    #[test]
    fn test_menu_transitions() {
        let mut s = session();
        assert_eq!(s.screen(), Screen::Menu);
        assert!(s.retry().is_err());
        assert!(s.back_to_menu().is_err());
        assert!(s.customize(|t| t.neon = true).is_err());

        s.open_garage().unwrap();
        s.customize(|t| t.neon = true).unwrap();
        assert!(s.start().is_err());
        s.save_garage().unwrap();
        assert_eq!(s.screen(), Screen::Menu);
        assert!(s.truck().neon);

        s.start().unwrap();
        assert_eq!(s.screen(), Screen::Playing);
        assert!(s.engine().is_some());
        assert!(s.start().is_err());
    }

    #[test]
    fn test_victory_flow_records_high_score() {
        let mut s = session();
        let mut rec = Recorder::default();
        s.start().unwrap();
        play_out(&mut s, &mut rec, true);

        assert_eq!(s.screen(), Screen::Victory);
        assert!(s.engine().is_none());
        assert_eq!(rec.scores, vec![10, 20]);
        assert_eq!(rec.sounds, vec![CueKind::Success, CueKind::Success]);
        assert_eq!(rec.endings, vec![(20, true, None)]);
        assert_eq!(s.high_score(), 20);
        assert_eq!(
            s.store().get(HighScore::STORAGE_KEY).as_deref(),
            Some("20")
        );
        assert!(s.last_result().unwrap().new_high_score);
    }

    #[test]
    fn test_game_over_flow_and_retry() {
        let mut s = session();
        let mut rec = Recorder::default();
        s.start().unwrap();
        play_out(&mut s, &mut rec, false);

        assert_eq!(s.screen(), Screen::GameOver);
        assert_eq!(rec.sounds, vec![CueKind::Fail]);
        assert_eq!(rec.endings.len(), 1);
        let (score, passed, answer) = &rec.endings[0];
        assert_eq!((*score, *passed), (0, false));
        assert!(answer.is_some());
        assert!(!s.last_result().unwrap().new_high_score);

        s.retry().unwrap();
        assert_eq!(s.screen(), Screen::Playing);
        assert_eq!(s.score(), 0);
        assert_eq!(s.engine().unwrap().state().score, 0);
    }

    #[test]
    fn test_abandon_cancels_engine() {
        let mut s = session();
        s.start().unwrap();
        for _ in 0..50 {
            s.tick(&mut ());
        }
        s.abandon().unwrap();
        assert_eq!(s.screen(), Screen::Menu);
        assert!(s.engine().is_none());
        // No engine, nothing happens
        let mut rec = Recorder::default();
        s.tick(&mut rec);
        assert!(rec.endings.is_empty());
    }

    #[test]
    fn test_high_score_loaded_from_store() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "90").unwrap();
        let set = QuestionSet::new(vec![question(1, 1)]).unwrap();
        let s = Session::new(set, Tuning::default(), store, 1).unwrap();
        assert_eq!(s.high_score(), 90);
    }

    #[test]
    fn test_invalid_tuning_refused() {
        let set = QuestionSet::new(vec![question(1, 1)]).unwrap();
        let tuning = Tuning {
            base_speed: 0.0,
            ..Default::default()
        };
        assert!(Session::new(set, tuning, MemoryStore::new(), 1).is_err());
    }
}
