use quiz_runner::persistence::{KeyValueStore, MemoryStore};
use quiz_runner::sim::{
    CueKind, Engine, LaneInput, ObstaclePhase, Outcome, Sequencer, SimEvent, Verdict,
    speed_for_score,
};
use quiz_runner::{
    Category, HighScore, Question, QuestionSet, Screen, Session, SessionListener, TruckConfig,
    Tuning,
};

fn question(id: u32, correct_index: u8) -> Question {
    Question {
        id,
        category: Category::Service,
        text: format!("Question {id}"),
        answers: [0, 1, 2].map(|i| format!("q{id} answer {i}")),
        correct_index,
    }
}

fn bank(correct: &[u8]) -> QuestionSet {
    QuestionSet::new(
        correct
            .iter()
            .enumerate()
            .map(|(i, &c)| question(i as u32 + 1, c))
            .collect(),
    )
    .unwrap()
}

/// Drive an engine to its outcome. `pick` chooses the lane to hold for each
/// gate (by question id); `None` leaves the lane alone. Returns the lanes
/// observed at each judgement, the scores reported and the outcome.
fn drive(mut engine: Engine, pick: impl Fn(&Question) -> Option<i32>) -> (Vec<usize>, Vec<u32>, Outcome) {
    let mut judged_lanes = Vec::new();
    let mut scores = Vec::new();
    for _ in 0..200_000 {
        if let Some(lane) = engine
            .obstacle()
            .filter(|o| !o.is_resolved())
            .and_then(|o| pick(&o.question))
        {
            engine.steer(LaneInput::Set(lane));
        }

        let was_open = engine.obstacle().map(|o| !o.is_resolved()).unwrap_or(false);
        engine.tick();
        if was_open && engine.obstacle().map(|o| o.is_resolved()).unwrap_or(false) {
            judged_lanes.push(engine.lane().index());
        }

        for event in engine.drain_events() {
            match event {
                SimEvent::ScoreChanged(score) => scores.push(score),
                SimEvent::Finished(outcome) => return (judged_lanes, scores, outcome),
                SimEvent::Cue(_) => {}
            }
        }
    }
    panic!("run never finished");
}

#[test]
fn scenario_a_all_correct_is_victory() {
    let set = bank(&[1, 0, 2]);
    let engine = Engine::with_sequencer(
        Sequencer::in_order(set),
        Tuning::default(),
        TruckConfig::default(),
        7,
    );
    let (lanes, scores, outcome) = drive(engine, |q| Some(q.correct_index as i32));

    assert_eq!(lanes, vec![1, 0, 2]);
    assert_eq!(scores, vec![10, 20, 30]);
    assert_eq!(outcome, Outcome::Victory { score: 30 });
}

#[test]
fn scenario_b_staying_center_fails_second_gate() {
    let set = bank(&[1, 0, 2]);
    let engine = Engine::with_sequencer(
        Sequencer::in_order(set),
        Tuning::default(),
        TruckConfig::default(),
        7,
    );
    let (lanes, scores, outcome) = drive(engine, |_| None);

    assert_eq!(lanes, vec![1, 1]);
    assert_eq!(scores, vec![10]);
    assert_eq!(
        outcome,
        Outcome::GameOver {
            score: 10,
            correct_answer: "q2 answer 0".into()
        }
    );
}

#[test]
fn scenario_b_speed_recalculated_after_first_match() {
    let tuning = Tuning::default();
    let mut engine = Engine::with_sequencer(
        Sequencer::in_order(bank(&[1, 0, 2])),
        tuning.clone(),
        TruckConfig::default(),
        7,
    );
    while engine.state().score == 0 {
        engine.tick();
    }
    assert_eq!(engine.state().speed, speed_for_score(&tuning, 10));
    assert!(engine.state().speed > tuning.base_speed);
    assert_eq!(
        engine.obstacle().map(|o| o.phase),
        Some(ObstaclePhase::Resolved(Verdict::Match))
    );
}

#[test]
fn scenario_c_speed_formula() {
    let tuning = Tuning::default();
    assert!((speed_for_score(&tuning, 100) - 0.3).abs() < 1e-5);
    assert!((speed_for_score(&tuning, 500) - 0.7).abs() < 1e-5);
    assert_eq!(speed_for_score(&tuning, 2000), tuning.cap_speed);
    assert_eq!(tuning.cap_speed, 2.0);
}

#[test]
fn forced_order_is_respected() {
    let set = bank(&[0, 1, 2]);
    let seq = Sequencer::with_order(set, vec![2, 0, 1]).unwrap();
    let engine = Engine::with_sequencer(seq, Tuning::default(), TruckConfig::default(), 3);
    // Hold the left lane: question 3 (answer right) is drawn first and fails
    let (_, scores, outcome) = drive(engine, |_| Some(0));
    assert!(scores.is_empty());
    assert_eq!(outcome.correct_answer(), Some("q3 answer 2"));
}

#[test]
fn empty_or_malformed_bank_is_refused() {
    assert!(QuestionSet::new(Vec::new()).is_err());
    assert!(QuestionSet::new(vec![question(1, 3)]).is_err());
    assert!(QuestionSet::from_json("[]").is_err());
    assert!(QuestionSet::from_json("{ not json").is_err());
}

#[test]
fn bundled_question_bank_loads() {
    let set = QuestionSet::from_json(include_str!("../assets/questions.json")).unwrap();
    assert!(set.len() >= 3);
    assert!(set.iter().all(|q| q.correct_index <= 2));
}

#[derive(Default)]
struct Log {
    sounds: Vec<CueKind>,
    results: Vec<(u32, bool)>,
}

impl SessionListener for Log {
    fn on_game_over(&mut self, score: u32, passed: bool, _answer: Option<&str>) {
        self.results.push((score, passed));
    }

    fn on_play_sound(&mut self, kind: CueKind) {
        self.sounds.push(kind);
    }
}

fn play_session(session: &mut Session<MemoryStore>, log: &mut Log, correct: bool) {
    for _ in 0..200_000 {
        let target = session
            .engine()
            .and_then(|e| e.obstacle())
            .map(|o| o.question.correct_index as i32);
        if let Some(lane) = target {
            session.steer(LaneInput::Set(if correct { lane } else { (lane + 1) % 3 }));
        }
        session.tick(log);
        if session.screen() != Screen::Playing {
            return;
        }
    }
    panic!("session never ended");
}

#[test]
fn controller_full_cycle() {
    let mut session = Session::new(bank(&[1, 0, 2]), Tuning::default(), MemoryStore::new(), 21).unwrap();
    let mut log = Log::default();

    session.open_garage().unwrap();
    session.customize(|t| t.spoiler = true).unwrap();
    session.save_garage().unwrap();

    session.start().unwrap();
    play_session(&mut session, &mut log, true);
    assert_eq!(session.screen(), Screen::Victory);
    assert_eq!(log.results, vec![(30, true)]);
    assert_eq!(log.sounds, vec![CueKind::Success; 3]);
    assert_eq!(session.high_score(), 30);

    // Cosmetics are only editable in the garage
    assert!(session.customize(|t| t.neon = true).is_err());
    assert!(session.truck().spoiler);

    session.retry().unwrap();
    play_session(&mut session, &mut log, false);
    assert_eq!(session.screen(), Screen::GameOver);
    assert_eq!(log.results.last(), Some(&(0, false)));
    assert_eq!(session.high_score(), 30);

    session.back_to_menu().unwrap();
    assert_eq!(session.screen(), Screen::Menu);
}

#[test]
fn high_score_survives_sessions() {
    let mut first = Session::new(bank(&[2, 2]), Tuning::default(), MemoryStore::new(), 5).unwrap();
    first.start().unwrap();
    play_session(&mut first, &mut Log::default(), true);
    assert_eq!(first.high_score(), 20);

    let store = first.store().clone();
    assert_eq!(store.get(HighScore::STORAGE_KEY).as_deref(), Some("20"));

    let second = Session::new(bank(&[0]), Tuning::default(), store, 6).unwrap();
    assert_eq!(second.high_score(), 20);
}

#[test]
fn corrupt_high_score_starts_fresh() {
    let mut store = MemoryStore::new();
    store.set(HighScore::STORAGE_KEY, "lots").unwrap();
    let session = Session::new(bank(&[0]), Tuning::default(), store, 1).unwrap();
    assert_eq!(session.high_score(), 0);
}
