//! Quiz Runner entry point
//!
//! Web: wires the DOM, keyboard, LocalStorage and Web Audio to the game.
//! Native: runs a headless autopilot session and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

const QUESTIONS_JSON: &str = include_str!("../assets/questions.json");

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use quiz_runner::audio::{Jukebox, WebAudioBackend};
    use quiz_runner::consts::MUSIC_TIMER_MS;
    use quiz_runner::persistence::LocalStorage;
    use quiz_runner::platform::{AnimationLoop, Interval};
    use quiz_runner::sim::{CueKind, LaneInput};
    use quiz_runner::{App, QuestionSet, Screen, Session, SessionListener, Settings, Tuning};

    type WebApp = App<LocalStorage, WebAudioBackend>;

    /// Loops stay alive as long as the page does
    struct Loops {
        _game: AnimationLoop,
        _music: Interval,
    }

    thread_local! {
        static LOOPS: RefCell<Option<Loops>> = const { RefCell::new(None) };
    }

    /// Writes session callbacks into the page
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, selector: &str, text: &str) {
            if let Some(el) = self.document.query_selector(selector).ok().flatten() {
                el.set_text_content(Some(text));
            }
        }

        fn show(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }
    }

    impl SessionListener for DomHud {
        fn on_score_update(&mut self, score: u32) {
            self.set_text("#hud-score .hud-value", &score.to_string());
        }

        fn on_game_over(&mut self, score: u32, passed: bool, correct_answer: Option<&str>) {
            self.set_text("#final-score", &score.to_string());
            self.set_text(
                "#final-title",
                if passed { "All doors delivered!" } else { "Wrong door" },
            );
            self.set_text("#correct-answer", correct_answer.unwrap_or(""));
            self.show("correct-answer-row", correct_answer.is_some());
        }

        fn on_play_sound(&mut self, kind: CueKind) {
            let class = match kind {
                CueKind::Success => "flash success",
                CueKind::Fail => "flash fail",
            };
            if let Some(el) = self.document.get_element_by_id("flash") {
                let _ = el.set_attribute("class", class);
            }
        }
    }

    /// Per-frame view of the live run and which screen is showing
    fn render(app: &WebApp, hud: &DomHud) {
        let screen = app.screen();
        hud.show("menu", screen == Screen::Menu);
        hud.show("garage", screen == Screen::Customize);
        hud.show("hud", screen == Screen::Playing);
        hud.show("result", screen.is_terminal());
        hud.set_text("#hud-best .hud-value", &app.session.high_score().to_string());

        let Some(snapshot) = app.session.snapshot() else {
            return;
        };
        if let Some(el) = hud.document.get_element_by_id("truck") {
            let _ = el.set_attribute("data-lane", &snapshot.lane.index().to_string());
        }
        match &snapshot.obstacle {
            Some(gate) => {
                hud.set_text("#question", &gate.question.text);
                for (i, answer) in gate.question.answers.iter().enumerate() {
                    hud.set_text(&format!("#door-{i}"), answer);
                }
                if let Some(el) = hud.document.get_element_by_id("gate") {
                    let _ = el.set_attribute("data-progress", &format!("{:.1}", gate.progress));
                }
            }
            None => hud.set_text("#question", ""),
        }
        if snapshot.cue.is_none() {
            hud.show("flash", false);
        }
    }

    fn on_key(app: &mut WebApp, key: &str) {
        app.unlock_audio();
        let screen = app.screen();
        let result = match (screen, key) {
            (Screen::Playing, "ArrowLeft" | "a") => {
                app.steer(LaneInput::Left);
                Ok(())
            }
            (Screen::Playing, "ArrowRight" | "d") => {
                app.steer(LaneInput::Right);
                Ok(())
            }
            (Screen::Playing, "Escape") => app.session.abandon(),
            (Screen::Menu, "Enter" | " ") => app.session.start(),
            (Screen::Menu, "g") => app.session.open_garage(),
            (Screen::Customize, "c") => app.session.customize(|t| t.color = t.color.next()),
            (Screen::Customize, "s") => app.session.customize(|t| t.toggle_stripe()),
            (Screen::Customize, "n") => app.session.customize(|t| t.neon = !t.neon),
            (Screen::Customize, "Enter" | "Escape") => app.session.save_garage(),
            (Screen::GameOver | Screen::Victory, "Enter" | " ") => app.session.retry(),
            (Screen::GameOver | Screen::Victory, "Escape") => app.session.back_to_menu(),
            (_, "m") => {
                let mut settings = app.jukebox.settings().clone();
                settings.muted = !settings.muted;
                app.apply_settings(settings);
                Ok(())
            }
            _ => Ok(()),
        };
        if let Err(e) = result {
            log::debug!("Key {:?} ignored: {}", key, e);
        }
    }

    fn setup_input_handlers(app: Rc<RefCell<WebApp>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            on_key(&mut app.borrow_mut(), event.key().as_str());
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Quiz Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let questions = QuestionSet::from_json(super::QUESTIONS_JSON)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let store = LocalStorage::open();
        let settings = Settings::load(&store);
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(questions, Tuning::default(), store, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let jukebox = Jukebox::new(WebAudioBackend::new(), settings);
        let app = Rc::new(RefCell::new(App::new(session, jukebox)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(app.clone())?;

        let game = {
            let app = app.clone();
            let mut hud = DomHud {
                document: document.clone(),
            };
            AnimationLoop::start(move |_time| {
                let mut app = app.borrow_mut();
                app.game_frame(&mut hud);
                render(&app, &hud);
            })
        }
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let music = Interval::start(MUSIC_TIMER_MS, move || {
            app.borrow_mut().music_frame();
        })
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        LOOPS.with(|loops| {
            *loops.borrow_mut() = Some(Loops {
                _game: game,
                _music: music,
            })
        });

        log::info!("Quiz Runner running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Quiz Runner (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let accuracy = std::env::args()
        .nth(1)
        .and_then(|a| a.parse::<f64>().ok())
        .unwrap_or(0.9);

    match native::run(accuracy, native::MAX_FRAMES) {
        Ok(result) => {
            println!(
                "{} with {} points{}",
                if result.passed { "Victory" } else { "Game over" },
                result.score,
                if result.new_high_score { " (new best)" } else { "" }
            );
            if let Some(answer) = result.correct_answer {
                println!("Correct answer was: {answer}");
            }
        }
        Err(e) => {
            log::error!("Demo failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use rand::Rng;

    use quiz_runner::audio::{Jukebox, OfflineBackend};
    use quiz_runner::consts::NOMINAL_TICK_HZ;
    use quiz_runner::persistence::MemoryStore;
    use quiz_runner::sim::{Autopilot, CueKind};
    use quiz_runner::{
        App, QuestionSet, QuizError, Result, Session, SessionListener, SessionResult, Settings,
        Tuning,
    };

    /// Bail out of a run that somehow never ends
    pub const MAX_FRAMES: u32 = 1_000_000;

    struct LogHud;

    impl SessionListener for LogHud {
        fn on_score_update(&mut self, score: u32) {
            log::info!("Score: {}", score);
        }

        fn on_play_sound(&mut self, kind: CueKind) {
            log::debug!("Cue: {:?}", kind);
        }
    }

    pub fn run(accuracy: f64, max_frames: u32) -> Result<SessionResult> {
        let questions = QuestionSet::from_json(super::QUESTIONS_JSON)?;
        let seed: u64 = rand::rng().random();
        log::info!("Seed {} with pilot accuracy {:.2}", seed, accuracy);

        let session = Session::new(questions, Tuning::default(), MemoryStore::new(), seed)?;
        let jukebox = Jukebox::new(OfflineBackend::new(), Settings::default());
        let mut app = App::new(session, jukebox);
        let mut pilot = Autopilot::new(accuracy, seed);
        let frame = 1.0 / NOMINAL_TICK_HZ as f64;

        app.session.start()?;
        for _ in 0..max_frames {
            let input = app.session.engine().and_then(|engine| pilot.steer(engine));
            if let Some(input) = input {
                app.steer(input);
            }
            app.game_frame(&mut LogHud);
            app.music_frame();
            app.jukebox.backend_mut().advance(frame);

            if let Some(result) = app.session.last_result() {
                log::info!(
                    "{} voices scheduled",
                    app.jukebox.backend().tones().len()
                );
                return Ok(result.clone());
            }
        }
        log::warn!(
            "Demo still on {:?} after {} frames (score {})",
            app.screen(),
            max_frames,
            app.session.score()
        );
        Err(QuizError::RunStalled { frames: max_frames })
    }

}
