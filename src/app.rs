//! Host-facing game object
//!
//! Owns the session and the jukebox. The host drives two independent
//! recurring callbacks: [`App::game_frame`] from the display refresh and
//! [`App::music_frame`] from a faster timer. Cue requests raised inside a game
//! frame are played right away.

use crate::audio::{AudioBackend, Jukebox};
use crate::persistence::KeyValueStore;
use crate::session::{Screen, Session, SessionListener};
use crate::settings::Settings;
use crate::sim::{CueKind, LaneInput};

pub struct App<S: KeyValueStore, B: AudioBackend> {
    pub session: Session<S>,
    pub jukebox: Jukebox<B>,
}

/// Sends sounds to the jukebox and everything to the host's listener
struct Fanout<'a, B: AudioBackend> {
    jukebox: &'a mut Jukebox<B>,
    hud: &'a mut dyn SessionListener,
}

impl<B: AudioBackend> SessionListener for Fanout<'_, B> {
    fn on_score_update(&mut self, score: u32) {
        self.hud.on_score_update(score);
    }

    fn on_game_over(&mut self, score: u32, passed: bool, correct_answer: Option<&str>) {
        self.hud.on_game_over(score, passed, correct_answer);
    }

    fn on_play_sound(&mut self, kind: CueKind) {
        self.jukebox.play_cue(kind);
        self.hud.on_play_sound(kind);
    }
}

impl<S: KeyValueStore, B: AudioBackend> App<S, B> {
    pub fn new(session: Session<S>, jukebox: Jukebox<B>) -> Self {
        Self { session, jukebox }
    }

    /// One simulation step plus its sounds
    pub fn game_frame(&mut self, hud: &mut dyn SessionListener) {
        let mut fanout = Fanout {
            jukebox: &mut self.jukebox,
            hud,
        };
        self.session.tick(&mut fanout);
    }

    /// Keep the music look-ahead window full
    pub fn music_frame(&mut self) -> usize {
        self.jukebox.update(self.session.screen())
    }

    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    pub fn steer(&mut self, input: LaneInput) {
        self.session.steer(input);
    }

    /// First user gesture: browsers keep audio suspended until then
    pub fn unlock_audio(&mut self) {
        self.jukebox.unlock();
    }

    /// Apply new volume settings and persist them in the session's store
    pub fn apply_settings(&mut self, settings: Settings) {
        let settings = settings.sanitized();
        if let Err(e) = settings.save(self.session.store_mut()) {
            log::warn!("Could not persist settings: {}", e);
        }
        self.jukebox.set_settings(settings);
    }
}
