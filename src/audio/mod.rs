//! Procedural audio - no external files needed!
//!
//! Two independent producers share one backend:
//! - [`MusicScheduler`]: background loop scheduled ahead of the device clock
//! - [`sfx`]: one-shot success/fail cues fired at the device's current time
//!
//! Every sound is a single oscillator voice with a gain envelope, described as
//! a [`Tone`] and handed to an [`AudioBackend`] that owns the real device.

pub mod music;
pub mod sfx;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use music::{AudioCursor, MusicScheduler, Track, TrackId};
#[cfg(target_arch = "wasm32")]
pub use web::WebAudioBackend;

use crate::session::Screen;
use crate::settings::Settings;
use crate::sim::CueKind;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One automation point on an audio parameter (times on the device clock)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ramp {
    /// Jump to `value` at `at`
    Set { value: f32, at: f64 },
    /// Linear glide from the previous point, reaching `value` at `at`
    Linear { value: f32, at: f64 },
    /// Exponential glide from the previous point; `value` must be positive
    Exponential { value: f32, at: f64 },
}

impl Ramp {
    pub fn at(&self) -> f64 {
        match *self {
            Ramp::Set { at, .. } | Ramp::Linear { at, .. } | Ramp::Exponential { at, .. } => at,
        }
    }

    pub fn value(&self) -> f32 {
        match *self {
            Ramp::Set { value, .. } | Ramp::Linear { value, .. } | Ramp::Exponential { value, .. } => {
                value
            }
        }
    }
}

/// A fully scheduled voice: starts, glides and stops on its own
#[derive(Debug, Clone, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub start: f64,
    pub stop: f64,
    pub frequency: Vec<Ramp>,
    pub gain: Vec<Ramp>,
}

impl Tone {
    /// Frequency at note-on
    pub fn initial_frequency(&self) -> f32 {
        self.frequency.first().map(Ramp::value).unwrap_or(0.0)
    }

    /// Loudest point of the envelope
    pub fn peak_gain(&self) -> f32 {
        self.gain.iter().map(Ramp::value).fold(0.0, f32::max)
    }
}

/// The host's synthesis primitive and clock
pub trait AudioBackend {
    /// Device clock in seconds; `None` while the device is missing or suspended
    fn current_time(&self) -> Option<f64>;

    /// Ask a suspended device to start (browsers need a user gesture first)
    fn resume(&mut self) {}

    /// Create, schedule and release one voice. Nodes are not pooled.
    fn play(&mut self, tone: &Tone);
}

/// Backend with a hand-driven clock that records every voice
///
/// Used for tests and the headless native build.
#[derive(Debug, Clone)]
pub struct OfflineBackend {
    now: f64,
    available: bool,
    tones: Vec<Tone>,
}

impl Default for OfflineBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OfflineBackend {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            available: true,
            tones: Vec::new(),
        }
    }

    /// A device that never comes up
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn advance(&mut self, secs: f64) {
        self.now += secs.max(0.0);
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }

    pub fn take_tones(&mut self) -> Vec<Tone> {
        std::mem::take(&mut self.tones)
    }
}

impl AudioBackend for OfflineBackend {
    fn current_time(&self) -> Option<f64> {
        self.available.then_some(self.now)
    }

    fn resume(&mut self) {}

    fn play(&mut self, tone: &Tone) {
        self.tones.push(tone.clone());
    }
}

/// Audio front end: background music plus cues, honoring volume settings
pub struct Jukebox<B: AudioBackend> {
    backend: B,
    settings: Settings,
    music: MusicScheduler,
}

impl<B: AudioBackend> Jukebox<B> {
    pub fn new(backend: B, settings: Settings) -> Self {
        let settings = settings.sanitized();
        let music = MusicScheduler::new(settings.cursor_policy, settings.lookahead_secs);
        Self {
            backend,
            settings,
            music,
        }
    }

    /// Music loop body; call from its own recurring callback.
    /// Returns the number of voices scheduled.
    pub fn update(&mut self, screen: Screen) -> usize {
        let gain = self.settings.music_gain();
        self.music
            .fill(&mut self.backend, TrackId::for_screen(screen), gain)
    }

    /// Fire-and-forget cue at the device's current time
    pub fn play_cue(&mut self, kind: CueKind) {
        let gain = self.settings.sfx_gain();
        if gain <= 0.0 {
            return;
        }
        self.backend.resume();
        let Some(now) = self.backend.current_time() else {
            return;
        };
        self.backend.play(&sfx::cue_tone(kind, now, gain));
    }

    /// Resume the device after a user gesture
    pub fn unlock(&mut self) {
        self.backend.resume();
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Volume changes apply from the next note; the cursor keeps its place
    pub fn set_settings(&mut self, settings: Settings) {
        let settings = settings.sanitized();
        self.music
            .configure(settings.cursor_policy, settings.lookahead_secs);
        self.settings = settings;
    }

    pub fn cursor(&self) -> AudioCursor {
        self.music.cursor()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
