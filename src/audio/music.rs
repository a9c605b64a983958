//! Look-ahead background music
//!
//! The host calls [`MusicScheduler::fill`] from a recurring callback whose
//! timing jitters. Instead of playing notes "now", every call schedules all
//! notes that start before `now + lookahead` at their exact grid time on the
//! device clock. As long as the next call arrives within the look-ahead
//! window, no note is late or dropped.

use super::{AudioBackend, Ramp, Tone, Waveform};
use crate::session::Screen;
use crate::settings::{CursorPolicy, DEFAULT_LOOKAHEAD_SECS, lookahead_is_valid};

/// Gain floor for the exponential release (must stay above zero)
const RELEASE_FLOOR: f32 = 0.001;
/// The release lands this long before the next note starts
const RELEASE_GAP: f64 = 0.02;

/// A looped pitch sequence; `0.0` entries are rests
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub sequence: &'static [f32],
    /// Seconds per step
    pub step_secs: f64,
    pub waveform: Waveform,
    pub volume: f32,
}

impl Track {
    /// The voice for one note starting at `at`
    pub fn note(&self, frequency: f32, at: f64, gain: f32) -> Tone {
        let peak = self.volume * gain;
        // The release has to fall, even for voices quieter than the floor
        let floor = RELEASE_FLOOR.min(peak * 0.5);
        Tone {
            waveform: self.waveform,
            start: at,
            stop: at + self.step_secs,
            frequency: vec![Ramp::Set {
                value: frequency,
                at,
            }],
            gain: vec![
                Ramp::Set { value: peak, at },
                Ramp::Exponential {
                    value: floor,
                    at: at + self.step_secs - RELEASE_GAP,
                },
            ],
        }
    }

    fn pitch_at(&self, note_index: u64) -> f32 {
        if self.sequence.is_empty() {
            return 0.0;
        }
        self.sequence[(note_index % self.sequence.len() as u64) as usize]
    }
}

/// Menu / garage: C major 7 arpeggio, relaxed
static LOUNGE: Track = Track {
    sequence: &[
        261.63, 0.0, 329.63, 0.0, 392.00, 0.0, 493.88, 0.0, 392.00, 0.0, 329.63, 0.0, 261.63, 0.0,
        196.00, 0.0,
    ],
    step_secs: 0.18,
    waveform: Waveform::Triangle,
    volume: 0.05,
};

/// Playing: driving E minor bass
static DRIVE: Track = Track {
    sequence: &[82.41, 82.41, 164.81, 82.41, 98.00, 98.00, 196.00, 98.00],
    step_secs: 0.13,
    waveform: Waveform::Square,
    volume: 0.03,
};

/// Game over: slow chromatic descent
static LAMENT: Track = Track {
    sequence: &[110.00, 103.83, 98.00, 92.50],
    step_secs: 0.5,
    waveform: Waveform::Sawtooth,
    volume: 0.05,
};

/// Victory: bright major arpeggio
static FANFARE: Track = Track {
    sequence: &[261.63, 329.63, 392.00, 523.25, 0.0, 523.25, 0.0],
    step_secs: 0.15,
    waveform: Waveform::Sine,
    volume: 0.1,
};

/// Which loop plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackId {
    Lounge,
    Drive,
    Lament,
    Fanfare,
}

impl TrackId {
    pub fn for_screen(screen: Screen) -> Self {
        match screen {
            Screen::Menu | Screen::Customize => TrackId::Lounge,
            Screen::Playing => TrackId::Drive,
            Screen::GameOver => TrackId::Lament,
            Screen::Victory => TrackId::Fanfare,
        }
    }

    pub fn track(self) -> &'static Track {
        match self {
            TrackId::Lounge => &LOUNGE,
            TrackId::Drive => &DRIVE,
            TrackId::Lament => &LAMENT,
            TrackId::Fanfare => &FANFARE,
        }
    }
}

/// A zero window never schedules anything and a huge one anchors the first
/// note far in the future, so both fall back to the default
fn usable_window(lookahead: f64) -> f64 {
    if lookahead_is_valid(lookahead) {
        lookahead
    } else {
        log::warn!("Ignoring music look-ahead of {} s", lookahead);
        DEFAULT_LOOKAHEAD_SECS
    }
}

/// Where the music is on the device clock
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AudioCursor {
    /// Device time the next note starts at
    pub next_note_time: f64,
    /// Notes scheduled (or rested) so far
    pub note_index: u64,
}

#[derive(Debug, Clone)]
pub struct MusicScheduler {
    cursor: AudioCursor,
    policy: CursorPolicy,
    lookahead: f64,
    current: Option<TrackId>,
}

impl MusicScheduler {
    pub fn new(policy: CursorPolicy, lookahead: f64) -> Self {
        Self {
            cursor: AudioCursor::default(),
            policy,
            lookahead: usable_window(lookahead),
            current: None,
        }
    }

    pub fn configure(&mut self, policy: CursorPolicy, lookahead: f64) {
        self.policy = policy;
        self.lookahead = usable_window(lookahead);
    }

    pub fn cursor(&self) -> AudioCursor {
        self.cursor
    }

    pub fn lookahead(&self) -> f64 {
        self.lookahead
    }

    /// Schedule every note that starts before `now + lookahead`.
    /// Returns the number of voices handed to the backend.
    pub fn fill<B: AudioBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        track_id: TrackId,
        gain: f32,
    ) -> usize {
        let Some(now) = backend.current_time() else {
            return 0;
        };

        if self.current != Some(track_id) {
            if self.current.is_some() && self.policy == CursorPolicy::ResetOnTrackChange {
                self.cursor.note_index = 0;
            }
            log::debug!("Music track -> {:?} at note {}", track_id, self.cursor.note_index);
            self.current = Some(track_id);
        }

        // First call, or the loop stalled past the window: re-anchor just ahead
        // of the clock instead of scheduling notes in the past
        if self.cursor.next_note_time < now {
            self.cursor.next_note_time = now + self.lookahead;
        }

        let track = track_id.track();
        if track.step_secs <= 0.0 {
            return 0;
        }

        let mut voices = 0;
        while self.cursor.next_note_time < now + self.lookahead {
            let frequency = track.pitch_at(self.cursor.note_index);
            if frequency > 0.0 && gain > 0.0 {
                backend.play(&track.note(frequency, self.cursor.next_note_time, gain));
                voices += 1;
            }
            self.cursor.next_note_time += track.step_secs;
            self.cursor.note_index += 1;
        }
        voices
    }
}
