//! One-shot gate cues
//!
//! Fired at the device's current time, independent of the music cursor.

use super::{Ramp, Tone, Waveform};
use crate::sim::CueKind;

/// Build the voice for a cue starting at `t`
pub fn cue_tone(kind: CueKind, t: f64, gain: f32) -> Tone {
    match kind {
        CueKind::Success => success(t, gain),
        CueKind::Fail => fail(t, gain),
    }
}

/// Correct door - rising chirp
fn success(t: f64, gain: f32) -> Tone {
    Tone {
        waveform: Waveform::Sine,
        start: t,
        stop: t + 0.5,
        frequency: vec![
            Ramp::Set { value: 600.0, at: t },
            Ramp::Exponential {
                value: 1200.0,
                at: t + 0.1,
            },
        ],
        gain: vec![
            Ramp::Set { value: 0.0, at: t },
            Ramp::Linear {
                value: 0.1 * gain,
                at: t + 0.02,
            },
            Ramp::Exponential {
                value: 0.001,
                at: t + 0.5,
            },
        ],
    }
}

/// Wrong door - falling buzz
fn fail(t: f64, gain: f32) -> Tone {
    Tone {
        waveform: Waveform::Sawtooth,
        start: t,
        stop: t + 0.4,
        frequency: vec![
            Ramp::Set { value: 150.0, at: t },
            Ramp::Exponential {
                value: 80.0,
                at: t + 0.3,
            },
        ],
        gain: vec![
            Ramp::Set { value: 0.0, at: t },
            Ramp::Linear {
                value: 0.15 * gain,
                at: t + 0.02,
            },
            Ramp::Exponential {
                value: 0.001,
                at: t + 0.4,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_sweeps_up() {
        let tone = cue_tone(CueKind::Success, 2.0, 1.0);
        assert_eq!(tone.initial_frequency(), 600.0);
        assert_eq!(tone.frequency.last().map(Ramp::value), Some(1200.0));
        assert_eq!(tone.stop, 2.5);
        assert!((tone.peak_gain() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_fail_sweeps_down_and_self_stops() {
        let tone = cue_tone(CueKind::Fail, 0.0, 0.5);
        assert_eq!(tone.waveform, Waveform::Sawtooth);
        assert!(tone.frequency.last().map(Ramp::value) < Some(tone.initial_frequency()));
        assert_eq!(tone.stop, 0.4);
        assert!((tone.peak_gain() - 0.075).abs() < 1e-6);
        // Envelope ends at or before the voice stops
        assert!(tone.gain.iter().all(|r| r.at() <= tone.stop));
    }
}
