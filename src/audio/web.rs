//! Web Audio API backend

use web_sys::{AudioContext, AudioContextState, AudioParam, GainNode, OscillatorNode, OscillatorType};

use super::{AudioBackend, Ramp, Tone, Waveform};

pub struct WebAudioBackend {
    ctx: Option<AudioContext>,
}

impl Default for WebAudioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudioBackend {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx }
    }

    /// Oscillator -> gain -> destination
    fn create_voice(ctx: &AudioContext, waveform: Waveform) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(match waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Triangle => OscillatorType::Triangle,
        });
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}

fn automate(param: &AudioParam, ramps: &[Ramp]) {
    for ramp in ramps {
        match *ramp {
            Ramp::Set { value, at } => {
                param.set_value_at_time(value, at).ok();
            }
            Ramp::Linear { value, at } => {
                param.linear_ramp_to_value_at_time(value, at).ok();
            }
            Ramp::Exponential { value, at } => {
                param.exponential_ramp_to_value_at_time(value, at).ok();
            }
        }
    }
}

impl AudioBackend for WebAudioBackend {
    fn current_time(&self) -> Option<f64> {
        let ctx = self.ctx.as_ref()?;
        (ctx.state() == AudioContextState::Running).then(|| ctx.current_time())
    }

    fn resume(&mut self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    fn play(&mut self, tone: &Tone) {
        let Some(ctx) = &self.ctx else { return };
        let Some((osc, gain)) = Self::create_voice(ctx, tone.waveform) else {
            return;
        };

        automate(&osc.frequency(), &tone.frequency);
        automate(&gain.gain(), &tone.gain);

        osc.start_with_when(tone.start).ok();
        osc.stop_with_when(tone.stop).ok();
    }
}
