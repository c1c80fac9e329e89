//! Sound cues and spoken words.
//!
//! Cues are short oscillator melodies synthesized with Web Audio; words are
//! spoken with the browser's speech synthesis. Nothing here can fail from the
//! caller's point of view: browser errors are logged at `warn` and dropped.

use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType, SpeechSynthesisUtterance};

use crate::config::{AudioConfig, SpeechConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Cue {
    /// Short rising fanfare after a right answer.
    Correct,
    /// Low buzz after a wrong answer.
    Error,
    /// Longer melody when a group is completed.
    Victory,
    GameStart,
}

// C5 E5 G5 C6, plus E6 for the victory tail.
const C5: f32 = 523.25;
const E5: f32 = 659.25;
const G5: f32 = 783.99;
const C6: f32 = 1046.5;
const E6: f32 = 1318.51;
const G4: f32 = 392.0;

impl Cue {
    pub fn notes(self) -> &'static [f32] {
        match self {
            Cue::Correct => &[C5, E5, G5, C6],
            Cue::Error => &[200.0],
            Cue::Victory => &[C5, E5, G5, C6, G5, C6, E6],
            Cue::GameStart => &[G4, C5, E5, G5],
        }
    }

    /// Seconds between note onsets.
    pub fn note_secs(self) -> f64 {
        match self {
            Cue::Correct | Cue::GameStart => 0.15,
            Cue::Error => 0.3,
            Cue::Victory => 0.2,
        }
    }

    /// How long each note rings, relative to `note_secs`.
    fn release(self) -> f64 {
        match self {
            Cue::GameStart => 1.5,
            _ => 1.0,
        }
    }

    fn peak_gain(self) -> f32 {
        match self {
            Cue::GameStart => 0.4,
            _ => 0.3,
        }
    }

    fn waveform(self) -> OscillatorType {
        match self {
            Cue::Error => OscillatorType::Sawtooth,
            Cue::GameStart => OscillatorType::Triangle,
            Cue::Correct | Cue::Victory => OscillatorType::Sine,
        }
    }
}

/// Where the game sends its sounds.
pub trait FeedbackSink {
    fn play(&self, cue: Cue);
    fn speak(&self, text: &str, rate: f32);
}

/// Plays nothing. Used natively and when audio is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentFeedback;

impl FeedbackSink for SilentFeedback {
    fn play(&self, _cue: Cue) {}
    fn speak(&self, _text: &str, _rate: f32) {}
}

/// Web Audio and SpeechSynthesis.
pub struct WebFeedback {
    audio: AudioConfig,
    speech: SpeechConfig,
}

impl WebFeedback {
    pub fn new(audio: AudioConfig, speech: SpeechConfig) -> Self {
        Self { audio, speech }
    }

    fn synthesize(cue: Cue) -> Result<(), JsValue> {
        // A fresh context per cue, closed by the browser once idle.
        let ctx = AudioContext::new()?;
        let start = ctx.current_time();
        let step = cue.note_secs();
        let ring = step * cue.release();
        for (i, &freq) in cue.notes().iter().enumerate() {
            let t = start + i as f64 * step;
            let osc = ctx.create_oscillator()?;
            let gain = ctx.create_gain()?;
            osc.connect_with_audio_node(&gain)?;
            gain.connect_with_audio_node(&ctx.destination())?;
            osc.set_type(cue.waveform());
            osc.frequency().set_value(freq);
            gain.gain().set_value_at_time(cue.peak_gain(), t)?;
            gain.gain().exponential_ramp_to_value_at_time(0.01, t + ring)?;
            osc.start_with_when(t)?;
            osc.stop_with_when(t + ring)?;
        }
        Ok(())
    }

    fn say(&self, text: &str, rate: f32) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let synth = window.speech_synthesis()?;
        synth.cancel();
        let utterance = SpeechSynthesisUtterance::new_with_text(text)?;
        utterance.set_lang(&self.speech.lang);
        utterance.set_rate(rate);
        synth.speak(&utterance);
        Ok(())
    }
}

impl FeedbackSink for WebFeedback {
    fn play(&self, cue: Cue) {
        if !self.audio.enabled {
            return;
        }
        if let Err(e) = Self::synthesize(cue) {
            log::warn!("could not play {cue:?}: {e:?}");
        }
    }

    fn speak(&self, text: &str, rate: f32) {
        if let Err(e) = self.say(text, rate) {
            log::warn!("could not speak {text:?}: {e:?}");
        }
    }
}
