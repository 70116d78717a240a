//! Web Audio API backend

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use super::{AudioContextApi, GainApi, OscillatorApi};
use crate::error::{Error, Result};

fn audio_err(err: JsValue) -> Error {
    Error::audio(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Create the browser context (may fail outside a secure context)
pub fn create_context() -> Result<AudioContext> {
    AudioContext::new().map_err(audio_err)
}

impl AudioContextApi for AudioContext {
    type Oscillator = OscillatorNode;
    type Gain = GainNode;

    fn current_time(&self) -> f64 {
        AudioContext::current_time(self)
    }

    fn resume_if_suspended(&self) {
        if self.state() == AudioContextState::Suspended {
            let _ = self.resume();
        }
    }

    fn create_oscillator(&self) -> Result<OscillatorNode> {
        let osc = AudioContext::create_oscillator(self).map_err(audio_err)?;
        osc.set_type(OscillatorType::Sine);
        Ok(osc)
    }

    fn create_gain(&self) -> Result<GainNode> {
        AudioContext::create_gain(self).map_err(audio_err)
    }

    fn connect_oscillator(&self, osc: &OscillatorNode, gain: &GainNode) -> Result<()> {
        osc.connect_with_audio_node(gain).map_err(audio_err)?;
        Ok(())
    }

    fn connect_to_destination(&self, gain: &GainNode) -> Result<()> {
        gain.connect_with_audio_node(&self.destination())
            .map_err(audio_err)?;
        Ok(())
    }
}

impl OscillatorApi for OscillatorNode {
    fn set_frequency_at_time(&self, hz: f32, when: f64) -> Result<()> {
        self.frequency()
            .set_value_at_time(hz, when)
            .map_err(audio_err)?;
        Ok(())
    }

    fn start_at(&self, when: f64) -> Result<()> {
        self.start_with_when(when).map_err(audio_err)
    }

    fn stop_at(&self, when: f64) -> Result<()> {
        self.stop_with_when(when).map_err(audio_err)
    }

    fn stop_now(&self) -> Result<()> {
        self.stop().map_err(audio_err)
    }
}

impl GainApi for GainNode {
    fn set_gain_at_time(&self, value: f32, when: f64) -> Result<()> {
        self.gain().set_value_at_time(value, when).map_err(audio_err)?;
        Ok(())
    }

    fn exponential_ramp_to(&self, value: f32, when: f64) -> Result<()> {
        self.gain()
            .exponential_ramp_to_value_at_time(value, when)
            .map_err(audio_err)?;
        Ok(())
    }
}
