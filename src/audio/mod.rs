//! Audio system
//!
//! Procedurally generated sound effects - no external files needed!
//!
//! Each sound is one oscillator feeding one gain envelope:
//! oscillator -> gain -> destination. The platform audio API sits behind
//! [`AudioContextApi`] so the scheduling logic runs the same against the
//! browser and against [`TraceContext`].

pub mod trace;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use trace::{AudioEvent, TraceContext};

use crate::error::Result;

/// The audio-processing context: a clock plus node factories
pub trait AudioContextApi {
    type Oscillator: OscillatorApi;
    type Gain: GainApi;

    /// Monotonic context clock, seconds
    fn current_time(&self) -> f64;

    /// Browsers start contexts suspended until a user gesture
    fn resume_if_suspended(&self) {}

    fn create_oscillator(&self) -> Result<Self::Oscillator>;
    fn create_gain(&self) -> Result<Self::Gain>;

    fn connect_oscillator(&self, osc: &Self::Oscillator, gain: &Self::Gain) -> Result<()>;
    fn connect_to_destination(&self, gain: &Self::Gain) -> Result<()>;
}

/// Tone generator node
pub trait OscillatorApi {
    /// Jump to `hz` at `when`
    fn set_frequency_at_time(&self, hz: f32, when: f64) -> Result<()>;
    fn start_at(&self, when: f64) -> Result<()>;
    fn stop_at(&self, when: f64) -> Result<()>;
    fn stop_now(&self) -> Result<()>;
}

/// Volume envelope node
pub trait GainApi {
    fn set_gain_at_time(&self, value: f32, when: f64) -> Result<()>;
    fn exponential_ramp_to(&self, value: f32, when: f64) -> Result<()>;
}

/// Parameters of a single-oscillator sound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    /// (offset seconds, Hz) steps, applied with set-value-at-time
    pub frequencies: &'static [(f64, f32)],
    /// Gain at offset 0
    pub gain_start: f32,
    /// Gain reached by exponential ramp at `duration`
    pub gain_end: f32,
    /// Offset at which the oscillator stops
    pub duration: f64,
}

/// Dice click - short high blip
pub const CLICK_TONE: ToneSpec = ToneSpec {
    frequencies: &[(0.0, 800.0)],
    gain_start: 0.05,
    gain_end: 0.01,
    duration: 0.1,
};

/// Victory - A4, C#5, E5 stepped (A major arpeggio)
pub const WIN_TONE: ToneSpec = ToneSpec {
    frequencies: &[(0.0, 440.0), (0.2, 554.37), (0.4, 659.25)],
    gain_start: 0.1,
    gain_end: 0.01,
    duration: 0.6,
};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Die held or dice rolled
    Click,
    /// All dice match
    Win,
}

impl SoundEffect {
    pub fn tone(self) -> &'static ToneSpec {
        match self {
            SoundEffect::Click => &CLICK_TONE,
            SoundEffect::Win => &WIN_TONE,
        }
    }
}

/// A scheduled tone. Dropping it lets the tone play out.
#[derive(Debug)]
pub struct ToneHandle<O> {
    oscillator: O,
    ends_at: f64,
}

impl<O: OscillatorApi> ToneHandle<O> {
    /// Context time at which the tone stops on its own
    pub fn ends_at(&self) -> f64 {
        self.ends_at
    }

    /// Cut the tone short
    pub fn stop(&self) -> Result<()> {
        self.oscillator.stop_now()
    }
}

type ContextFactory<C> = Box<dyn FnMut() -> Result<C>>;

/// Audio manager for the game
///
/// Creates its context on first use and keeps it for the rest of the session.
pub struct AudioEngine<C> {
    ctx: Option<C>,
    factory: ContextFactory<C>,
}

impl<C: AudioContextApi> AudioEngine<C> {
    pub fn new(factory: impl FnMut() -> Result<C> + 'static) -> Self {
        Self {
            ctx: None,
            factory: Box::new(factory),
        }
    }

    /// Whether the context has been created yet
    pub fn is_ready(&self) -> bool {
        self.ctx.is_some()
    }

    /// The shared context, created on first call
    pub fn context(&mut self) -> Result<&C> {
        let ctx = match self.ctx.take() {
            Some(ctx) => ctx,
            None => {
                let ctx = (self.factory)()?;
                log::info!("Audio context created");
                ctx
            }
        };
        Ok(&*self.ctx.insert(ctx))
    }

    pub fn play_click(&mut self) -> Result<ToneHandle<C::Oscillator>> {
        self.play(SoundEffect::Click)
    }

    pub fn play_win(&mut self) -> Result<ToneHandle<C::Oscillator>> {
        self.play(SoundEffect::Win)
    }

    /// Build the oscillator/gain graph for `effect` and schedule it
    pub fn play(&mut self, effect: SoundEffect) -> Result<ToneHandle<C::Oscillator>> {
        let tone = effect.tone();
        let ctx = self.context()?;
        ctx.resume_if_suspended();

        let osc = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;
        ctx.connect_oscillator(&osc, &gain)?;
        ctx.connect_to_destination(&gain)?;

        let t = ctx.current_time();
        for &(offset, hz) in tone.frequencies {
            osc.set_frequency_at_time(hz, t + offset)?;
        }
        gain.set_gain_at_time(tone.gain_start, t)?;
        gain.exponential_ramp_to(tone.gain_end, t + tone.duration)?;

        let ends_at = t + tone.duration;
        osc.start_at(t)?;
        osc.stop_at(ends_at)?;
        log::debug!("Scheduled {:?} at t={:.3}s until {:.3}s", effect, t, ends_at);

        Ok(ToneHandle {
            oscillator: osc,
            ends_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::Cell;
    use std::rc::Rc;

    const NOW: f64 = 2.5;

    fn engine_with(trace: &TraceContext) -> AudioEngine<TraceContext> {
        let ctx = trace.clone();
        AudioEngine::new(move || Ok(ctx.clone()))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_click_graph_and_schedule() {
        let trace = TraceContext::at(NOW);
        let mut engine = engine_with(&trace);

        let handle = engine.play_click().unwrap();
        assert!(approx(handle.ends_at(), NOW + 0.1));

        let events = trace.events();
        assert_eq!(trace.oscillators_created(), 1);
        assert_eq!(trace.gains_created(), 1);
        assert!(events.contains(&AudioEvent::ConnectOscillator { osc: 0, gain: 1 }));
        assert!(events.contains(&AudioEvent::ConnectDestination { gain: 1 }));

        let freqs = trace.frequency_steps(0);
        assert_eq!(freqs.len(), 1);
        assert_eq!(freqs[0].0, 800.0);
        assert!(approx(freqs[0].1, NOW));

        match events.as_slice() {
            [.., AudioEvent::SetGain { value, at, .. }, AudioEvent::RampGain { value: end, at: ramp_at, .. }, AudioEvent::Start { at: start, .. }, AudioEvent::Stop { at: stop, .. }] =>
            {
                assert_eq!(*value, 0.05);
                assert!(approx(*at, NOW));
                assert_eq!(*end, 0.01);
                assert!(approx(*ramp_at, NOW + 0.1));
                assert!(approx(*start, NOW));
                assert!(approx(*stop, NOW + 0.1));
            }
            other => panic!("unexpected schedule: {other:?}"),
        }
    }

    #[test]
    fn test_win_steps_three_notes() {
        let trace = TraceContext::at(NOW);
        let mut engine = engine_with(&trace);

        engine.play_win().unwrap();

        assert_eq!(trace.oscillators_created(), 1);
        assert_eq!(trace.gains_created(), 1);

        let freqs = trace.frequency_steps(0);
        let expected = [(440.0, 0.0), (554.37, 0.2), (659.25, 0.4)];
        assert_eq!(freqs.len(), expected.len());
        for ((hz, at), (want_hz, offset)) in freqs.iter().zip(expected) {
            assert_eq!(*hz, want_hz);
            assert!(approx(*at, NOW + offset));
        }

        let events = trace.events();
        assert!(events.contains(&AudioEvent::SetGain { gain: 1, value: 0.1, at: NOW }));
        assert!(events.iter().any(|e| matches!(e,
            AudioEvent::RampGain { value, at, .. } if *value == 0.01 && approx(*at, NOW + 0.6))));
        assert!(events.contains(&AudioEvent::Start { osc: 0, at: NOW }));
        assert!(events.iter().any(|e| matches!(e,
            AudioEvent::Stop { at, .. } if approx(*at, NOW + 0.6))));
    }

    #[test]
    fn test_each_play_builds_fresh_nodes() {
        let trace = TraceContext::at(0.0);
        let mut engine = engine_with(&trace);

        engine.play_click().unwrap();
        engine.play_win().unwrap();
        engine.play_click().unwrap();

        assert_eq!(trace.oscillators_created(), 3);
        assert_eq!(trace.gains_created(), 3);
    }

    #[test]
    fn test_context_created_lazily_once() {
        let created = Rc::new(Cell::new(0));
        let counter = created.clone();
        let mut engine = AudioEngine::new(move || {
            counter.set(counter.get() + 1);
            Ok(TraceContext::at(0.0))
        });

        assert!(!engine.is_ready());
        assert_eq!(created.get(), 0);

        let first = engine.context().unwrap() as *const TraceContext;
        let second = engine.context().unwrap() as *const TraceContext;
        assert_eq!(first, second);

        engine.play_click().unwrap();
        assert!(engine.is_ready());
        assert_eq!(created.get(), 1);
    }

    #[test]
    fn test_context_failure_propagates() {
        let mut engine: AudioEngine<TraceContext> =
            AudioEngine::new(|| Err(Error::audio("AudioContext is not supported")));
        assert!(matches!(engine.play_click(), Err(Error::Audio(_))));
        assert!(!engine.is_ready());
    }

    #[test]
    fn test_handle_stops_early() {
        let trace = TraceContext::at(1.0);
        let mut engine = engine_with(&trace);

        let handle = engine.play_win().unwrap();
        trace.advance(0.25);
        handle.stop().unwrap();

        assert_eq!(trace.events().last(), Some(&AudioEvent::Stop { osc: 0, at: 1.25 }));
    }

    #[test]
    fn test_tone_table() {
        assert_eq!(SoundEffect::Click.tone(), &CLICK_TONE);
        assert_eq!(SoundEffect::Win.tone().frequencies.len(), 3);
        assert!(WIN_TONE.duration > CLICK_TONE.duration);
    }
}
