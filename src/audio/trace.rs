//! Recording audio backend
//!
//! Implements the audio traits without making sound: every node creation,
//! connection and scheduled parameter change is appended to a shared event
//! log and echoed at trace level. Used by native builds and tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{AudioContextApi, GainApi, OscillatorApi};
use crate::error::Result;

/// One call made against the audio graph. Node ids come from a single
/// counter shared by oscillators and gains.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    CreateOscillator { osc: usize },
    CreateGain { gain: usize },
    ConnectOscillator { osc: usize, gain: usize },
    ConnectDestination { gain: usize },
    SetFrequency { osc: usize, hz: f32, at: f64 },
    SetGain { gain: usize, value: f32, at: f64 },
    RampGain { gain: usize, value: f32, at: f64 },
    Start { osc: usize, at: f64 },
    Stop { osc: usize, at: f64 },
}

#[derive(Debug, Default)]
struct Shared {
    now: Cell<f64>,
    next_id: Cell<usize>,
    events: RefCell<Vec<AudioEvent>>,
}

impl Shared {
    fn record(&self, event: AudioEvent) {
        log::trace!("audio: {event:?}");
        self.events.borrow_mut().push(event);
    }

    fn next_id(&self) -> usize {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

/// Context with a manually advanced clock. Clones share clock and log.
#[derive(Debug, Clone, Default)]
pub struct TraceContext {
    shared: Rc<Shared>,
}

impl TraceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context whose clock reads `now`
    pub fn at(now: f64) -> Self {
        let ctx = Self::default();
        ctx.shared.now.set(now);
        ctx
    }

    /// Move the clock forward
    pub fn advance(&self, dt: f64) {
        self.shared.now.set(self.shared.now.get() + dt);
    }

    pub fn events(&self) -> Vec<AudioEvent> {
        self.shared.events.borrow().clone()
    }

    pub fn oscillators_created(&self) -> usize {
        self.count(|e| matches!(e, AudioEvent::CreateOscillator { .. }))
    }

    pub fn gains_created(&self) -> usize {
        self.count(|e| matches!(e, AudioEvent::CreateGain { .. }))
    }

    /// (Hz, time) frequency steps scheduled on one oscillator, in call order
    pub fn frequency_steps(&self, osc_id: usize) -> Vec<(f32, f64)> {
        self.shared
            .events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                AudioEvent::SetFrequency { osc, hz, at } if *osc == osc_id => Some((*hz, *at)),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&AudioEvent) -> bool) -> usize {
        self.shared.events.borrow().iter().filter(|e| pred(e)).count()
    }
}

#[derive(Debug, Clone)]
pub struct TraceOscillator {
    id: usize,
    shared: Rc<Shared>,
}

#[derive(Debug, Clone)]
pub struct TraceGain {
    id: usize,
    shared: Rc<Shared>,
}

impl AudioContextApi for TraceContext {
    type Oscillator = TraceOscillator;
    type Gain = TraceGain;

    fn current_time(&self) -> f64 {
        self.shared.now.get()
    }

    fn create_oscillator(&self) -> Result<TraceOscillator> {
        let id = self.shared.next_id();
        self.shared.record(AudioEvent::CreateOscillator { osc: id });
        Ok(TraceOscillator {
            id,
            shared: self.shared.clone(),
        })
    }

    fn create_gain(&self) -> Result<TraceGain> {
        let id = self.shared.next_id();
        self.shared.record(AudioEvent::CreateGain { gain: id });
        Ok(TraceGain {
            id,
            shared: self.shared.clone(),
        })
    }

    fn connect_oscillator(&self, osc: &TraceOscillator, gain: &TraceGain) -> Result<()> {
        self.shared.record(AudioEvent::ConnectOscillator {
            osc: osc.id,
            gain: gain.id,
        });
        Ok(())
    }

    fn connect_to_destination(&self, gain: &TraceGain) -> Result<()> {
        self.shared
            .record(AudioEvent::ConnectDestination { gain: gain.id });
        Ok(())
    }
}

impl OscillatorApi for TraceOscillator {
    fn set_frequency_at_time(&self, hz: f32, when: f64) -> Result<()> {
        self.shared.record(AudioEvent::SetFrequency {
            osc: self.id,
            hz,
            at: when,
        });
        Ok(())
    }

    fn start_at(&self, when: f64) -> Result<()> {
        self.shared.record(AudioEvent::Start {
            osc: self.id,
            at: when,
        });
        Ok(())
    }

    fn stop_at(&self, when: f64) -> Result<()> {
        self.shared.record(AudioEvent::Stop {
            osc: self.id,
            at: when,
        });
        Ok(())
    }

    fn stop_now(&self) -> Result<()> {
        self.stop_at(self.shared.now.get())
    }
}

impl GainApi for TraceGain {
    fn set_gain_at_time(&self, value: f32, when: f64) -> Result<()> {
        self.shared.record(AudioEvent::SetGain {
            gain: self.id,
            value,
            at: when,
        });
        Ok(())
    }

    fn exponential_ramp_to(&self, value: f32, when: f64) -> Result<()> {
        self.shared.record(AudioEvent::RampGain {
            gain: self.id,
            value,
            at: when,
        });
        Ok(())
    }
}
