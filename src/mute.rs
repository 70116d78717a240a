//! Mute flag store
//!
//! Persisted to LocalStorage as a JSON boolean. Observers are notified
//! whenever the flag changes.

use crate::error::{Error, Result};
use crate::platform::KeyValueStore;

/// Snapshot handed to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MuteState {
    pub is_muted: bool,
}

type Observer = Box<dyn FnMut(MuteState)>;

/// Owns the mute flag and its persisted copy
pub struct MuteStore<S> {
    state: MuteState,
    /// `None` when the host has no durable storage
    storage: Option<S>,
    observers: Vec<Observer>,
}

impl<S: KeyValueStore> MuteStore<S> {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "tenziesAppMuted";

    /// Build the store, reading any previously persisted flag
    pub fn load(storage: Option<S>) -> Result<Self> {
        let mut state = MuteState::default();
        if let Some(storage) = &storage {
            if let Some(raw) = storage.get_item(Self::STORAGE_KEY)? {
                state.is_muted = serde_json::from_str(&raw).map_err(|_| Error::Decode {
                    key: Self::STORAGE_KEY.to_string(),
                    value: raw.clone(),
                })?;
                log::info!("Loaded mute flag: {}", state.is_muted);
            }
        }
        Ok(Self {
            state,
            storage,
            observers: Vec::new(),
        })
    }

    /// Store with no durable backing; toggles stay in memory
    pub fn detached() -> Self {
        Self {
            state: MuteState::default(),
            storage: None,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> MuteState {
        self.state
    }

    pub fn is_muted(&self) -> bool {
        self.state.is_muted
    }

    /// Register an observer. It runs immediately with the current state.
    pub fn subscribe(&mut self, mut observer: impl FnMut(MuteState) + 'static) {
        observer(self.state);
        self.observers.push(Box::new(observer));
    }

    /// Flip the flag, persist it, notify observers. Returns the new flag.
    ///
    /// The flag only changes once the write has succeeded.
    pub fn toggle(&mut self) -> Result<bool> {
        let next = !self.state.is_muted;
        if let Some(storage) = &self.storage {
            let encoded = serde_json::to_string(&next)
                .map_err(|e| Error::storage(Self::STORAGE_KEY, e.to_string()))?;
            storage.set_item(Self::STORAGE_KEY, &encoded)?;
        }
        self.state.is_muted = next;
        log::info!("Audio {}", if self.state.is_muted { "muted" } else { "unmuted" });
        for observer in &mut self.observers {
            observer(self.state);
        }
        Ok(self.state.is_muted)
    }
}
