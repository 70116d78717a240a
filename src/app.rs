//! Application composition
//!
//! Owns the one mute store, audio engine and game for a session and wires
//! them together. Muting is enforced here: the audio engine itself never
//! looks at the flag.

use crate::audio::{AudioContextApi, AudioEngine, SoundEffect};
use crate::error::Result;
use crate::game::{RollOutcome, Tenzies};
use crate::mute::MuteStore;
use crate::platform::KeyValueStore;
use crate::scores::{BestScore, save_best_score};

pub struct TenziesApp<S, C> {
    mute: MuteStore<S>,
    storage: Option<S>,
    audio: AudioEngine<C>,
    game: Tenzies,
    best: BestScore,
}

impl<S, C> TenziesApp<S, C>
where
    S: KeyValueStore + Clone,
    C: AudioContextApi,
{
    /// Load persisted state and deal the first game
    pub fn new(storage: Option<S>, audio: AudioEngine<C>, seed: u64) -> Result<Self> {
        let mute = MuteStore::load(storage.clone())?;
        let best = storage
            .as_ref()
            .map(BestScore::load)
            .unwrap_or_default();
        log::info!("Game initialized with seed: {}", seed);

        Ok(Self {
            mute,
            storage,
            audio,
            game: Tenzies::new(seed),
            best,
        })
    }

    pub fn game(&self) -> &Tenzies {
        &self.game
    }

    pub fn best_score(&self) -> Option<u32> {
        self.best.get()
    }

    pub fn is_muted(&self) -> bool {
        self.mute.is_muted()
    }

    /// For registering mute observers
    pub fn mute_store_mut(&mut self) -> &mut MuteStore<S> {
        &mut self.mute
    }

    pub fn toggle_mute(&mut self) -> Result<bool> {
        self.mute.toggle()
    }

    /// Hold or release a die. Returns true if this completed the game.
    pub fn hold(&mut self, index: usize) -> Result<bool> {
        if self.game.is_won() {
            self.game.hold(index)?;
            return Ok(false);
        }
        let won = self.game.hold(index)?;
        if won {
            self.finish_game();
            self.sound(SoundEffect::Win);
        } else {
            self.sound(SoundEffect::Click);
        }
        Ok(won)
    }

    pub fn roll(&mut self) -> RollOutcome {
        let outcome = self.game.roll();
        self.sound(SoundEffect::Click);
        outcome
    }

    fn finish_game(&mut self) {
        let rolls = self.game.rolls();
        log::info!("Tenzies! Won in {} rolls", rolls);

        if self.best.record(rolls) {
            log::info!("New best score: {}", rolls);
            if let Some(storage) = &self.storage {
                save_best_score(storage, rolls);
            }
        }
    }

    /// Sound failures never interrupt play
    fn sound(&mut self, effect: SoundEffect) {
        if self.mute.is_muted() {
            return;
        }
        if let Err(e) = self.audio.play(effect) {
            log::warn!("Failed to play {:?}: {}", effect, e);
        }
    }
}
