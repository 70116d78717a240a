//! Tenzies - roll until all ten dice match
//!
//! Core modules:
//! - `dice`: Die values and dice sets
//! - `game`: Hold/roll rules and win detection
//! - `mute`: Persisted mute flag with observers
//! - `scores`: Best score persistence
//! - `audio`: Synthesized click and victory sounds
//! - `platform`: Browser/native storage abstraction
//! - `app`: Wires the above into one session

pub mod app;
pub mod audio;
pub mod dice;
pub mod error;
pub mod game;
pub mod mute;
pub mod platform;
pub mod scores;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::TenziesApp;
pub use audio::{AudioEngine, SoundEffect};
pub use dice::{Die, new_dice_set, new_die};
pub use error::{Error, Result};
pub use game::{RollOutcome, Tenzies};
pub use mute::{MuteState, MuteStore};
pub use scores::{BestScore, save_best_score};

/// Game configuration constants
pub mod consts {
    /// Dice dealt per game
    pub const DICE_COUNT: usize = 10;
    /// Faces on each die
    pub const DIE_FACES: u8 = 6;
}
