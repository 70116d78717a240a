//! Tenzies rules
//!
//! Roll until all ten dice show the same face. Held dice keep their value
//! between rolls. Pure game logic: no storage, no audio.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::DICE_COUNT;
use crate::dice::{Die, dice_set_from};
use crate::error::{Error, Result};

/// What a roll did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollOutcome {
    /// Un-held dice were rerolled
    Rolled,
    /// The previous game was already won, so a new one was dealt
    NewGame,
}

/// One game of Tenzies
#[derive(Debug, Clone)]
pub struct Tenzies {
    dice: Vec<Die>,
    rolls: u32,
    rng: Pcg32,
}

impl Tenzies {
    /// New game seeded for reproducibility
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }

    pub fn with_rng(mut rng: Pcg32) -> Self {
        let dice = dice_set_from(&mut rng, DICE_COUNT);
        Self {
            dice,
            rolls: 0,
            rng,
        }
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Rolls taken in the current game
    pub fn rolls(&self) -> u32 {
        self.rolls
    }

    /// All dice held and showing the same face
    pub fn is_won(&self) -> bool {
        let Some(first) = self.dice.first() else {
            return false;
        };
        self.dice
            .iter()
            .all(|d| d.is_held && d.value == first.value)
    }

    /// Toggle the held flag on one die. Returns true when this hold
    /// completes the game. No-op once the game is won.
    pub fn hold(&mut self, index: usize) -> Result<bool> {
        let len = self.dice.len();
        if index >= len {
            return Err(Error::DieIndex { index, len });
        }
        if self.is_won() {
            return Ok(false);
        }
        self.dice[index].toggle_hold();
        Ok(self.is_won())
    }

    /// Reroll every un-held die, or deal a new game if already won
    pub fn roll(&mut self) -> RollOutcome {
        if self.is_won() {
            self.new_game();
            return RollOutcome::NewGame;
        }

        for die in self.dice.iter_mut().filter(|d| !d.is_held) {
            *die = Die::roll(&mut self.rng);
        }
        self.rolls += 1;
        RollOutcome::Rolled
    }

    /// Deal ten fresh dice and reset the roll counter
    pub fn new_game(&mut self) {
        self.dice = dice_set_from(&mut self.rng, DICE_COUNT);
        self.rolls = 0;
    }

    /// The face showing most often (lowest face wins ties)
    pub fn most_common_value(&self) -> u8 {
        let mut counts = [0usize; 7];
        for die in &self.dice {
            counts[die.value as usize] += 1;
        }
        (1..=6u8)
            .max_by_key(|&face| (counts[face as usize], std::cmp::Reverse(face)))
            .unwrap_or(1)
    }

    #[cfg(test)]
    fn set_dice(&mut self, values: &[u8], held: bool) {
        self.dice = values
            .iter()
            .map(|&value| Die {
                value,
                is_held: held,
            })
            .collect();
    }
}
