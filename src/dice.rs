//! Dice generation
//!
//! A die shows a face in [1, 6] and can be held between rolls.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{DICE_COUNT, DIE_FACES};

/// A single six-sided die
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    /// Face value, always 1..=6
    pub value: u8,
    /// Held dice keep their value across rolls
    #[serde(rename = "isHeld")]
    pub is_held: bool,
}

impl Die {
    /// Roll a fresh, un-held die from the given RNG
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        Self {
            value: rng.random_range(1..=DIE_FACES),
            is_held: false,
        }
    }

    pub fn toggle_hold(&mut self) {
        self.is_held = !self.is_held;
    }
}

/// New un-held die using the thread-local RNG
pub fn new_die() -> Die {
    Die::roll(&mut rand::rng())
}

/// `n` independently rolled dice using the thread-local RNG
pub fn new_dice_set(n: usize) -> Vec<Die> {
    let mut rng = rand::rng();
    dice_set_from(&mut rng, n)
}

/// Standard set of `DICE_COUNT` dice
pub fn new_default_dice_set() -> Vec<Die> {
    new_dice_set(DICE_COUNT)
}

/// `n` dice drawn from a caller-supplied RNG (seeded games, tests)
pub fn dice_set_from<R: Rng>(rng: &mut R, n: usize) -> Vec<Die> {
    (0..n).map(|_| Die::roll(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_die_in_range_and_not_held() {
        for _ in 0..1000 {
            let die = new_die();
            assert!((1..=6).contains(&die.value), "value {} out of range", die.value);
            assert!(!die.is_held);
        }
    }

    #[test]
    fn test_default_set_has_ten_dice() {
        let dice = new_default_dice_set();
        assert_eq!(dice.len(), 10);
        assert!(dice.iter().all(|d| (1..=6).contains(&d.value) && !d.is_held));
    }

    #[test]
    fn test_dice_set_exact_count() {
        assert!(new_dice_set(0).is_empty());
        assert_eq!(new_dice_set(3).len(), 3);
    }

    #[test]
    fn test_every_face_appears() {
        let mut rng = Pcg32::seed_from_u64(7);
        let dice = dice_set_from(&mut rng, 600);
        for face in 1..=6 {
            assert!(dice.iter().any(|d| d.value == face), "face {face} never rolled");
        }
    }

    #[test]
    fn test_toggle_hold() {
        let mut die = Die { value: 4, is_held: false };
        die.toggle_hold();
        assert!(die.is_held);
        die.toggle_hold();
        assert!(!die.is_held);
    }

    #[test]
    fn test_die_serializes_with_held_flag_name() {
        let json = serde_json::to_string(&Die { value: 3, is_held: true }).unwrap();
        assert_eq!(json, r#"{"value":3,"isHeld":true}"#);
    }

    proptest! {
        #[test]
        fn prop_seeded_dice_stay_in_range(seed in any::<u64>(), n in 0usize..64) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let dice = dice_set_from(&mut rng, n);
            prop_assert_eq!(dice.len(), n);
            for die in dice {
                prop_assert!((1..=6).contains(&die.value));
                prop_assert!(!die.is_held);
            }
        }
    }
}
