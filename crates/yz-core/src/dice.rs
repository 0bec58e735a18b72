//! The five dice and their held flags.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use yz_protocol::DICE_COUNT;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("there is no die {0}, dice are numbered 1 to 5")]
    NoSuchDie(usize),
    #[error("a die shows 1 to 6, not {0}")]
    BadFace(u8),
}

#[derive(Debug)]
pub struct Dice {
    values: [u8; DICE_COUNT],
    held: [bool; DICE_COUNT],
    rng: StdRng,
}

impl Default for Dice {
    fn default() -> Self {
        Self::new()
    }
}

impl Dice {
    /// New dice seeded from OS entropy, already rolled, none held.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// New dice with a reproducible roll sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        let mut dice = Self {
            values: [1; DICE_COUNT],
            held: [false; DICE_COUNT],
            rng,
        };
        dice.roll();
        dice
    }

    /// Reroll every die that is not held.
    pub fn roll(&mut self) {
        for i in 0..DICE_COUNT {
            if !self.held[i] {
                self.values[i] = self.rng.gen_range(1..=6);
            }
        }
    }

    pub fn values(&self) -> [u8; DICE_COUNT] {
        self.values
    }

    pub fn value(&self, index: usize) -> Result<u8, DiceError> {
        check_index(index)?;
        Ok(self.values[index])
    }

    pub fn set_values(&mut self, values: [u8; DICE_COUNT]) -> Result<(), DiceError> {
        if let Some(&bad) = values.iter().find(|v| !(1..=6).contains(*v)) {
            return Err(DiceError::BadFace(bad));
        }
        self.values = values;
        Ok(())
    }

    pub fn is_held(&self, index: usize) -> bool {
        self.held.get(index).copied().unwrap_or(false)
    }

    pub fn set_held(&mut self, index: usize, held: bool) -> Result<(), DiceError> {
        check_index(index)?;
        self.held[index] = held;
        Ok(())
    }

    /// Flip the held flag and return the new state.
    pub fn toggle_held(&mut self, index: usize) -> Result<bool, DiceError> {
        check_index(index)?;
        self.held[index] = !self.held[index];
        Ok(self.held[index])
    }

    pub fn clear_held(&mut self) {
        self.held = [false; DICE_COUNT];
    }

    pub fn held_count(&self) -> usize {
        self.held.iter().filter(|h| **h).count()
    }
}

fn check_index(index: usize) -> Result<(), DiceError> {
    if index < DICE_COUNT {
        Ok(())
    } else {
        // Report 1-based, as the player counts them.
        Err(DiceError::NoSuchDie(index + 1))
    }
}
