//! Dice sources feeding the turn engine.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use smallvec::SmallVec;

use crate::constants::{DICE_PER_TURN, MAX_FACE, MIN_FACE};
use crate::error::DiceError;
use crate::numbers::usize_to_u64;

/// Faces produced by one throw. Five dice fit inline.
pub type RollSet = SmallVec<[u8; DICE_PER_TURN]>;

/// Producer of independent uniform die faces in `1..=6`.
pub trait DiceSource {
    /// Throw `count` dice.
    ///
    /// # Errors
    ///
    /// Returns [`DiceError::InvalidCount`] when `count` is zero.
    fn roll(&mut self, count: usize) -> Result<RollSet, DiceError>;
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll(&mut self, count: usize) -> Result<RollSet, DiceError> {
        (**self).roll(count)
    }
}

const fn check_count(count: usize) -> Result<(), DiceError> {
    if count == 0 {
        Err(DiceError::InvalidCount { count })
    } else {
        Ok(())
    }
}

/// Dice backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
    rolled: u64,
}

impl<R: Rng> RngDice<R> {
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng, rolled: 0 }
    }

    /// Total number of dice thrown so far.
    #[must_use]
    pub const fn rolled(&self) -> u64 {
        self.rolled
    }

    #[must_use]
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngDice<ChaCha20Rng> {
    /// Reproducible dice from a numeric seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> DiceSource for RngDice<R> {
    fn roll(&mut self, count: usize) -> Result<RollSet, DiceError> {
        check_count(count)?;
        self.rolled = self.rolled.saturating_add(usize_to_u64(count));
        Ok((0..count)
            .map(|_| self.rng.random_range(MIN_FACE..=MAX_FACE))
            .collect())
    }
}

/// Deterministic dice replaying a recorded face sequence.
///
/// Faces are handed out one at a time and the script wraps around, so
/// `[6]` yields sixes forever and `[3, 3, 3, 3, 3]` yields a full hand of
/// threes on every fresh turn.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    script: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    /// # Errors
    ///
    /// Returns an error when the script is empty or holds a face outside `1..=6`.
    pub fn new(script: impl Into<Vec<u8>>) -> Result<Self, DiceError> {
        let script = script.into();
        if script.is_empty() {
            return Err(DiceError::EmptyScript);
        }
        if let Some(&face) = script
            .iter()
            .find(|face| !(MIN_FACE..=MAX_FACE).contains(*face))
        {
            return Err(DiceError::InvalidFace { face });
        }
        Ok(Self { script, cursor: 0 })
    }

    /// Faces consumed so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.cursor
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self, count: usize) -> Result<RollSet, DiceError> {
        check_count(count)?;
        let len = self.script.len();
        let rolls = (0..count)
            .map(|offset| self.script[(self.cursor + offset) % len])
            .collect();
        self.cursor += count;
        Ok(rolls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_dice_stay_in_range() {
        let mut dice = RngDice::seeded(7);
        for count in 1..=DICE_PER_TURN {
            let rolls = dice.roll(count).unwrap();
            assert_eq!(rolls.len(), count);
            assert!(rolls.iter().all(|face| (1..=6).contains(face)));
        }
        assert_eq!(dice.rolled(), 15);
    }

    #[test]
    fn rng_dice_are_reproducible() {
        let mut first = RngDice::seeded(0xBEEF);
        let mut second = RngDice::seeded(0xBEEF);
        for _ in 0..20 {
            assert_eq!(first.roll(5).unwrap(), second.roll(5).unwrap());
        }
    }

    #[test]
    fn rng_dice_cover_every_face() {
        let mut dice = RngDice::seeded(99);
        let mut seen = [false; 6];
        for _ in 0..200 {
            for face in dice.roll(5).unwrap() {
                seen[usize::from(face - 1)] = true;
            }
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn zero_dice_is_rejected() {
        let mut dice = RngDice::seeded(1);
        assert_eq!(dice.roll(0), Err(DiceError::InvalidCount { count: 0 }));
        let mut scripted = ScriptedDice::new([4]).unwrap();
        assert_eq!(scripted.roll(0), Err(DiceError::InvalidCount { count: 0 }));
    }

    #[test]
    fn scripted_dice_wrap_around() {
        let mut dice = ScriptedDice::new([1, 2, 3]).unwrap();
        assert_eq!(dice.roll(2).unwrap().as_slice(), &[1, 2]);
        assert_eq!(dice.roll(4).unwrap().as_slice(), &[3, 1, 2, 3]);
        assert_eq!(dice.consumed(), 6);
    }

    #[test]
    fn scripted_dice_validate_script() {
        assert_eq!(
            ScriptedDice::new(Vec::<u8>::new()).unwrap_err(),
            DiceError::EmptyScript
        );
        assert_eq!(
            ScriptedDice::new([1, 7]).unwrap_err(),
            DiceError::InvalidFace { face: 7 }
        );
        assert_eq!(
            ScriptedDice::new([0]).unwrap_err(),
            DiceError::InvalidFace { face: 0 }
        );
    }

    fn roll_one<D: DiceSource>(mut dice: D) -> RollSet {
        dice.roll(1).unwrap()
    }

    #[test]
    fn mutable_reference_is_a_source() {
        let mut dice = ScriptedDice::new([5]).unwrap();
        assert_eq!(roll_one(&mut dice).as_slice(), &[5]);
        assert_eq!(dice.consumed(), 1);
    }
}
