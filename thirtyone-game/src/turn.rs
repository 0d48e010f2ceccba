//! One player's turn: throw, keep, repeat until no dice remain.

use crate::constants::{DICE_PER_TURN, MAX_FACE, WILD_FACE, WILD_REWARD};
use crate::dice::{DiceSource, RollSet};
use crate::error::EngineError;
use crate::strategy::{KeeperSet, Strategy, TurnContext};

/// A single throw within a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnStep {
    pub rolls: RollSet,
    pub keepers: KeeperSet,
    pub score_after: u32,
}

/// Full record of a turn, one step per throw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnTrace {
    pub score: u32,
    pub steps: Vec<TurnStep>,
}

/// Play a turn for `strategy` and return its final score.
///
/// # Errors
///
/// Returns an error when the strategy breaks the keeper contract or the dice
/// source fails.
pub fn run_turn<S, D>(
    strategy: &S,
    dice: &mut D,
    target: u32,
    future_players: usize,
) -> Result<u32, EngineError>
where
    S: Strategy + ?Sized,
    D: DiceSource + ?Sized,
{
    play(strategy, dice, target, future_players, |_| {})
}

/// Same as [`run_turn`] but keeps every throw.
///
/// # Errors
///
/// Returns an error when the strategy breaks the keeper contract or the dice
/// source fails.
pub fn run_turn_traced<S, D>(
    strategy: &S,
    dice: &mut D,
    target: u32,
    future_players: usize,
) -> Result<TurnTrace, EngineError>
where
    S: Strategy + ?Sized,
    D: DiceSource + ?Sized,
{
    let mut steps = Vec::with_capacity(DICE_PER_TURN);
    let score = play(strategy, dice, target, future_players, |step| {
        steps.push(step);
    })?;
    Ok(TurnTrace { score, steps })
}

fn play<S, D, F>(
    strategy: &S,
    dice: &mut D,
    target: u32,
    future_players: usize,
    mut on_step: F,
) -> Result<u32, EngineError>
where
    S: Strategy + ?Sized,
    D: DiceSource + ?Sized,
    F: FnMut(TurnStep),
{
    let mut score = 0u32;
    let mut remaining = DICE_PER_TURN;

    while remaining > 0 {
        let rolls = dice.roll(remaining)?;
        let ctx = TurnContext::new(remaining, score, target, future_players);
        let keepers = strategy.pick_keepers(&rolls, &ctx);
        validate_keepers(strategy.name(), &rolls, &keepers)?;

        score += keepers.iter().map(|&value| u32::from(value)).sum::<u32>();
        remaining -= keepers.len();
        log::trace!(
            "{} rolled {:?} kept {:?} -> score {score}, {remaining} left",
            strategy.name(),
            rolls.as_slice(),
            keepers.as_slice()
        );
        on_step(TurnStep {
            rolls,
            keepers,
            score_after: score,
        });
    }

    Ok(score)
}

/// Check that `keepers` is a multiset drawn from `rolls`: every `0` uses up a
/// rolled three and every other value an equal non-three face.
fn validate_keepers(name: &str, rolls: &[u8], keepers: &KeeperSet) -> Result<(), EngineError> {
    if keepers.is_empty() {
        return Err(EngineError::EmptyKeepers {
            strategy: name.to_string(),
        });
    }
    if keepers.len() > rolls.len() {
        return Err(EngineError::TooManyKeepers {
            strategy: name.to_string(),
            kept: keepers.len(),
            remaining: rolls.len(),
        });
    }
    if let Some(&value) = keepers.iter().find(|&&value| value > MAX_FACE) {
        return Err(EngineError::InvalidKeeper {
            strategy: name.to_string(),
            value,
        });
    }

    let mut unclaimed = RollSet::from_slice(rolls);
    for &value in keepers {
        let face = match value {
            WILD_REWARD => Some(WILD_FACE),
            WILD_FACE => None,
            other => Some(other),
        };
        let slot = face.and_then(|face| unclaimed.iter().position(|&roll| roll == face));
        let Some(slot) = slot else {
            return Err(EngineError::ForgedKeeper {
                strategy: name.to_string(),
                value,
            });
        };
        unclaimed.swap_remove(slot);
    }
    Ok(())
}
