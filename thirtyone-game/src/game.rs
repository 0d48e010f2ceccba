//! One full game: every seat takes a turn against a tightening target.

use serde::{Deserialize, Serialize};

use crate::constants::QUALIFYING_SENTINEL;
use crate::dice::DiceSource;
use crate::error::EngineError;
use crate::strategy::Strategy;
use crate::turn::run_turn;

/// Who, if anyone, won a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Won {
        score: u32,
        /// Zero-based position in the seating order of this game.
        seat: usize,
        name: String,
    },
    /// Every turn scored at or above the qualifying sentinel.
    NoWinner,
}

impl GameOutcome {
    #[must_use]
    pub fn winner_name(&self) -> Option<&str> {
        match self {
            Self::Won { name, .. } => Some(name),
            Self::NoWinner => None,
        }
    }

    #[must_use]
    pub const fn winning_score(&self) -> Option<u32> {
        match self {
            Self::Won { score, .. } => Some(*score),
            Self::NoWinner => None,
        }
    }
}

/// Outcome plus every turn score in seating order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    pub turn_scores: Vec<u32>,
}

/// Play one game with `seats` in the given order.
///
/// Each seat aims one below the best score so far and only a strictly lower
/// score takes the lead, so the earliest seat keeps a tie.
///
/// # Errors
///
/// Propagates the first turn failure.
pub fn run_game<S, D>(seats: &[S], dice: &mut D) -> Result<GameRecord, EngineError>
where
    S: Strategy,
    D: DiceSource + ?Sized,
{
    let mut winning_score = QUALIFYING_SENTINEL;
    let mut leader: Option<usize> = None;
    let mut turn_scores = Vec::with_capacity(seats.len());

    for (seat, strategy) in seats.iter().enumerate() {
        let future_players = seats.len() - (seat + 1);
        let target = winning_score.saturating_sub(1);
        let score = run_turn(strategy, dice, target, future_players)?;
        turn_scores.push(score);
        if score < winning_score {
            winning_score = score;
            leader = Some(seat);
        }
    }

    let outcome = match leader {
        Some(seat) => GameOutcome::Won {
            score: winning_score,
            seat,
            name: seats[seat].name().to_string(),
        },
        None => GameOutcome::NoWinner,
    };
    log::debug!("game over: {outcome:?} from {turn_scores:?}");
    Ok(GameRecord {
        outcome,
        turn_scores,
    })
}
