//! Repeated games: single-strategy trials and shuffled tournaments.
//!
//! Two ways to drive an experiment:
//!
//! - `*_with` functions take injected dice and seat-order generators and play
//!   every trial from them in sequence. Tests script these.
//! - `*_seeded` functions derive an independent dice stream and seat-order
//!   stream per trial from one user seed, so trials can run on a rayon pool
//!   and still produce the same sequence as a sequential run.

use std::collections::BTreeMap;
use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalog::build_roster;
use crate::config::{ExperimentConfig, TurnOrder};
use crate::constants::QUALIFYING_SENTINEL;
use crate::dice::{DiceSource, RngDice};
use crate::error::{ConfigError, EngineError, ExperimentError};
use crate::game::{GameOutcome, GameRecord, run_game};
use crate::numbers::usize_to_u64;
use crate::seed::{Stream, trial_seed};
use crate::strategy::Strategy;

/// Aggregate of a tournament: winning scores in trial order and wins per
/// strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TournamentResult {
    scores: Vec<u32>,
    wins: BTreeMap<String, u64>,
    no_winner_games: u64,
    games: u64,
}

impl TournamentResult {
    /// Empty aggregate with a zero tally for every name.
    #[must_use]
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            wins: names.into_iter().map(|name| (name.to_string(), 0)).collect(),
            ..Self::default()
        }
    }

    /// Fold one game into the aggregate. Games without a winner are counted
    /// separately and add nothing to the score sequence.
    pub fn record(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        match outcome {
            GameOutcome::Won { score, name, .. } => {
                self.scores.push(*score);
                *self.wins.entry(name.clone()).or_insert(0) += 1;
            }
            GameOutcome::NoWinner => self.no_winner_games += 1,
        }
    }

    /// Winning score of every decided game, in trial order.
    #[must_use]
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    #[must_use]
    pub const fn wins(&self) -> &BTreeMap<String, u64> {
        &self.wins
    }

    #[must_use]
    pub fn wins_for(&self, name: &str) -> Option<u64> {
        self.wins.get(name).copied()
    }

    #[must_use]
    pub const fn no_winner_games(&self) -> u64 {
        self.no_winner_games
    }

    #[must_use]
    pub const fn games(&self) -> u64 {
        self.games
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<u32>, BTreeMap<String, u64>) {
        (self.scores, self.wins)
    }
}

/// A fixed roster competing over many games.
pub struct Tournament {
    roster: Vec<Box<dyn Strategy>>,
    games: usize,
    order: TurnOrder,
}

impl std::fmt::Debug for Tournament {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tournament")
            .field("roster", &self.roster_names())
            .field("games", &self.games)
            .field("order", &self.order)
            .finish()
    }
}

impl Tournament {
    /// # Errors
    ///
    /// Returns an error for an empty roster or duplicate strategy names.
    pub fn new(
        roster: Vec<Box<dyn Strategy>>,
        games: usize,
        order: TurnOrder,
    ) -> Result<Self, ConfigError> {
        if roster.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        let mut seen = HashSet::with_capacity(roster.len());
        for strategy in &roster {
            if !seen.insert(strategy.name()) {
                return Err(ConfigError::DuplicateStrategy {
                    name: strategy.name().to_string(),
                });
            }
        }
        Ok(Self {
            roster,
            games,
            order,
        })
    }

    /// Build the catalogue roster named in `cfg`.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid.
    pub fn from_config(cfg: &ExperimentConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Self::new(build_roster(&cfg.strategies), cfg.games, cfg.order)
    }

    #[must_use]
    pub fn roster_names(&self) -> Vec<&str> {
        self.roster.iter().map(|strategy| strategy.name()).collect()
    }

    #[must_use]
    pub const fn games(&self) -> usize {
        self.games
    }

    #[must_use]
    pub const fn order(&self) -> TurnOrder {
        self.order
    }

    /// Seating for game number `trial`.
    fn seating<R: Rng + ?Sized>(&self, trial: usize, order_rng: &mut R) -> Vec<&dyn Strategy> {
        let mut seats: Vec<&dyn Strategy> =
            self.roster.iter().map(|strategy| &**strategy).collect();
        match self.order {
            TurnOrder::Shuffled => seats.shuffle(order_rng),
            TurnOrder::Fixed => {}
            TurnOrder::Rotating => {
                let len = seats.len();
                seats.rotate_left(trial % len);
            }
        }
        seats
    }

    fn empty_result(&self) -> TournamentResult {
        TournamentResult::new(self.roster_names())
    }

    /// Play every game from the injected generators, in sequence.
    ///
    /// # Errors
    ///
    /// Propagates the first engine failure.
    pub fn run_with<D, R>(
        &self,
        dice: &mut D,
        order_rng: &mut R,
    ) -> Result<TournamentResult, EngineError>
    where
        D: DiceSource + ?Sized,
        R: Rng + ?Sized,
    {
        log::info!(
            "tournament: {} games, {} strategies, {} seating",
            self.games,
            self.roster.len(),
            self.order
        );
        let mut result = self.empty_result();
        for trial in 0..self.games {
            let seats = self.seating(trial, order_rng);
            let record = run_game(&seats, dice)?;
            result.record(&record.outcome);
        }
        log::info!("tournament finished: {:?}", result.wins());
        Ok(result)
    }

    /// Play every game from streams derived from `seed`, optionally across
    /// the rayon pool. Results do not depend on `parallel`.
    ///
    /// # Errors
    ///
    /// Propagates the first engine failure.
    pub fn run_seeded(&self, seed: u64, parallel: bool) -> Result<TournamentResult, EngineError> {
        log::info!(
            "tournament: {} games, {} strategies, {} seating, seed {seed}{}",
            self.games,
            self.roster.len(),
            self.order,
            if parallel { ", parallel" } else { "" }
        );
        let play = |trial: usize| self.play_seeded_trial(seed, trial);
        let records: Vec<GameRecord> = if parallel {
            (0..self.games)
                .into_par_iter()
                .map(play)
                .collect::<Result<_, _>>()?
        } else {
            (0..self.games).map(play).collect::<Result<_, _>>()?
        };

        let mut result = self.empty_result();
        for record in &records {
            result.record(&record.outcome);
        }
        log::info!("tournament finished: {:?}", result.wins());
        Ok(result)
    }

    fn play_seeded_trial(&self, seed: u64, trial: usize) -> Result<GameRecord, EngineError> {
        let trial_id = usize_to_u64(trial);
        let mut dice = RngDice::seeded(trial_seed(seed, trial_id, Stream::Dice));
        let mut order_rng =
            ChaCha20Rng::seed_from_u64(trial_seed(seed, trial_id, Stream::SeatOrder));
        let seats = self.seating(trial, &mut order_rng);
        let record = run_game(&seats, &mut dice)?;
        log::debug!("trial {trial}: {:?}", record.outcome);
        Ok(record)
    }
}

fn winning_score_or_sentinel(record: &GameRecord) -> u32 {
    record
        .outcome
        .winning_score()
        .unwrap_or(QUALIFYING_SENTINEL)
}

/// Seat `players` copies of `strategy` and collect the winning score of each
/// of `games` games. An undecided game contributes the sentinel 31.
///
/// # Errors
///
/// Returns an error when `players` is zero or a turn fails.
pub fn run_single_strategy<S, D>(
    strategy: &S,
    players: usize,
    games: usize,
    dice: &mut D,
) -> Result<Vec<u32>, ExperimentError>
where
    S: Strategy + ?Sized,
    D: DiceSource + ?Sized,
{
    if players == 0 {
        return Err(ConfigError::ZeroPlayers.into());
    }
    log::info!(
        "single-strategy trial: {} x{players}, {games} games",
        strategy.name()
    );
    let seats: Vec<&S> = std::iter::repeat_n(strategy, players).collect();
    let mut scores = Vec::with_capacity(games);
    for _ in 0..games {
        let record = run_game(&seats, dice)?;
        scores.push(winning_score_or_sentinel(&record));
    }
    Ok(scores)
}

/// Seeded counterpart of [`run_single_strategy`]; one derived dice stream per
/// game, optionally played across the rayon pool.
///
/// # Errors
///
/// Returns an error when `players` is zero or a turn fails.
pub fn run_single_strategy_seeded<S>(
    strategy: &S,
    players: usize,
    games: usize,
    seed: u64,
    parallel: bool,
) -> Result<Vec<u32>, ExperimentError>
where
    S: Strategy + ?Sized,
{
    if players == 0 {
        return Err(ConfigError::ZeroPlayers.into());
    }
    log::info!(
        "single-strategy trial: {} x{players}, {games} games, seed {seed}",
        strategy.name()
    );
    let seats: Vec<&S> = std::iter::repeat_n(strategy, players).collect();
    let play = |trial: usize| -> Result<u32, EngineError> {
        let mut dice = RngDice::seeded(trial_seed(seed, usize_to_u64(trial), Stream::Dice));
        run_game(&seats, &mut dice).map(|record| winning_score_or_sentinel(&record))
    };
    let scores = if parallel {
        (0..games).into_par_iter().map(play).collect::<Result<_, _>>()?
    } else {
        (0..games).map(play).collect::<Result<_, _>>()?
    };
    Ok(scores)
}
