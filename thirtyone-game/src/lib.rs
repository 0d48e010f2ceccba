//! Thirty-One Game Engine
//!
//! Simulation core for the Thirty-One dice game: five dice, threes count as
//! zero, and the lowest qualifying turn wins. This crate holds the dice
//! abstraction, the strategy catalogue, the turn and game engines, and the
//! experiment runners that aggregate many games into statistics.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod dice;
pub mod error;
pub mod experiment;
pub mod game;
pub mod numbers;
pub mod seed;
pub mod stats;
pub mod strategy;
pub mod turn;

// Re-export commonly used types
pub use catalog::{StrategyId, build_roster};
pub use config::{ExperimentConfig, TurnOrder};
pub use dice::{DiceSource, RngDice, RollSet, ScriptedDice};
pub use error::{ConfigError, DiceError, EngineError, ExperimentError};
pub use experiment::{
    Tournament, TournamentResult, run_single_strategy, run_single_strategy_seeded,
};
pub use game::{GameOutcome, GameRecord, run_game};
pub use seed::{Stream, derive_stream_seed, trial_seed};
pub use stats::{RunningStats, ScoreSummary, win_share};
pub use strategy::{
    KeeperSet, Only3OrLowest, Only31OrLowest, Only312OrLowest, PremeditatedTarget, Strategy,
    TakeHigherDiceLater1, TakeHigherDiceLater2, TakeHigherDiceLater3, TakeHigherDiceLater4,
    TurnContext, keep_designated_or_lowest,
};
pub use turn::{TurnStep, TurnTrace, run_turn, run_turn_traced};
