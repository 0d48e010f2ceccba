//! Experiment configuration.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::StrategyId;
use crate::constants::{DEFAULT_GAMES, DEFAULT_PLAYERS, DEFAULT_SEED};
use crate::error::ConfigError;

/// How seats are arranged before each game of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TurnOrder {
    /// Fresh uniform permutation every game.
    #[default]
    Shuffled,
    /// Roster order every game.
    Fixed,
    /// Roster rotated left by the game index.
    Rotating,
}

impl TurnOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shuffled => "shuffled",
            Self::Fixed => "fixed",
            Self::Rotating => "rotating",
        }
    }
}

impl fmt::Display for TurnOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TurnOrder {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "shuffled" => Ok(Self::Shuffled),
            "fixed" => Ok(Self::Fixed),
            "rotating" => Ok(Self::Rotating),
            other => Err(ConfigError::Parse {
                message: format!("unknown turn order `{other}`"),
            }),
        }
    }
}

/// Parameters of one batch experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    #[serde(default = "ExperimentConfig::default_games")]
    pub games: usize,
    /// Seats filled by the single strategy in single-strategy trials.
    #[serde(default = "ExperimentConfig::default_players")]
    pub players: usize,
    #[serde(default = "ExperimentConfig::default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub order: TurnOrder,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default = "StrategyId::default_roster")]
    pub strategies: Vec<StrategyId>,
}

impl ExperimentConfig {
    const fn default_games() -> usize {
        DEFAULT_GAMES
    }

    const fn default_players() -> usize {
        DEFAULT_PLAYERS
    }

    const fn default_seed() -> u64 {
        DEFAULT_SEED
    }

    /// Parse a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown strategy
    /// names, or any validation error.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw).map_err(|err| ConfigError::Parse {
            message: err.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.games == 0 {
            return Err(ConfigError::ZeroGames);
        }
        if self.players == 0 {
            return Err(ConfigError::ZeroPlayers);
        }
        if self.strategies.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        let mut seen = HashSet::with_capacity(self.strategies.len());
        for id in &self.strategies {
            if !seen.insert(*id) {
                return Err(ConfigError::DuplicateStrategy {
                    name: id.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            games: Self::default_games(),
            players: Self::default_players(),
            seed: Self::default_seed(),
            order: TurnOrder::default(),
            parallel: false,
            strategies: StrategyId::default_roster(),
        }
    }
}
