//! Error types shared across the engine.

use thiserror::Error;

/// Failures raised by a [`crate::dice::DiceSource`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiceError {
    #[error("dice count must be at least 1 (got {count})")]
    InvalidCount { count: usize },
    #[error("die face {face} is outside 1..=6")]
    InvalidFace { face: u8 },
    #[error("scripted dice need at least one face")]
    EmptyScript,
}

/// Failures raised while playing turns and games.
///
/// Keeper-set violations indicate a broken [`crate::strategy::Strategy`]
/// implementation and are never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("strategy {strategy} kept no dice")]
    EmptyKeepers { strategy: String },
    #[error("strategy {strategy} kept {kept} dice with only {remaining} in play")]
    TooManyKeepers {
        strategy: String,
        kept: usize,
        remaining: usize,
    },
    #[error("strategy {strategy} kept invalid value {value}")]
    InvalidKeeper { strategy: String, value: u8 },
    #[error("strategy {strategy} kept {value}, which the throw cannot supply")]
    ForgedKeeper { strategy: String, value: u8 },
    #[error(transparent)]
    Dice(#[from] DiceError),
}

/// Errors raised when experiment configuration invariants are violated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("roster must contain at least one strategy")]
    EmptyRoster,
    #[error("strategy {name} appears more than once in the roster")]
    DuplicateStrategy { name: String },
    #[error("games must be at least 1")]
    ZeroGames,
    #[error("players must be at least 1")]
    ZeroPlayers,
    #[error("unknown strategy: {name}")]
    UnknownStrategy { name: String },
    #[error("premeditated target must be between 0 and 30 (got {value})")]
    InvalidPremeditatedTarget { value: u32 },
    #[error("failed to parse experiment config: {message}")]
    Parse { message: String },
}

/// Top-level failure of an experiment run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExperimentError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = EngineError::TooManyKeepers {
            strategy: "Greedy".to_string(),
            kept: 4,
            remaining: 2,
        };
        assert_eq!(
            err.to_string(),
            "strategy Greedy kept 4 dice with only 2 in play"
        );
        let dice: EngineError = DiceError::InvalidCount { count: 0 }.into();
        assert!(dice.to_string().contains("at least 1"));
    }

    #[test]
    fn experiment_error_wraps_sources() {
        let err: ExperimentError = ConfigError::EmptyRoster.into();
        assert!(matches!(err, ExperimentError::Config(ConfigError::EmptyRoster)));
    }
}
