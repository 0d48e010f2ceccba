//! Named catalogue of the built-in strategies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_TURN_SCORE;
use crate::error::ConfigError;
use crate::strategy::{
    Only3OrLowest, Only31OrLowest, Only312OrLowest, PremeditatedTarget, Strategy,
    TakeHigherDiceLater1, TakeHigherDiceLater2, TakeHigherDiceLater3, TakeHigherDiceLater4,
};

const PREMEDITATED_PREFIX: &str = "PremeditatedTarget";

/// Identifier of a built-in strategy, serialized as its display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StrategyId {
    Only3OrLowest,
    Only31OrLowest,
    Only312OrLowest,
    TakeHigherDiceLater1,
    TakeHigherDiceLater2,
    TakeHigherDiceLater3,
    TakeHigherDiceLater4,
    PremeditatedTarget(u32),
}

impl StrategyId {
    /// Variants without parameters, in catalogue order.
    pub const FIXED: [Self; 7] = [
        Self::Only3OrLowest,
        Self::Only31OrLowest,
        Self::Only312OrLowest,
        Self::TakeHigherDiceLater1,
        Self::TakeHigherDiceLater2,
        Self::TakeHigherDiceLater3,
        Self::TakeHigherDiceLater4,
    ];

    /// The thirteen-way line-up: every fixed variant plus premeditated
    /// targets one through six.
    #[must_use]
    pub fn default_roster() -> Vec<Self> {
        Self::FIXED
            .into_iter()
            .chain((1..=6).map(Self::PremeditatedTarget))
            .collect()
    }

    #[must_use]
    pub fn create(self) -> Box<dyn Strategy> {
        match self {
            Self::Only3OrLowest => Box::new(Only3OrLowest),
            Self::Only31OrLowest => Box::new(Only31OrLowest),
            Self::Only312OrLowest => Box::new(Only312OrLowest),
            Self::TakeHigherDiceLater1 => Box::new(TakeHigherDiceLater1),
            Self::TakeHigherDiceLater2 => Box::new(TakeHigherDiceLater2),
            Self::TakeHigherDiceLater3 => Box::new(TakeHigherDiceLater3),
            Self::TakeHigherDiceLater4 => Box::new(TakeHigherDiceLater4),
            Self::PremeditatedTarget(target) => Box::new(PremeditatedTarget::new(target)),
        }
    }

    /// Family name of the variant; premeditated targets share one label and
    /// only their display name carries the target.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Only3OrLowest => "Only3OrLowest",
            Self::Only31OrLowest => "Only31OrLowest",
            Self::Only312OrLowest => "Only312OrLowest",
            Self::TakeHigherDiceLater1 => "TakeHigherDiceLater1",
            Self::TakeHigherDiceLater2 => "TakeHigherDiceLater2",
            Self::TakeHigherDiceLater3 => "TakeHigherDiceLater3",
            Self::TakeHigherDiceLater4 => "TakeHigherDiceLater4",
            Self::PremeditatedTarget(_) => PREMEDITATED_PREFIX,
        }
    }

    /// One-line explanation for listings.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Only3OrLowest => "keep threes, else the lowest die",
            Self::Only31OrLowest => "keep threes and ones, else the lowest die",
            Self::Only312OrLowest => "keep threes, ones and twos, else the lowest die",
            Self::TakeHigherDiceLater1 => "ones from 4 dice left, twos from 3",
            Self::TakeHigherDiceLater2 => "ones from 4 dice left, twos from 2",
            Self::TakeHigherDiceLater3 => "ones from 3 dice left, twos from 2",
            Self::TakeHigherDiceLater4 => "ones from 3 dice left, never twos",
            Self::PremeditatedTarget(_) => {
                "TakeHigherDiceLater3 aiming low while more than 5 players remain"
            }
        }
    }
}

/// Instantiate a roster in the given order.
#[must_use]
pub fn build_roster(ids: &[StrategyId]) -> Vec<Box<dyn Strategy>> {
    ids.iter().map(|id| id.create()).collect()
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PremeditatedTarget(target) => write!(f, "{}{target}", self.label()),
            _ => f.write_str(self.label()),
        }
    }
}

impl FromStr for StrategyId {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = raw.trim();
        if let Some(fixed) = Self::FIXED
            .into_iter()
            .find(|id| id.label().eq_ignore_ascii_case(token))
        {
            return Ok(fixed);
        }

        let unknown = || ConfigError::UnknownStrategy {
            name: token.to_string(),
        };
        let prefix_len = PREMEDITATED_PREFIX.len();
        let (prefix, digits) = token
            .split_at_checked(prefix_len)
            .ok_or_else(unknown)?;
        if !prefix.eq_ignore_ascii_case(PREMEDITATED_PREFIX)
            || digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(unknown());
        }
        let target: u32 = digits
            .parse()
            .map_err(|_| ConfigError::InvalidPremeditatedTarget { value: u32::MAX })?;
        if target > MAX_TURN_SCORE {
            return Err(ConfigError::InvalidPremeditatedTarget { value: target });
        }
        Ok(Self::PremeditatedTarget(target))
    }
}

impl From<StrategyId> for String {
    fn from(id: StrategyId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for StrategyId {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
