//! Summary statistics over winning-score sequences.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::numbers::{ratio, usize_to_u64};

/// Welford accumulator for mean and sample variance.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunningStats {
    count: u32,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    pub fn add(&mut self, value: f64) {
        self.count = self.count.saturating_add(1);
        let count = f64::from(self.count);
        let delta = value - self.mean;
        self.mean += delta / count;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub const fn mean(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.mean }
    }

    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.count > 1 {
            self.m2 / f64::from(self.count - 1)
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Distribution of a winning-score sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub count: u64,
    pub mean: f64,
    pub std_dev: f64,
    pub min: Option<u32>,
    pub max: Option<u32>,
    /// Occurrences per score, ascending by score.
    pub histogram: BTreeMap<u32, u64>,
}

impl ScoreSummary {
    #[must_use]
    pub fn from_scores(scores: &[u32]) -> Self {
        let mut stats = RunningStats::default();
        let mut histogram = BTreeMap::new();
        for &score in scores {
            stats.add(f64::from(score));
            *histogram.entry(score).or_insert(0u64) += 1;
        }
        Self {
            count: usize_to_u64(scores.len()),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
            min: histogram.keys().next().copied(),
            max: histogram.keys().next_back().copied(),
            histogram,
        }
    }

    /// Share of games won with exactly `score`.
    #[must_use]
    pub fn frequency(&self, score: u32) -> f64 {
        ratio(self.histogram.get(&score).copied().unwrap_or(0), self.count)
    }
}

/// Percentage of `total` games won.
#[must_use]
pub fn win_share(wins: u64, total: u64) -> f64 {
    ratio(wins, total) * 100.0
}
