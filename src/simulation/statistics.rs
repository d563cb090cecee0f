//! Statistics report built from final trial counts.
//!
//! Rates carry the standard error `sqrt(p(1-p)/n)` and a 95% Wilson score
//! interval. Unlike the plain normal interval, the Wilson interval keeps a
//! nonzero width when a strategy won every round or none. The optional [`RateHistory`]
//! holds running rates sampled during the run, for plotting convergence.

use std::path::Path;

use serde::Serialize;

use crate::constants::{STAY_WIN_PROBABILITY, SWITCH_WIN_PROBABILITY, Z_95};
use crate::error::{Result, SimulationError};
use crate::types::{Pairing, Strategy};

use super::aggregator::TrialCounts;

// ── Top-level statistics ────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SimulationStatistics {
    pub trials: u64,
    pub seed: u64,
    pub pairing: Pairing,
    pub stay: StrategyStatistics,
    pub switch: StrategyStatistics,
    /// `switch.win_rate - stay.win_rate`.
    pub switch_advantage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<RateHistory>,
}

// ── Per-strategy statistics ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct StrategyStatistics {
    pub strategy: Strategy,
    pub wins: u64,
    pub trials: u64,
    pub win_rate: f64,
    pub expected_rate: f64,
    /// `win_rate - expected_rate`.
    pub deviation: f64,
    /// Normal-approximation standard error; zero when `win_rate` is 0 or 1.
    pub std_error: f64,
    /// 95% Wilson score interval, within [0, 1].
    pub ci95_low: f64,
    pub ci95_high: f64,
}

/// 95% Wilson score interval for `wins` successes out of `trials`.
/// `(0.0, 1.0)` when there are no trials.
pub fn wilson_interval(wins: u64, trials: u64) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 1.0);
    }
    let n = trials as f64;
    let p = wins as f64 / n;
    let z2 = Z_95 * Z_95;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let half = Z_95 / denom * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt();
    ((center - half).max(0.0), (center + half).min(1.0))
}

/// Theoretical win probability for `strategy`.
pub fn expected_rate(strategy: Strategy) -> f64 {
    match strategy {
        Strategy::Stay => STAY_WIN_PROBABILITY,
        Strategy::Switch => SWITCH_WIN_PROBABILITY,
    }
}

impl StrategyStatistics {
    pub fn from_counts(strategy: Strategy, counts: &TrialCounts) -> Self {
        let wins = counts.wins(strategy);
        let trials = counts.trials;
        let win_rate = counts.rate(strategy);
        let std_error = if trials == 0 {
            0.0
        } else {
            (win_rate * (1.0 - win_rate) / trials as f64).sqrt()
        };
        let expected = expected_rate(strategy);
        let (ci95_low, ci95_high) = wilson_interval(wins, trials);
        Self {
            strategy,
            wins,
            trials,
            win_rate,
            expected_rate: expected,
            deviation: win_rate - expected,
            std_error,
            ci95_low,
            ci95_high,
        }
    }

    /// Whether the 95% interval covers the theoretical rate.
    pub fn contains_expected(&self) -> bool {
        self.ci95_low <= self.expected_rate && self.expected_rate <= self.ci95_high
    }
}

// ── Running-rate history ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatePoint {
    pub trial: u64,
    pub stay_rate: f64,
    pub switch_rate: f64,
}

/// Running rates sampled every `every` trials, plus the last trial.
#[derive(Debug, Clone, Serialize)]
pub struct RateHistory {
    pub every: u64,
    pub points: Vec<RatePoint>,
    #[serde(skip)]
    total: u64,
}

impl RateHistory {
    /// Sample every `every` trials of a `total`-trial run.
    pub fn new(every: u64, total: u64) -> Result<Self> {
        if every == 0 {
            return Err(SimulationError::invalid_argument(
                "history interval must be a positive integer, got 0",
            ));
        }
        let capacity = (total / every + 1).min(1 << 20) as usize;
        Ok(Self {
            every,
            points: Vec::with_capacity(capacity),
            total,
        })
    }

    /// Feed the running counts after a trial. Usable directly as the
    /// progress callback of a run.
    pub fn observe(&mut self, counts: &TrialCounts) {
        if counts.trials == 0 {
            return;
        }
        if counts.trials % self.every == 0 || counts.trials == self.total {
            let (stay_rate, switch_rate) = counts.rates();
            self.points.push(RatePoint {
                trial: counts.trials,
                stay_rate,
                switch_rate,
            });
        }
    }
}

// ── Aggregation and output ──────────────────────────────────────────

pub fn aggregate_statistics(
    counts: &TrialCounts,
    seed: u64,
    pairing: Pairing,
    history: Option<RateHistory>,
) -> SimulationStatistics {
    let stay = StrategyStatistics::from_counts(Strategy::Stay, counts);
    let switch = StrategyStatistics::from_counts(Strategy::Switch, counts);
    SimulationStatistics {
        trials: counts.trials,
        seed,
        pairing,
        switch_advantage: switch.win_rate - stay.win_rate,
        stay,
        switch,
        history,
    }
}

/// Write `stats` as pretty JSON, creating the parent directory if needed.
pub fn save_statistics(stats: &SimulationStatistics, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(stats)?;
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "statistics written");
    Ok(())
}
