//! Trial aggregation: run N trials per strategy and tally wins.
//!
//! A trial scores one STAY round and one SWITCH round. In
//! [`Pairing::Unpaired`] mode (the default) the two rounds are dealt
//! independently, so the strategies never see the same arrangement. In
//! [`Pairing::Paired`] mode a single deal is scored under both strategies,
//! which removes the between-strategy noise but makes the two counts
//! complementary (`stay_wins + switch_wins == trials`).
//!
//! ## Parallel mode
//!
//! [`run_parallel`] gives trial `i` its own `SmallRng` seeded with
//! `seed + i` and sums per-trial counts with [`TrialCounts::merge`]. Results
//! depend only on `(trials, seed, pairing)`, not on the thread count.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Result, SimulationError};
use crate::types::{Pairing, Strategy};

use super::round::{deal, RoundSimulator};

/// Running win counters for both strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrialCounts {
    /// Completed trials (the denominator for both rates).
    pub trials: u64,
    pub stay_wins: u64,
    pub switch_wins: u64,
}

impl TrialCounts {
    /// Counts for a single completed trial.
    #[inline(always)]
    pub fn single(stay_won: bool, switch_won: bool) -> Self {
        Self {
            trials: 1,
            stay_wins: stay_won as u64,
            switch_wins: switch_won as u64,
        }
    }

    #[inline(always)]
    pub fn record(&mut self, stay_won: bool, switch_won: bool) {
        self.trials += 1;
        self.stay_wins += stay_won as u64;
        self.switch_wins += switch_won as u64;
    }

    /// Field-wise sum. Associative and commutative, with `default()` as identity.
    #[inline(always)]
    pub fn merge(self, other: Self) -> Self {
        Self {
            trials: self.trials + other.trials,
            stay_wins: self.stay_wins + other.stay_wins,
            switch_wins: self.switch_wins + other.switch_wins,
        }
    }

    pub fn wins(&self, strategy: Strategy) -> u64 {
        match strategy {
            Strategy::Stay => self.stay_wins,
            Strategy::Switch => self.switch_wins,
        }
    }

    /// Win rate so far. Zero before the first trial completes.
    pub fn rate(&self, strategy: Strategy) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.wins(strategy) as f64 / self.trials as f64
    }

    pub fn stay_rate(&self) -> f64 {
        self.rate(Strategy::Stay)
    }

    pub fn switch_rate(&self) -> f64 {
        self.rate(Strategy::Switch)
    }

    /// `(stay_rate, switch_rate)`.
    pub fn rates(&self) -> (f64, f64) {
        (self.stay_rate(), self.switch_rate())
    }
}

fn ensure_positive(trials: u64) -> Result<()> {
    if trials == 0 {
        return Err(SimulationError::invalid_argument(
            "trials must be a positive integer, got 0",
        ));
    }
    Ok(())
}

/// Play one trial against a bare RNG: `(stay_won, switch_won)`. Used by
/// [`run_parallel`], where every trial owns its own generator.
#[inline(always)]
pub fn play_trial<R: Rng + ?Sized>(rng: &mut R, pairing: Pairing) -> (bool, bool) {
    match pairing {
        Pairing::Unpaired => {
            let stay = deal(rng).outcome(Strategy::Stay);
            let switch = deal(rng).outcome(Strategy::Switch);
            (stay, switch)
        }
        Pairing::Paired => {
            let d = deal(rng);
            (d.outcome(Strategy::Stay), d.outcome(Strategy::Switch))
        }
    }
}

/// Sequential aggregator over an injected random source.
pub struct TrialAggregator<R> {
    simulator: RoundSimulator<R>,
    pairing: Pairing,
}

impl TrialAggregator<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TrialAggregator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            simulator: RoundSimulator::new(rng),
            pairing: Pairing::default(),
        }
    }

    pub fn with_pairing(mut self, pairing: Pairing) -> Self {
        self.pairing = pairing;
        self
    }

    /// Empirical `(stay_rate, switch_rate)` over `trials` trials.
    pub fn run(&mut self, trials: u64) -> Result<(f64, f64)> {
        Ok(self.run_counts(trials)?.rates())
    }

    pub fn run_counts(&mut self, trials: u64) -> Result<TrialCounts> {
        self.run_with_progress(trials, |_| {})
    }

    /// Like [`Self::run_counts`], calling `on_trial` with the running counts
    /// after every completed trial.
    pub fn run_with_progress<F>(&mut self, trials: u64, mut on_trial: F) -> Result<TrialCounts>
    where
        F: FnMut(&TrialCounts),
    {
        ensure_positive(trials)?;
        tracing::debug!(trials, pairing = ?self.pairing, "starting sequential run");

        let mut counts = TrialCounts::default();
        for _ in 0..trials {
            let (stay, switch) = self.play_trial();
            counts.record(stay, switch);
            on_trial(&counts);
        }

        tracing::debug!(
            trials = counts.trials,
            stay_wins = counts.stay_wins,
            switch_wins = counts.switch_wins,
            "sequential run complete"
        );
        Ok(counts)
    }

    /// One trial through the round simulator. Unpaired trials play a fresh
    /// round per strategy; paired trials score a single deal twice.
    fn play_trial(&mut self) -> (bool, bool) {
        match self.pairing {
            Pairing::Unpaired => (
                self.simulator.play_round(Strategy::Stay),
                self.simulator.play_round(Strategy::Switch),
            ),
            Pairing::Paired => {
                let d = self.simulator.deal();
                (d.outcome(Strategy::Stay), d.outcome(Strategy::Switch))
            }
        }
    }
}

/// Run `trials` trials across the rayon pool. Trial `i` is seeded with
/// `seed.wrapping_add(i)`.
pub fn run_parallel(trials: u64, seed: u64, pairing: Pairing) -> Result<TrialCounts> {
    ensure_positive(trials)?;
    tracing::debug!(trials, seed, ?pairing, "starting parallel run");

    let counts = (0..trials)
        .into_par_iter()
        .map(|i| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i));
            let (stay, switch) = play_trial(&mut rng, pairing);
            TrialCounts::single(stay, switch)
        })
        .reduce(TrialCounts::default, TrialCounts::merge);

    tracing::debug!(
        trials = counts.trials,
        stay_wins = counts.stay_wins,
        switch_wins = counts.switch_wins,
        "parallel run complete"
    );
    Ok(counts)
}
