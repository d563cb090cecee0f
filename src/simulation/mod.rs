//! Round simulation, trial aggregation and statistics.
//!
//! - [`round`]: one round of the three-door game under a fixed strategy
//! - [`aggregator`]: N-trial runs with running counts (sequential and rayon)
//! - [`statistics`]: rates, confidence intervals and the JSON report

pub mod aggregator;
pub mod round;
pub mod statistics;

// Re-export commonly used items
pub use aggregator::{play_trial, run_parallel, TrialAggregator, TrialCounts};
pub use round::{deal, final_choice, revealable_doors, Deal, Revealable, RoundSimulator};
pub use statistics::{
    aggregate_statistics, expected_rate, save_statistics, wilson_interval, RateHistory, RatePoint,
    SimulationStatistics, StrategyStatistics,
};
