//! # Monty Hall Monte Carlo Simulator
//!
//! Estimates the win rates of the two Monty Hall strategies by simulation:
//! staying with the first pick wins 1/3 of the time, switching wins 2/3.
//!
//! ## Round
//!
//! | Step | Rust | Randomness |
//! |------|------|------------|
//! | 1. Place the prize behind one of three doors | [`types::DoorArrangement::random`] | uniform |
//! | 2. Player picks a door | [`simulation::round::deal`] | uniform |
//! | 3. Host opens an empty, unpicked door | [`simulation::round::Revealable::choose`] | forced, or a coin flip |
//! | 4. Final choice: stay or switch | [`simulation::round::final_choice`] | none |
//! | 5. Outcome: final choice == prize | [`simulation::round::Deal::outcome`] | none |
//!
//! ## Trials
//!
//! [`simulation::TrialAggregator`] plays N trials against an injected RNG
//! and reports `(stay_rate, switch_rate)`. Zero trials is rejected with
//! [`error::SimulationError::InvalidArgument`] before any round runs. Running
//! counts are available after every trial for live display.
//! [`simulation::run_parallel`] spreads trials over rayon with one seeded
//! `SmallRng` per trial.
//!
//! ## Pairing
//!
//! By default the two strategies play independently dealt rounds
//! ([`types::Pairing::Unpaired`]). [`types::Pairing::Paired`] scores one deal
//! under both strategies instead.

pub mod constants;
pub mod env_config;
pub mod error;
pub mod prompt;
pub mod simulation;
pub mod types;

pub use error::{Result, SimulationError};
