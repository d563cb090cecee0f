//! End-to-end tests: convergence, seeding, and the JSON report.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use montyhall::simulation::{
    aggregate_statistics, run_parallel, save_statistics, RateHistory, TrialAggregator,
};
use montyhall::types::Pairing;
use montyhall::SimulationError;

const TOLERANCE: f64 = 0.02;

fn assert_converged(stay: f64, switch: f64) {
    assert!(
        (stay - 1.0 / 3.0).abs() < TOLERANCE,
        "stay rate {stay:.4} not within {TOLERANCE} of 1/3"
    );
    assert!(
        (switch - 2.0 / 3.0).abs() < TOLERANCE,
        "switch rate {switch:.4} not within {TOLERANCE} of 2/3"
    );
}

#[test]
fn unpaired_run_converges() {
    let mut agg = TrialAggregator::new(SmallRng::seed_from_u64(42));
    let (stay, switch) = agg.run(200_000).unwrap();
    assert_converged(stay, switch);
}

#[test]
fn paired_run_converges() {
    let mut agg = TrialAggregator::seeded(2024).with_pairing(Pairing::Paired);
    let (stay, switch) = agg.run(200_000).unwrap();
    assert_converged(stay, switch);
}

#[test]
fn parallel_run_converges() {
    let counts = run_parallel(200_000, 42, Pairing::Unpaired).unwrap();
    assert_eq!(counts.trials, 200_000);
    let (stay, switch) = counts.rates();
    assert_converged(stay, switch);
}

#[test]
fn same_seed_same_counts() {
    let a = TrialAggregator::seeded(5).run_counts(10_000).unwrap();
    let b = TrialAggregator::seeded(5).run_counts(10_000).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        run_parallel(10_000, 5, Pairing::Paired).unwrap(),
        run_parallel(10_000, 5, Pairing::Paired).unwrap()
    );
}

#[test]
fn zero_trials_is_invalid_argument() {
    let err = TrialAggregator::seeded(1).run(0).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidArgument { .. }));
    let err = montyhall::error::validate_trials(-5).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidArgument { .. }));
}

#[test]
fn statistics_cover_expected_rates() {
    let counts = TrialAggregator::seeded(42).run_counts(200_000).unwrap();
    let stats = aggregate_statistics(&counts, 42, Pairing::Unpaired, None);
    assert!(stats.switch_advantage > 0.3 && stats.switch_advantage < 0.37);
    assert!(stats.stay.std_error < 0.002);
    assert!(stats.switch.std_error < 0.002);
}

#[test]
fn report_written_as_json() {
    let trials = 1_000;
    let mut history = RateHistory::new(250, trials).unwrap();
    let counts = TrialAggregator::seeded(8)
        .run_with_progress(trials, |c| history.observe(c))
        .unwrap();
    let stats = aggregate_statistics(&counts, 8, Pairing::Unpaired, Some(history));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("statistics.json");
    save_statistics(&stats, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["trials"], 1_000);
    assert_eq!(json["seed"], 8);
    assert_eq!(json["pairing"], "unpaired");
    assert_eq!(json["stay"]["wins"], counts.stay_wins);
    assert_eq!(json["switch"]["wins"], counts.switch_wins);

    let points = json["history"]["points"].as_array().unwrap();
    let sampled: Vec<u64> = points
        .iter()
        .map(|p| p["trial"].as_u64().unwrap())
        .collect();
    assert_eq!(sampled, vec![250, 500, 750, 1_000]);
    assert_eq!(
        points.last().unwrap()["switch_rate"].as_f64().unwrap(),
        counts.switch_rate()
    );
}
