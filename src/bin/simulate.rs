use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use montyhall::constants::{DEFAULT_TRIALS, PROMPT_MAX_ATTEMPTS};
use montyhall::error::validate_trials;
use montyhall::prompt::{prompt_trials, PromptOutcome};
use montyhall::simulation::{
    aggregate_statistics, run_parallel, save_statistics, RateHistory, SimulationStatistics,
    TrialAggregator, TrialCounts,
};
use montyhall::types::Pairing;
use montyhall::Result;

/// Monte Carlo simulation of the Monty Hall problem.
#[derive(Parser, Debug)]
#[command(name = "montyhall-simulate", version)]
struct Args {
    /// Number of trials (default: 1000, or ask with --interactive)
    #[arg(long, allow_negative_numbers = true)]
    trials: Option<i64>,

    /// RNG seed (default: $MONTYHALL_SEED or 42)
    #[arg(long)]
    seed: Option<u64>,

    /// Score one deal under both strategies instead of independent deals
    #[arg(long)]
    paired: bool,

    /// Spread trials over the rayon pool (RAYON_NUM_THREADS)
    #[arg(long, conflicts_with_all = ["progress", "history_every"])]
    parallel: bool,

    /// Show running win rates while the simulation runs
    #[arg(long)]
    progress: bool,

    /// Record running rates every K trials into the report
    #[arg(long, value_name = "K")]
    history_every: Option<u64>,

    /// Write the statistics report as JSON to PATH
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Ask for the trial count when --trials is absent
    #[arg(long)]
    interactive: bool,
}

fn resolve_trials(args: &Args) -> Result<Option<u64>> {
    if let Some(raw) = args.trials {
        return validate_trials(raw).map(Some);
    }
    if !args.interactive {
        return Ok(Some(DEFAULT_TRIALS));
    }
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut stdout = std::io::stdout();
    match prompt_trials(&mut input, &mut stdout, PROMPT_MAX_ATTEMPTS)? {
        PromptOutcome::Trials(n) => Ok(Some(n)),
        PromptOutcome::Quit => Ok(None),
    }
}

/// Overwrite a single stderr status line with the running rates.
fn render_progress(counts: &TrialCounts, total: u64) {
    let (stay, switch) = counts.rates();
    eprint!(
        "\r  Trial {}/{}  stay {:6.2}%  switch {:6.2}%  delta {:+6.2}%",
        counts.trials,
        total,
        stay * 100.0,
        switch * 100.0,
        (switch - stay) * 100.0
    );
    let _ = std::io::stderr().flush();
}

fn simulate(args: &Args, trials: u64, seed: u64, pairing: Pairing) -> Result<SimulationStatistics> {
    if args.parallel {
        let num_threads = montyhall::env_config::init_rayon_threads();
        println!("  Threads:     {}", num_threads);
        let counts = run_parallel(trials, seed, pairing)?;
        return Ok(aggregate_statistics(&counts, seed, pairing, None));
    }

    let mut history = match args.history_every {
        Some(every) => Some(RateHistory::new(every, trials)?),
        None => None,
    };
    let refresh = (trials / 100).max(1);
    let mut aggregator = TrialAggregator::seeded(seed).with_pairing(pairing);
    let counts = aggregator.run_with_progress(trials, |c| {
        if let Some(h) = history.as_mut() {
            h.observe(c);
        }
        if args.progress && (c.trials % refresh == 0 || c.trials == trials) {
            render_progress(c, trials);
        }
    })?;
    if args.progress {
        eprintln!();
    }
    Ok(aggregate_statistics(&counts, seed, pairing, history))
}

fn run(args: Args) -> Result<()> {
    let Some(trials) = resolve_trials(&args)? else {
        println!("Bye.");
        return Ok(());
    };
    let seed = args.seed.unwrap_or_else(montyhall::env_config::default_seed);
    let pairing = if args.paired {
        Pairing::Paired
    } else {
        Pairing::Unpaired
    };

    println!("Monty Hall Simulation ({} trials)", trials);
    println!("  Seed:        {}", seed);
    println!("  Pairing:     {:?}", pairing);

    let start = Instant::now();
    let stats = simulate(&args, trials, seed, pairing)?;
    let elapsed = start.elapsed();

    println!("  Elapsed:     {:.1} ms", elapsed.as_secs_f64() * 1000.0);
    println!();
    println!("Results:");
    for s in [&stats.stay, &stats.switch] {
        println!(
            "  Win rate ({:<6}): {:6.2}%  ({} / {}, 95% CI {:.2}%..{:.2}%, expected {:.2}%)",
            s.strategy.name(),
            s.win_rate * 100.0,
            s.wins,
            s.trials,
            s.ci95_low * 100.0,
            s.ci95_high * 100.0,
            s.expected_rate * 100.0
        );
    }
    println!("  Switch advantage: {:+.2}%", stats.switch_advantage * 100.0);

    if let Some(ref path) = args.output {
        save_statistics(&stats, path)?;
        println!("  Statistics:  {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    montyhall::env_config::init_logging();
    let args = Args::parse();
    tracing::debug!(?args, "parsed arguments");
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
