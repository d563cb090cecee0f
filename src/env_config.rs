//! Shared environment configuration for the `montyhall-simulate` binary.
//!
//! Consolidates `MONTYHALL_SEED`, `MONTYHALL_LOG` and `RAYON_NUM_THREADS`
//! reads. Command-line flags take precedence over these values.

use tracing_subscriber::EnvFilter;

use crate::constants::DEFAULT_SEED;

/// Install the stderr `tracing` subscriber. Filter from `MONTYHALL_LOG`,
/// falling back to `RUST_LOG`, then `warn`. A second call is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("MONTYHALL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Read `MONTYHALL_SEED` (default [`DEFAULT_SEED`]).
pub fn default_seed() -> u64 {
    parse_seed(std::env::var("MONTYHALL_SEED").ok().as_deref())
}

fn parse_seed(raw: Option<&str>) -> u64 {
    match raw {
        Some(s) => s.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(value = s, "ignoring unparsable MONTYHALL_SEED");
            DEFAULT_SEED
        }),
        None => DEFAULT_SEED,
    }
}

/// Read `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`, default 8) and
/// build the rayon global pool. Tolerates an already-initialized pool.
/// Returns thread count.
pub fn init_rayon_threads() -> usize {
    let num_threads = std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
    {
        tracing::debug!("rayon global pool already set: {e}");
    }
    tracing::debug!(num_threads, "rayon threads");
    num_threads
}
