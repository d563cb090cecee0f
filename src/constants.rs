//! Game constants.
//!
//! Door positions are plain `usize` indices in `0..DOOR_COUNT`. The three-door
//! game is fixed: [`DOOR_COUNT`] is not a tunable, and several routines rely on
//! the identity `0 + 1 + 2 = 3` to find "the other door".

/// Number of doors in the classic game.
pub const DOOR_COUNT: usize = 3;

/// Sum of all door indices (0 + 1 + 2). The third door of any pair `(a, b)`
/// with `a != b` is `DOOR_INDEX_SUM - a - b`.
pub const DOOR_INDEX_SUM: usize = 3;

/// Win probability when staying with the first pick.
pub const STAY_WIN_PROBABILITY: f64 = 1.0 / 3.0;

/// Win probability when switching after the reveal.
pub const SWITCH_WIN_PROBABILITY: f64 = 2.0 / 3.0;

/// Default RNG seed for reproducible runs.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of trials when none is given.
pub const DEFAULT_TRIALS: u64 = 1000;

/// Lower bound accepted by the interactive prompt.
pub const PROMPT_MIN_TRIALS: u64 = 100;

/// Upper bound accepted by the interactive prompt.
pub const PROMPT_MAX_TRIALS: u64 = 10_000;

/// Attempts the interactive prompt allows before giving up.
pub const PROMPT_MAX_ATTEMPTS: usize = 5;

/// z-score for a two-sided 95% normal confidence interval.
pub const Z_95: f64 = 1.959_963_984_540_054;

/// The door other than `a` and `b`. Requires `a != b`, both in `0..DOOR_COUNT`.
#[inline(always)]
pub fn remaining_door(a: usize, b: usize) -> usize {
    debug_assert!(a != b && a < DOOR_COUNT && b < DOOR_COUNT);
    DOOR_INDEX_SUM - a - b
}
