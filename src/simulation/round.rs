//! Single-round simulation: deal → pick → reveal → final choice → outcome.
//!
//! The host's reveal is a two-case decision. If the first pick is wrong,
//! exactly one door is neither the pick nor the prize, so the reveal is
//! forced. If the pick is right, both other doors are empty and the host
//! chooses between them uniformly. The host's choice never changes the
//! outcome under either strategy, but it still consumes a random draw.
//!
//! Only the deal draws randomness. Once a [`Deal`] exists, the final choice
//! and the outcome are pure functions of it and the strategy.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::constants::{remaining_door, DOOR_COUNT};
use crate::types::{DoorArrangement, RoundRecord, Strategy};

/// Doors the host may open for a given prize position and first pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Revealable {
    /// The pick was wrong: one empty, unpicked door remains.
    Forced(usize),
    /// The pick was right: both other doors are empty (ascending order).
    Either(usize, usize),
}

impl Revealable {
    pub fn candidate_count(&self) -> usize {
        match self {
            Revealable::Forced(_) => 1,
            Revealable::Either(..) => 2,
        }
    }

    pub fn contains(&self, door: usize) -> bool {
        match *self {
            Revealable::Forced(d) => d == door,
            Revealable::Either(a, b) => a == door || b == door,
        }
    }

    pub fn to_vec(&self) -> Vec<usize> {
        match *self {
            Revealable::Forced(d) => vec![d],
            Revealable::Either(a, b) => vec![a, b],
        }
    }

    /// Pick the host's door. Draws from `rng` only in the [`Revealable::Either`] case.
    #[inline(always)]
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match *self {
            Revealable::Forced(d) => d,
            Revealable::Either(a, b) => {
                if rng.random_bool(0.5) {
                    a
                } else {
                    b
                }
            }
        }
    }
}

/// Positions that are neither the player's pick nor the prize.
#[inline(always)]
pub fn revealable_doors(prize: usize, choice: usize) -> Revealable {
    debug_assert!(prize < DOOR_COUNT && choice < DOOR_COUNT);
    if prize == choice {
        let a = (choice + 1) % DOOR_COUNT;
        let b = (choice + 2) % DOOR_COUNT;
        Revealable::Either(a.min(b), a.max(b))
    } else {
        Revealable::Forced(remaining_door(prize, choice))
    }
}

/// Final door under `strategy`. No randomness.
#[inline(always)]
pub fn final_choice(strategy: Strategy, initial_choice: usize, reveal: usize) -> usize {
    match strategy {
        Strategy::Stay => initial_choice,
        Strategy::Switch => remaining_door(initial_choice, reveal),
    }
}

/// Arrangement, first pick and host reveal for one round, before the
/// strategy is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deal {
    pub arrangement: DoorArrangement,
    pub initial_choice: usize,
    pub reveal: usize,
}

impl Deal {
    /// Build a deal from fixed positions.
    ///
    /// Returns `None` if any position is out of range, or the reveal is the
    /// prize or the pick.
    pub fn new(prize: usize, initial_choice: usize, reveal: usize) -> Option<Self> {
        let arrangement = DoorArrangement::with_prize(prize)?;
        if initial_choice >= DOOR_COUNT {
            return None;
        }
        if !revealable_doors(prize, initial_choice).contains(reveal) {
            return None;
        }
        Some(Self {
            arrangement,
            initial_choice,
            reveal,
        })
    }

    #[inline(always)]
    pub fn prize(&self) -> usize {
        self.arrangement.prize_position()
    }

    #[inline(always)]
    pub fn final_choice(&self, strategy: Strategy) -> usize {
        final_choice(strategy, self.initial_choice, self.reveal)
    }

    #[inline(always)]
    pub fn outcome(&self, strategy: Strategy) -> bool {
        self.final_choice(strategy) == self.prize()
    }

    pub fn record(&self, strategy: Strategy) -> RoundRecord {
        let final_choice = self.final_choice(strategy);
        RoundRecord {
            strategy,
            prize: self.prize(),
            initial_choice: self.initial_choice,
            reveal: self.reveal,
            final_choice,
            won: final_choice == self.prize(),
        }
    }
}

/// Deal one round: place the prize, draw the pick, let the host reveal.
#[inline(always)]
pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Deal {
    let arrangement = DoorArrangement::random(rng);
    let initial_choice = rng.random_range(0..DOOR_COUNT);
    let reveal = revealable_doors(arrangement.prize_position(), initial_choice).choose(rng);
    tracing::trace!(
        prize = arrangement.prize_position(),
        initial_choice,
        reveal,
        "round dealt"
    );
    Deal {
        arrangement,
        initial_choice,
        reveal,
    }
}

/// Plays independent rounds against an injected random source.
pub struct RoundSimulator<R> {
    rng: R,
}

impl RoundSimulator<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RoundSimulator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn deal(&mut self) -> Deal {
        deal(&mut self.rng)
    }

    /// Play one fresh round and report whether `strategy` wins.
    pub fn play_round(&mut self, strategy: Strategy) -> bool {
        self.deal().outcome(strategy)
    }

    pub fn play_round_recorded(&mut self, strategy: Strategy) -> RoundRecord {
        self.deal().record(strategy)
    }
}
