//! Core value types: strategies, door arrangements, and round records.

use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::constants::DOOR_COUNT;

/// The player's committed policy, fixed before the round starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Keep the initial pick after the reveal.
    Stay,
    /// Move to the one remaining closed door after the reveal.
    Switch,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Stay, Strategy::Switch];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Stay => "stay",
            Strategy::Switch => "switch",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the two strategies share random rounds within one trial.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pairing {
    /// Each strategy plays its own freshly dealt round.
    #[default]
    Unpaired,
    /// One deal per trial, scored under both strategies.
    Paired,
}

/// What sits behind a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorContents {
    Prize,
    Empty,
}

/// One prize and two empty doors. Built fresh for every round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoorArrangement {
    doors: [DoorContents; DOOR_COUNT],
    prize: usize,
}

impl DoorArrangement {
    /// Arrangement with the prize behind `prize`. `None` if out of range.
    pub fn with_prize(prize: usize) -> Option<Self> {
        (prize < DOOR_COUNT).then(|| Self::place(prize))
    }

    /// Place the prize uniformly at random, which is equivalent to shuffling
    /// {prize, empty, empty}.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::place(rng.random_range(0..DOOR_COUNT))
    }

    /// Requires `prize < DOOR_COUNT`.
    fn place(prize: usize) -> Self {
        let mut doors = [DoorContents::Empty; DOOR_COUNT];
        doors[prize] = DoorContents::Prize;
        Self { doors, prize }
    }

    #[inline(always)]
    pub fn prize_position(&self) -> usize {
        self.prize
    }

    /// What is behind `door`. `None` if out of range.
    pub fn contents(&self, door: usize) -> Option<DoorContents> {
        self.doors.get(door).copied()
    }

    pub fn doors(&self) -> &[DoorContents; DOOR_COUNT] {
        &self.doors
    }
}

/// Full trace of one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    pub strategy: Strategy,
    pub prize: usize,
    pub initial_choice: usize,
    pub reveal: usize,
    pub final_choice: usize,
    pub won: bool,
}
