//! Six-sided die.

use std::fmt;

use rand::Rng;
use serde::Serialize;

/// Lowest face of the die
pub const MIN_FACE: u8 = 1;

/// Highest face of the die
pub const MAX_FACE: u8 = 6;

/// Outcome of a single roll, always in `MIN_FACE..=MAX_FACE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DiceRoll(u8);

impl DiceRoll {
    /// Returns `None` for values outside the faces of the die.
    pub fn new(value: u8) -> Option<Self> {
        (MIN_FACE..=MAX_FACE).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of dice rolls, swappable in tests.
pub trait Roller: Send + Sync {
    fn roll(&self) -> DiceRoll;
}

/// Uniform roller backed by the thread-local generator seeded by the OS.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngRoller;

impl Roller for ThreadRngRoller {
    fn roll(&self) -> DiceRoll {
        DiceRoll(rand::rng().random_range(MIN_FACE..=MAX_FACE))
    }
}
