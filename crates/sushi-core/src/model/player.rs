use core::fmt;
use serde::{Deserialize, Serialize};

/// Position at the table. Hands are passed from each seat to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seat(usize);

impl Seat {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    /// Seat that receives this seat's hand after a turn.
    pub const fn next(self, players: usize) -> Seat {
        Seat((self.0 + 1) % players)
    }

    pub const fn previous(self, players: usize) -> Seat {
        Seat((self.0 + players - 1) % players)
    }

    pub fn all(players: usize) -> impl Iterator<Item = Seat> {
        (0..players).map(Seat)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0 + 1)
    }
}
