use crate::error::GameError;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Total number of cards in a fresh deck.
pub const DECK_SIZE: usize = 108;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum CardKind {
    Tempura,
    Sashimi,
    Dumpling,
    Maki3,
    Maki2,
    Maki1,
    Salmon,
    Squid,
    Egg,
    Pudding,
    Wasabi,
    Chopsticks,
}

impl CardKind {
    /// Every kind, in deck-composition order. Tie-breaks between equally
    /// ranked kinds follow this order.
    pub const ALL: [CardKind; 12] = [
        CardKind::Tempura,
        CardKind::Sashimi,
        CardKind::Dumpling,
        CardKind::Maki2,
        CardKind::Maki3,
        CardKind::Maki1,
        CardKind::Salmon,
        CardKind::Squid,
        CardKind::Egg,
        CardKind::Pudding,
        CardKind::Wasabi,
        CardKind::Chopsticks,
    ];

    pub const MAKI: [CardKind; 3] = [CardKind::Maki3, CardKind::Maki2, CardKind::Maki1];

    pub const NIGIRI: [CardKind; 3] = [CardKind::Salmon, CardKind::Squid, CardKind::Egg];

    /// Number of copies of this kind in a fresh deck.
    pub const fn deck_count(self) -> usize {
        match self {
            CardKind::Tempura => 14,
            CardKind::Sashimi => 14,
            CardKind::Dumpling => 14,
            CardKind::Maki2 => 12,
            CardKind::Maki3 => 8,
            CardKind::Maki1 => 6,
            CardKind::Salmon => 10,
            CardKind::Squid => 5,
            CardKind::Egg => 5,
            CardKind::Pudding => 10,
            CardKind::Wasabi => 6,
            CardKind::Chopsticks => 4,
        }
    }

    /// Chance that a single card drawn from a fresh deck is of this kind.
    pub fn probability(self) -> f64 {
        self.deck_count() as f64 / DECK_SIZE as f64
    }

    pub const fn is_nigiri(self) -> bool {
        matches!(self, CardKind::Salmon | CardKind::Squid | CardKind::Egg)
    }

    pub const fn is_maki(self) -> bool {
        matches!(self, CardKind::Maki3 | CardKind::Maki2 | CardKind::Maki1)
    }

    /// Face value of a nigiri before any wasabi multiplier.
    pub const fn nigiri_value(self) -> u32 {
        match self {
            CardKind::Squid => 3,
            CardKind::Salmon => 2,
            CardKind::Egg => 1,
            _ => 0,
        }
    }

    /// Number of maki rolls printed on the card.
    pub const fn maki_value(self) -> u32 {
        match self {
            CardKind::Maki3 => 3,
            CardKind::Maki2 => 2,
            CardKind::Maki1 => 1,
            _ => 0,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            CardKind::Tempura => 't',
            CardKind::Sashimi => 's',
            CardKind::Dumpling => 'd',
            CardKind::Maki3 => 'm',
            CardKind::Maki2 => 'n',
            CardKind::Maki1 => 'o',
            CardKind::Salmon => 'a',
            CardKind::Squid => 'b',
            CardKind::Egg => 'c',
            CardKind::Pudding => 'p',
            CardKind::Wasabi => 'w',
            CardKind::Chopsticks => 'f',
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CardKind::Tempura => "Tempura",
            CardKind::Sashimi => "Sashimi",
            CardKind::Dumpling => "Dumpling",
            CardKind::Maki3 => "Maki3",
            CardKind::Maki2 => "Maki2",
            CardKind::Maki1 => "Maki1",
            CardKind::Salmon => "Salmon",
            CardKind::Squid => "Squid",
            CardKind::Egg => "Egg",
            CardKind::Pudding => "Pudding",
            CardKind::Wasabi => "Wasabi",
            CardKind::Chopsticks => "Chopsticks",
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardKind {
    type Err = GameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let token = value.trim();
        let kind = match token.to_ascii_uppercase().as_str() {
            "TEMPURA" => CardKind::Tempura,
            "SASHIMI" => CardKind::Sashimi,
            "DUMPLING" => CardKind::Dumpling,
            "MAKI3" => CardKind::Maki3,
            "MAKI2" => CardKind::Maki2,
            "MAKI1" => CardKind::Maki1,
            "SALMON" => CardKind::Salmon,
            "SQUID" => CardKind::Squid,
            "EGG" => CardKind::Egg,
            "PUDDING" => CardKind::Pudding,
            "WASABI" => CardKind::Wasabi,
            "CHOPSTICKS" => CardKind::Chopsticks,
            _ => {
                return Err(GameError::UnknownCardKind {
                    token: token.to_string(),
                });
            }
        };
        Ok(kind)
    }
}
