use crate::error::GameError;
use crate::model::card::{CardKind, DECK_SIZE};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;

/// Cards dealt to each participant at the start of every round.
pub fn hand_size(players: usize) -> Result<usize, GameError> {
    match players {
        2 => Ok(10),
        3 => Ok(9),
        4 => Ok(8),
        5 => Ok(7),
        found => Err(GameError::InvalidParticipantCount { found }),
    }
}

/// Every card of the standard composition, uniformly shuffled.
pub fn build_deck<R: rand::Rng + ?Sized>(rng: &mut R) -> Vec<CardKind> {
    Deck::shuffled(rng).cards
}

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<CardKind>,
}

impl Deck {
    /// Unshuffled deck grouped by kind in composition order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for kind in CardKind::ALL.iter().copied() {
            cards.extend(std::iter::repeat_n(kind, kind.deck_count()));
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[CardKind] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards reserved for `round` (zero based) when every round deals
    /// `per_round` cards. Returns `None` once the deck would run out.
    pub fn round_slice(&self, round: usize, per_round: usize) -> Option<&[CardKind]> {
        let start = round.checked_mul(per_round)?;
        let end = start.checked_add(per_round)?;
        self.cards.get(start..end)
    }
}
