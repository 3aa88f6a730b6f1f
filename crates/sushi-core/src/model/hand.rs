use crate::model::card::CardKind;
use core::fmt;
use std::vec::Vec;

/// Cards on offer during a turn, in pass order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<CardKind>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<CardKind>) -> Self {
        Self { cards }
    }

    pub fn first(&self) -> Option<CardKind> {
        self.cards.first().copied()
    }

    pub fn last(&self) -> Option<CardKind> {
        self.cards.last().copied()
    }

    pub fn position(&self, kind: CardKind) -> Option<usize> {
        self.cards.iter().position(|&card| card == kind)
    }

    pub fn contains(&self, kind: CardKind) -> bool {
        self.cards.contains(&kind)
    }

    pub fn count(&self, kind: CardKind) -> usize {
        self.cards.iter().filter(|&&card| card == kind).count()
    }

    /// Removes the card at `index`, keeping the order of the rest.
    pub fn take_at(&mut self, index: usize) -> Option<CardKind> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    /// Removes the first offered card of `kind`.
    pub fn take_first(&mut self, kind: CardKind) -> Option<CardKind> {
        let index = self.position(kind)?;
        self.take_at(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardKind> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[CardKind] {
        &self.cards
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{}", card.symbol())?;
        }
        Ok(())
    }
}

/// Cards a participant has drafted this round, in the order they were taken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    cards: Vec<CardKind>,
}

impl Collection {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<CardKind>) -> Self {
        Self { cards }
    }

    pub fn push(&mut self, card: CardKind) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn count(&self, kind: CardKind) -> usize {
        self.cards.iter().filter(|&&card| card == kind).count()
    }

    pub fn maki_points(&self) -> u32 {
        self.cards.iter().map(|card| card.maki_value()).sum()
    }

    pub fn puddings(&self) -> u32 {
        self.count(CardKind::Pudding) as u32
    }

    /// True when a wasabi has been taken and no nigiri has landed on it yet.
    pub fn wasabi_armed(&self) -> bool {
        self.cards
            .iter()
            .rev()
            .find(|card| card.is_nigiri() || **card == CardKind::Wasabi)
            .is_some_and(|card| *card == CardKind::Wasabi)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardKind> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[CardKind] {
        &self.cards
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{}", card.symbol())?;
        }
        Ok(())
    }
}
