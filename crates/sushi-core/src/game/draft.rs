use crate::error::GameError;
use crate::model::card::CardKind;
use crate::model::deck::hand_size;
use crate::model::hand::{Collection, Hand};
use crate::model::player::Seat;
use tracing::{Level, event};

/// What a seat knows when it is asked to pick.
#[derive(Debug, Clone, Copy)]
pub struct PickContext<'a> {
    pub seat: Seat,
    pub players: usize,
    /// Round number, starting at 1.
    pub round: usize,
    /// Turns already played this round.
    pub turn: usize,
    pub collection: &'a Collection,
}

/// One round of simultaneous picking with hands passed to the next seat.
///
/// `hands[i]` is the hand currently in front of seat `i`; `collections[i]`
/// holds what seat `i` has drafted so far this round.
#[derive(Debug, Clone)]
pub struct DraftRound {
    players: usize,
    hand_size: usize,
    round: usize,
    turn: usize,
    hands: Vec<Hand>,
    collections: Vec<Collection>,
}

impl DraftRound {
    /// Splits `cards` into contiguous starting hands, one per seat in order.
    pub fn deal(cards: &[CardKind], players: usize) -> Result<Self, GameError> {
        let hand_size = hand_size(players)?;
        let needed = hand_size * players;
        if cards.len() != needed {
            return Err(GameError::DeckExhausted {
                needed,
                available: cards.len(),
            });
        }

        let hands = cards
            .chunks(hand_size)
            .map(|chunk| Hand::with_cards(chunk.to_vec()))
            .collect();

        Ok(Self {
            players,
            hand_size,
            round: 1,
            turn: 0,
            hands,
            collections: vec![Collection::new(); players],
        })
    }

    /// Labels the round with its number in the game (starting at 1).
    pub fn in_round(mut self, round: usize) -> Self {
        self.round = round;
        self
    }

    pub fn players(&self) -> usize {
        self.players
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    /// Number of turns already played this round.
    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn is_complete(&self) -> bool {
        self.turn >= self.hand_size
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn collection(&self, seat: Seat) -> &Collection {
        &self.collections[seat.index()]
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn into_collections(self) -> Vec<Collection> {
        self.collections
    }

    pub fn total_collected(&self) -> usize {
        self.collections.iter().map(Collection::len).sum()
    }

    /// Every seat picks from the hand in front of it, then all hands move one
    /// seat along. `pick` must remove exactly one card from the hand and
    /// return it; anything else aborts the round.
    pub fn play_turn<F>(&mut self, mut pick: F) -> Result<(), GameError>
    where
        F: FnMut(&PickContext<'_>, &mut Hand) -> Option<CardKind>,
    {
        if self.is_complete() {
            return Err(GameError::RoundComplete);
        }

        for (index, (hand, collection)) in self
            .hands
            .iter_mut()
            .zip(self.collections.iter_mut())
            .enumerate()
        {
            let seat = Seat::new(index);
            let offered = hand.clone();
            let ctx = PickContext {
                seat,
                players: self.players,
                round: self.round,
                turn: self.turn,
                collection: &*collection,
            };
            let Some(card) = pick(&ctx, &mut *hand) else {
                return Err(GameError::implementation(
                    seat,
                    format!("no card taken from {offered}"),
                ));
            };
            verify_pick(seat, &offered, &*hand, card)?;
            collection.push(card);
        }

        self.hands.rotate_right(1);
        self.turn += 1;

        if self.is_complete() {
            self.check_conservation()?;
            event!(
                target: "sushi_core::draft",
                Level::TRACE,
                players = self.players,
                round = self.round,
                collected = self.total_collected(),
                "draft round complete"
            );
        }
        Ok(())
    }

    fn check_conservation(&self) -> Result<(), GameError> {
        if let Some(index) = self.hands.iter().position(|hand| !hand.is_empty()) {
            return Err(GameError::implementation(
                Seat::new(index),
                format!("hand still holds {} cards at round end", self.hands[index].len()),
            ));
        }

        let expected = self.hand_size * self.players;
        let collected = self.total_collected();
        if collected != expected {
            return Err(GameError::implementation(
                Seat::new(0),
                format!("{collected} cards collected but {expected} were dealt"),
            ));
        }
        Ok(())
    }
}

fn verify_pick(
    seat: Seat,
    offered: &Hand,
    remaining: &Hand,
    card: CardKind,
) -> Result<(), GameError> {
    if remaining.len() + 1 != offered.len() {
        return Err(GameError::implementation(
            seat,
            format!(
                "hand went from {} to {} cards in one pick",
                offered.len(),
                remaining.len()
            ),
        ));
    }

    let mut expected = offered.cards().to_vec();
    let Some(position) = expected.iter().position(|&c| c == card) else {
        return Err(GameError::implementation(
            seat,
            format!("took {card} which was not offered ({offered})"),
        ));
    };
    expected.remove(position);

    let mut left = remaining.cards().to_vec();
    expected.sort_unstable();
    left.sort_unstable();
    if expected != left {
        return Err(GameError::implementation(
            seat,
            format!("reported {card} but left {remaining} from {offered}"),
        ));
    }
    Ok(())
}
