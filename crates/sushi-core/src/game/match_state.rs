use crate::error::GameError;
use crate::game::draft::{DraftRound, PickContext};
use crate::model::card::CardKind;
use crate::model::deck::{Deck, hand_size};
use crate::model::hand::{Collection, Hand};
use crate::model::player::Seat;
use crate::model::score::{GameOutcome, RoundScore, ScoreBoard};
use crate::scoring::{base_score, maki_bonuses};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, event};

/// Rounds in one game.
pub const ROUNDS: usize = 3;

/// State of one game: the deck dealt from, running pudding counts and the
/// results of finished rounds.
#[derive(Debug, Clone)]
pub struct MatchState {
    players: usize,
    hand_size: usize,
    deck: Deck,
    rounds_played: usize,
    puddings: Vec<u32>,
    scores: ScoreBoard,
    seed: Option<u64>,
}

impl MatchState {
    pub fn new<R: rand::Rng + ?Sized>(players: usize, rng: &mut R) -> Result<Self, GameError> {
        hand_size(players)?;
        Self::with_deck(players, Deck::shuffled(rng))
    }

    pub fn with_seed(players: usize, seed: u64) -> Result<Self, GameError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = Self::new(players, &mut rng)?;
        state.seed = Some(seed);
        Ok(state)
    }

    /// Game dealt from `deck` exactly as given.
    pub fn with_deck(players: usize, deck: Deck) -> Result<Self, GameError> {
        let hand_size = hand_size(players)?;
        let needed = hand_size * players * ROUNDS;
        if deck.len() < needed {
            return Err(GameError::DeckExhausted {
                needed,
                available: deck.len(),
            });
        }

        Ok(Self {
            players,
            hand_size,
            deck,
            rounds_played: 0,
            puddings: vec![0; players],
            scores: ScoreBoard::new(players),
            seed: None,
        })
    }

    pub fn players(&self) -> usize {
        self.players
    }

    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    /// Number of the round about to be played (or just played, once the
    /// game is over), starting at 1.
    pub fn round_number(&self) -> usize {
        (self.rounds_played + 1).min(ROUNDS)
    }

    pub fn is_finished(&self) -> bool {
        self.rounds_played >= ROUNDS
    }

    /// Pudding cards collected in finished rounds.
    pub fn puddings(&self) -> &[u32] {
        &self.puddings
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    fn next_deal(&self) -> Result<&[CardKind], GameError> {
        if self.is_finished() {
            return Err(GameError::GameComplete);
        }
        let per_round = self.hand_size * self.players;
        self.deck
            .round_slice(self.rounds_played, per_round)
            .ok_or(GameError::DeckExhausted {
                needed: per_round,
                available: self
                    .deck
                    .len()
                    .saturating_sub(self.rounds_played * per_round),
            })
    }

    /// Deals the next round's starting hands.
    pub fn start_round(&self) -> Result<DraftRound, GameError> {
        let cards = self.next_deal()?;
        Ok(DraftRound::deal(cards, self.players)?.in_round(self.round_number()))
    }

    /// Scores a completed draft and folds its puddings into the running
    /// counts. Returns each seat's base and maki points for the round.
    pub fn finish_round(&mut self, draft: DraftRound) -> Result<Vec<RoundScore>, GameError> {
        if !draft.is_complete() {
            return Err(GameError::RoundInProgress {
                turn: draft.turn(),
                hand_size: draft.hand_size(),
            });
        }
        self.score_collections(draft.into_collections())
    }

    fn score_collections(
        &mut self,
        collections: Vec<Collection>,
    ) -> Result<Vec<RoundScore>, GameError> {
        if self.is_finished() {
            return Err(GameError::GameComplete);
        }

        let maki_points: Vec<u32> = collections.iter().map(Collection::maki_points).collect();
        let maki = maki_bonuses(&maki_points);
        let round: Vec<RoundScore> = collections
            .iter()
            .zip(maki)
            .map(|(collection, maki)| RoundScore {
                base: base_score(collection.cards()),
                maki,
            })
            .collect();

        for (count, collection) in self.puddings.iter_mut().zip(&collections) {
            *count += collection.puddings();
        }

        event!(
            target: "sushi_core::round",
            Level::DEBUG,
            round = self.round_number(),
            hands = %collections
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" "),
            scores = ?round.iter().map(RoundScore::total).collect::<Vec<_>>(),
            "round scored"
        );

        self.scores.record_round(round.clone());
        self.rounds_played += 1;
        Ok(round)
    }

    /// Plays every turn of the next round, asking `pick` for each seat's card.
    pub fn play_round<F>(&mut self, mut pick: F) -> Result<Vec<RoundScore>, GameError>
    where
        F: FnMut(&PickContext<'_>, &mut Hand) -> Option<CardKind>,
    {
        let mut draft = self.start_round()?;
        while !draft.is_complete() {
            draft.play_turn(&mut pick)?;
        }
        self.finish_round(draft)
    }

    /// Scores the next round's starting hands as dealt, without drafting.
    pub fn score_dealt_round(&mut self) -> Result<Vec<RoundScore>, GameError> {
        let draft = self.start_round()?;
        let collections = Seat::all(self.players)
            .map(|seat| Collection::with_cards(draft.hand(seat).cards().to_vec()))
            .collect();
        self.score_collections(collections)
    }

    /// Adds the pudding adjustment to the round totals.
    pub fn finish(self) -> Result<GameOutcome, GameError> {
        if !self.is_finished() {
            return Err(GameError::GameInProgress {
                rounds_played: self.rounds_played,
            });
        }
        let outcome = self.scores.finish(self.puddings);
        event!(
            target: "sushi_core::game",
            Level::DEBUG,
            final_scores = ?outcome.final_scores,
            puddings = ?outcome.puddings,
            "game finished"
        );
        Ok(outcome)
    }

    /// Runs the remaining rounds with `pick` and returns the final outcome.
    pub fn play<F>(mut self, mut pick: F) -> Result<GameOutcome, GameError>
    where
        F: FnMut(&PickContext<'_>, &mut Hand) -> Option<CardKind>,
    {
        while !self.is_finished() {
            self.play_round(&mut pick)?;
        }
        self.finish()
    }
}

/// Scores three rounds of dealt hands with no drafting at all. Useful as a
/// reference distribution for what an unplayed hand is worth.
pub fn simulate_undrafted_game<R: rand::Rng + ?Sized>(
    players: usize,
    rng: &mut R,
) -> Result<GameOutcome, GameError> {
    let mut state = MatchState::new(players, rng)?;
    while !state.is_finished() {
        state.score_dealt_round()?;
    }
    state.finish()
}

#[cfg(test)]
mod tests {
    use super::{MatchState, ROUNDS, simulate_undrafted_game};
    use crate::error::GameError;
    use crate::game::draft::PickContext;
    use crate::model::card::CardKind;
    use crate::model::deck::Deck;
    use crate::model::hand::Hand;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn take_first(_: &PickContext<'_>, hand: &mut Hand) -> Option<CardKind> {
        hand.take_at(0)
    }

    #[test]
    fn rejects_invalid_participant_counts() {
        assert_eq!(
            MatchState::with_seed(1, 0).unwrap_err(),
            GameError::InvalidParticipantCount { found: 1 }
        );
        assert_eq!(
            MatchState::with_seed(6, 0).unwrap_err(),
            GameError::InvalidParticipantCount { found: 6 }
        );
    }

    #[test]
    fn rounds_advance_until_game_complete() {
        let mut state = MatchState::with_seed(3, 11).unwrap();
        assert_eq!(state.round_number(), 1);
        for round in 1..=ROUNDS {
            let draft = state.start_round().unwrap();
            assert_eq!(draft.round(), round);
            state.play_round(take_first).unwrap();
        }
        assert!(state.is_finished());
        assert_eq!(state.start_round().unwrap_err(), GameError::GameComplete);
        assert_eq!(state.scores().rounds().len(), ROUNDS);
    }

    #[test]
    fn finishing_early_is_rejected() {
        let mut state = MatchState::with_seed(2, 5).unwrap();
        let draft = state.start_round().unwrap();
        assert_eq!(
            state.finish_round(draft).unwrap_err(),
            GameError::RoundInProgress {
                turn: 0,
                hand_size: 10
            }
        );
        assert_eq!(
            state.finish().unwrap_err(),
            GameError::GameInProgress { rounds_played: 0 }
        );
    }

    #[test]
    fn same_seed_replays_identically() {
        let a = MatchState::with_seed(4, 2024).unwrap().play(take_first).unwrap();
        let b = MatchState::with_seed(4, 2024).unwrap().play(take_first).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.round_scores.len(), ROUNDS);
        assert_eq!(a.final_scores.len(), 4);
    }

    #[test]
    fn puddings_accumulate_across_rounds() {
        let deck = Deck::shuffled_with_seed(77);
        let expected: Vec<u32> = {
            let mut counts = vec![0u32; 2];
            let mut state = MatchState::with_deck(2, deck.clone()).unwrap();
            for _ in 0..ROUNDS {
                let mut draft = state.start_round().unwrap();
                while !draft.is_complete() {
                    draft.play_turn(take_first).unwrap();
                }
                for (count, collection) in counts.iter_mut().zip(draft.collections()) {
                    *count += collection.puddings();
                }
                state.finish_round(draft).unwrap();
            }
            counts
        };
        let outcome = MatchState::with_deck(2, deck).unwrap().play(take_first).unwrap();
        assert_eq!(outcome.puddings, expected);
    }

    #[test]
    fn final_scores_add_pudding_bonus_to_round_totals() {
        let outcome = MatchState::with_seed(5, 99).unwrap().play(take_first).unwrap();
        for seat in 0..5 {
            let rounds: f64 = outcome.round_scores.iter().map(|round| round[seat]).sum();
            let expected = rounds + outcome.pudding_bonus[seat];
            assert!((outcome.final_scores[seat] - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn undrafted_game_scores_dealt_hands() {
        let mut rng = StdRng::seed_from_u64(8);
        let outcome = simulate_undrafted_game(4, &mut rng).unwrap();
        assert_eq!(outcome.round_scores.len(), ROUNDS);
        let dealt_puddings: u32 = outcome.puddings.iter().sum();
        assert!(dealt_puddings <= CardKind::Pudding.deck_count() as u32);
    }
}
