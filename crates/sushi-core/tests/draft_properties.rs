use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use sushi_core::game::{MatchState, PickContext, ROUNDS};
use sushi_core::model::card::CardKind;
use sushi_core::model::deck::hand_size;
use sushi_core::model::hand::Hand;
use sushi_core::model::player::Seat;
use sushi_core::scoring::{dumpling_score, maki_bonuses, pudding_bonuses, sashimi_score};

fn seeds(master: u64, count: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(master);
    (0..count).map(|_| rng.next_u64()).collect()
}

fn card_kind() -> impl Strategy<Value = CardKind> {
    prop::sample::select(CardKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn sashimi_counts_complete_sets(hand in prop::collection::vec(card_kind(), 0..20)) {
        let sashimi = hand.iter().filter(|&&card| card == CardKind::Sashimi).count() as u32;
        prop_assert_eq!(sashimi_score(&hand), 10 * (sashimi / 3));
    }

    #[test]
    fn dumplings_never_decrease(n in 0usize..12) {
        let fewer = dumpling_score(&vec![CardKind::Dumpling; n]);
        let more = dumpling_score(&vec![CardKind::Dumpling; n + 1]);
        prop_assert!(more >= fewer);
        prop_assert!(more <= 15);
    }

    #[test]
    fn maki_pool_is_six_or_nine(points in prop::collection::vec(0u32..15, 2..=5)) {
        let total: f64 = maki_bonuses(&points).iter().sum();
        let mut distinct = points.clone();
        distinct.sort_unstable();
        distinct.dedup();
        let expected = if distinct.len() == 1 { 6.0 } else { 9.0 };
        prop_assert!((total - expected).abs() < 1e-9);
    }

    #[test]
    fn pudding_middle_positions_score_zero(
        counts in prop::collection::vec(0u32..8, 2..=5)
    ) {
        let bonuses = pudding_bonuses(&counts);
        prop_assert_eq!(bonuses.len(), counts.len());
        let max = *counts.iter().max().unwrap();
        let min = *counts.iter().min().unwrap();
        for (count, bonus) in counts.iter().zip(&bonuses) {
            if max != min && *count != max && *count != min {
                prop_assert_eq!(*bonus, 0.0);
            }
        }
    }
}

#[test]
fn random_picks_conserve_cards_every_round() {
    for (index, seed) in seeds(4242, 40).into_iter().enumerate() {
        let players = 2 + index % 4;
        let size = hand_size(players).unwrap();
        let mut state = MatchState::with_seed(players, seed).unwrap();
        let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);

        for _ in 0..ROUNDS {
            let mut draft = state.start_round().unwrap();
            for turn in 0..size {
                for seat in Seat::all(players) {
                    assert_eq!(draft.hand(seat).len(), size - turn);
                }
                draft
                    .play_turn(|_: &PickContext<'_>, hand: &mut Hand| {
                        let index = rng.gen_range(0..hand.len());
                        hand.take_at(index)
                    })
                    .unwrap();
            }
            assert_eq!(draft.total_collected(), size * players);
            for seat in Seat::all(players) {
                assert!(draft.hand(seat).is_empty());
                assert_eq!(draft.collection(seat).len(), size);
            }
            state.finish_round(draft).unwrap();
        }

        let outcome = state.finish().unwrap();
        assert_eq!(outcome.final_scores.len(), players);
        assert_eq!(outcome.round_scores.len(), ROUNDS);
    }
}
