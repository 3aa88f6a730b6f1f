use super::{Policy, PolicyContext, take_logged};
use sushi_core::model::card::CardKind;
use sushi_core::model::hand::{Collection, Hand};

/// Hands this small are about to run out; sets that cannot be finished from
/// them are skipped.
const SHORT_HAND: usize = 3;

/// Rule-based drafter ("smart"). Skips cards that are unlikely to pay off,
/// prefers the biggest maki on offer and lands squid on a waiting wasabi.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Index of the card to take and the rule that picked it.
    pub fn choose(hand: &Hand, held: &Collection) -> (usize, &'static str) {
        if hand.len() <= 1 {
            return (0, "last_card");
        }

        let short = hand.len() < SHORT_HAND;
        let mut exclude = vec![CardKind::Chopsticks];
        if short && held.count(CardKind::Sashimi) % 3 < 2 {
            exclude.push(CardKind::Sashimi);
        }
        if short && held.count(CardKind::Tempura) % 2 == 0 {
            exclude.push(CardKind::Tempura);
        }
        if hand.contains(CardKind::Maki2) {
            exclude.push(CardKind::Maki1);
        }
        if hand.contains(CardKind::Maki3) {
            exclude.extend([CardKind::Maki1, CardKind::Maki2]);
        }
        if short {
            exclude.push(CardKind::Wasabi);
        }
        if held.wasabi_armed() {
            exclude.push(CardKind::Wasabi);
            if let Some(index) = hand.position(CardKind::Squid) {
                return (index, "squid_on_wasabi");
            }
        }

        match hand.iter().position(|card| !exclude.contains(card)) {
            Some(index) => (index, "first_allowed"),
            None => (hand.len() - 1, "all_excluded"),
        }
    }
}

impl Policy for HeuristicPolicy {
    fn take(&mut self, hand: &mut Hand, ctx: &PolicyContext<'_>) -> Option<CardKind> {
        let (index, reason) = Self::choose(hand, ctx.collection);
        take_logged(self.name(), ctx, hand, index, reason)
    }

    fn name(&self) -> &str {
        "smart"
    }
}

#[cfg(test)]
mod tests {
    use super::HeuristicPolicy;
    use crate::policy::Policy;
    use crate::policy::test_support::{ctx, hand};
    use sushi_core::model::card::CardKind::{self, *};
    use sushi_core::model::hand::Collection;

    fn pick(offered: &[CardKind], held: &[CardKind]) -> CardKind {
        let held = Collection::with_cards(held.to_vec());
        let mut offered = hand(offered);
        HeuristicPolicy.take(&mut offered, &ctx(&held)).unwrap()
    }

    #[test]
    fn never_takes_chopsticks_when_anything_else_is_offered() {
        assert_eq!(pick(&[Chopsticks, Egg, Pudding], &[]), Egg);
    }

    #[test]
    fn single_card_is_taken_unconditionally() {
        assert_eq!(pick(&[Chopsticks], &[]), Chopsticks);
    }

    #[test]
    fn falls_back_to_last_card_when_everything_is_excluded() {
        assert_eq!(pick(&[Chopsticks, Wasabi], &[]), Wasabi);
    }

    #[test]
    fn prefers_the_biggest_maki() {
        assert_eq!(pick(&[Maki1, Maki2, Maki3, Egg], &[]), Maki3);
        assert_eq!(pick(&[Maki1, Maki2, Egg], &[]), Maki2);
        assert_eq!(pick(&[Maki1, Egg, Salmon], &[]), Maki1);
    }

    #[test]
    fn short_hands_skip_unfinishable_sets() {
        assert_eq!(pick(&[Sashimi, Egg], &[]), Egg);
        assert_eq!(pick(&[Sashimi, Egg], &[Sashimi, Sashimi]), Sashimi);
        assert_eq!(pick(&[Tempura, Egg], &[Tempura, Tempura]), Egg);
        assert_eq!(pick(&[Tempura, Egg], &[Tempura]), Tempura);
        assert_eq!(pick(&[Wasabi, Egg], &[]), Egg);
    }

    #[test]
    fn long_hands_keep_sets_in_play() {
        assert_eq!(pick(&[Sashimi, Egg, Squid], &[]), Sashimi);
        assert_eq!(pick(&[Wasabi, Egg, Squid], &[]), Wasabi);
    }

    #[test]
    fn squid_lands_on_armed_wasabi() {
        assert_eq!(pick(&[Tempura, Wasabi, Squid, Egg], &[Wasabi]), Squid);
        assert_eq!(pick(&[Wasabi, Egg, Salmon], &[Tempura, Wasabi]), Egg);
    }

    #[test]
    fn used_wasabi_does_not_attract_squid() {
        assert_eq!(pick(&[Tempura, Squid, Egg], &[Wasabi, Egg]), Tempura);
    }
}
