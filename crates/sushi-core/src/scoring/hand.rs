use crate::model::card::CardKind;
use serde::Serialize;

const DUMPLING_TABLE: [u32; 6] = [0, 1, 3, 6, 10, 15];
const WASABI_MULTIPLIER: u32 = 3;

fn count(cards: &[CardKind], kind: CardKind) -> u32 {
    cards.iter().filter(|&&card| card == kind).count() as u32
}

/// 10 points per complete set of three sashimi.
pub fn sashimi_score(cards: &[CardKind]) -> u32 {
    10 * (count(cards, CardKind::Sashimi) / 3)
}

/// 5 points per complete pair of tempura.
pub fn tempura_score(cards: &[CardKind]) -> u32 {
    5 * (count(cards, CardKind::Tempura) / 2)
}

/// 1, 3, 6, 10 points for one to four dumplings, 15 for five or more.
pub fn dumpling_score(cards: &[CardKind]) -> u32 {
    let dumplings = count(cards, CardKind::Dumpling) as usize;
    DUMPLING_TABLE[dumplings.min(DUMPLING_TABLE.len() - 1)]
}

/// Squid 3, salmon 2, egg 1; tripled for the first nigiri taken after an
/// unused wasabi. Cards must be in the order they were drafted.
pub fn nigiri_score(cards: &[CardKind]) -> u32 {
    let mut armed = false;
    let mut score = 0;
    for &card in cards {
        if card == CardKind::Wasabi {
            armed = true;
        } else if card.is_nigiri() {
            let multiplier = if armed { WASABI_MULTIPLIER } else { 1 };
            score += card.nigiri_value() * multiplier;
            armed = false;
        }
    }
    score
}

/// Value of a hand in isolation, before maki and pudding comparisons.
pub fn base_score(cards: &[CardKind]) -> u32 {
    tempura_score(cards) + sashimi_score(cards) + dumpling_score(cards) + nigiri_score(cards)
}

/// Per-category view of a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandBreakdown {
    pub tempura: u32,
    pub sashimi: u32,
    pub dumpling: u32,
    pub nigiri: u32,
    pub maki_points: u32,
    pub puddings: u32,
}

impl HandBreakdown {
    pub fn of(cards: &[CardKind]) -> Self {
        Self {
            tempura: tempura_score(cards),
            sashimi: sashimi_score(cards),
            dumpling: dumpling_score(cards),
            nigiri: nigiri_score(cards),
            maki_points: cards.iter().map(|card| card.maki_value()).sum(),
            puddings: count(cards, CardKind::Pudding),
        }
    }

    pub fn base(&self) -> u32 {
        self.tempura + self.sashimi + self.dumpling + self.nigiri
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::card::CardKind::*;

    #[test]
    fn sashimi_scores_complete_sets_only() {
        assert_eq!(sashimi_score(&[Sashimi, Sashimi]), 0);
        assert_eq!(sashimi_score(&[Sashimi; 3]), 10);
        assert_eq!(sashimi_score(&[Sashimi; 5]), 10);
        assert_eq!(sashimi_score(&[Sashimi; 6]), 20);
    }

    #[test]
    fn tempura_scores_pairs() {
        assert_eq!(tempura_score(&[Tempura]), 0);
        assert_eq!(tempura_score(&[Tempura, Egg, Tempura]), 5);
        assert_eq!(tempura_score(&[Tempura; 5]), 10);
    }

    #[test]
    fn dumplings_follow_table_and_saturate() {
        let expected = [0, 1, 3, 6, 10, 15, 15, 15, 15];
        for (n, value) in expected.iter().enumerate() {
            assert_eq!(dumpling_score(&vec![Dumpling; n]), *value, "{n} dumplings");
        }
    }

    #[test]
    fn wasabi_triples_following_squid() {
        assert_eq!(nigiri_score(&[Wasabi, Squid]), 9);
        assert_eq!(nigiri_score(&[Wasabi, Tempura, Squid]), 9);
    }

    #[test]
    fn only_first_nigiri_after_wasabi_is_tripled() {
        assert_eq!(nigiri_score(&[Wasabi, Salmon, Squid]), 9);
        assert_eq!(nigiri_score(&[Wasabi, Egg, Squid]), 6);
    }

    #[test]
    fn nigiri_before_wasabi_is_not_tripled() {
        assert_eq!(nigiri_score(&[Squid, Wasabi]), 3);
        assert_eq!(nigiri_score(&[Salmon, Wasabi, Egg]), 5);
    }

    #[test]
    fn stacked_wasabi_arms_once() {
        assert_eq!(nigiri_score(&[Wasabi, Wasabi, Squid, Squid]), 12);
        assert_eq!(nigiri_score(&[Wasabi, Salmon, Wasabi, Squid]), 15);
    }

    #[test]
    fn base_score_sums_categories() {
        let hand = [
            Tempura, Tempura, Sashimi, Sashimi, Sashimi, Dumpling, Wasabi, Egg, Maki3, Pudding,
        ];
        assert_eq!(base_score(&hand), 5 + 10 + 1 + 3);
        let breakdown = HandBreakdown::of(&hand);
        assert_eq!(breakdown.base(), base_score(&hand));
        assert_eq!(breakdown.maki_points, 3);
        assert_eq!(breakdown.puddings, 1);
    }

    #[test]
    fn empty_hand_scores_zero() {
        assert_eq!(base_score(&[]), 0);
        assert_eq!(HandBreakdown::of(&[]).base(), 0);
    }
}
