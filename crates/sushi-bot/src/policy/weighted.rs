use super::{Policy, PolicyContext, take_logged};
use sushi_core::model::card::CardKind;
use sushi_core::model::hand::{Collection, Hand};

/// Tunable weights for the expected-value drafter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedParams {
    /// Face value of squid (default: 3)
    pub squid: f64,

    /// Face value of salmon (default: 2)
    pub salmon: f64,

    /// Face value of egg (default: 1)
    pub egg: f64,

    /// Factor applied to nigiri while a wasabi is waiting (default: 3)
    pub wasabi_multiplier: f64,

    /// Points for a finished tempura pair (default: 5)
    pub tempura_pair: f64,

    /// Points for a finished sashimi set (default: 10)
    pub sashimi_set: f64,

    /// Weight per maki icon (default: 0.25)
    pub maki_icon: f64,

    /// Weight of chopsticks, which have no effect in this rule set (default: -1)
    pub chopsticks: f64,
}

impl Default for WeightedParams {
    fn default() -> Self {
        Self {
            squid: 3.0,
            salmon: 2.0,
            egg: 1.0,
            wasabi_multiplier: 3.0,
            tempura_pair: 5.0,
            sashimi_set: 10.0,
            maki_icon: 0.25,
            chopsticks: -1.0,
        }
    }
}

/// Expected-value drafter ("smarter"). Scores every kind for the current
/// situation and takes the best one on offer; equal scores fall back to deck
/// composition order.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedPolicy {
    params: WeightedParams,
}

impl WeightedPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: WeightedParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &WeightedParams {
        &self.params
    }

    /// Weight of `kind` when `offered` cards are in front of a seat that has
    /// already drafted `held`.
    pub fn priority(&self, kind: CardKind, offered: usize, held: &Collection) -> f64 {
        let p = &self.params;
        let n = offered as f64;
        let nigiri = if held.wasabi_armed() {
            p.wasabi_multiplier
        } else {
            1.0
        };

        match kind {
            CardKind::Squid => p.squid * nigiri,
            CardKind::Salmon => p.salmon * nigiri,
            CardKind::Egg => p.egg * nigiri,
            CardKind::Tempura => {
                if held.count(CardKind::Tempura) % 2 == 1 {
                    p.tempura_pair
                } else {
                    p.tempura_pair * n * kind.probability()
                }
            }
            CardKind::Sashimi => match held.count(CardKind::Sashimi) % 3 {
                2 => p.sashimi_set,
                1 => p.sashimi_set * n * kind.probability(),
                _ => p.sashimi_set * n * kind.probability().powi(2),
            },
            CardKind::Maki3 | CardKind::Maki2 | CardKind::Maki1 => {
                kind.maki_value() as f64 * p.maki_icon
            }
            CardKind::Wasabi => {
                n * CardKind::NIGIRI
                    .iter()
                    .map(|nigiri| nigiri.probability())
                    .sum::<f64>()
            }
            CardKind::Chopsticks => p.chopsticks,
            CardKind::Dumpling | CardKind::Pudding => 0.0,
        }
    }

    /// Best kind present in `hand`. The first kind in composition order wins
    /// a tie.
    pub fn best_kind(&self, hand: &Hand, held: &Collection) -> Option<CardKind> {
        let offered = hand.len();
        let mut best: Option<(CardKind, f64)> = None;
        for kind in CardKind::ALL.into_iter().filter(|&kind| hand.contains(kind)) {
            let weight = self.priority(kind, offered, held);
            if best.is_none_or(|(_, top)| weight > top) {
                best = Some((kind, weight));
            }
        }
        best.map(|(kind, _)| kind)
    }
}

impl Policy for WeightedPolicy {
    fn take(&mut self, hand: &mut Hand, ctx: &PolicyContext<'_>) -> Option<CardKind> {
        if hand.len() <= 1 {
            return take_logged(self.name(), ctx, hand, 0, "last_card");
        }
        let index = self
            .best_kind(hand, ctx.collection)
            .and_then(|kind| hand.position(kind))
            .unwrap_or(0);
        take_logged(self.name(), ctx, hand, index, "highest_weight")
    }

    fn name(&self) -> &str {
        "smarter"
    }
}

#[cfg(test)]
mod tests {
    use super::{WeightedParams, WeightedPolicy};
    use crate::policy::Policy;
    use crate::policy::test_support::{ctx, hand};
    use sushi_core::model::card::CardKind::{self, *};
    use sushi_core::model::hand::Collection;

    fn pick(offered: &[CardKind], held: &[CardKind]) -> CardKind {
        let held = Collection::with_cards(held.to_vec());
        let mut offered = hand(offered);
        WeightedPolicy::new().take(&mut offered, &ctx(&held)).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn nigiri_weights_triple_on_armed_wasabi() {
        let policy = WeightedPolicy::new();
        let plain = Collection::new();
        let armed = Collection::with_cards(vec![Wasabi]);
        assert!(close(policy.priority(Squid, 5, &plain), 3.0));
        assert!(close(policy.priority(Squid, 5, &armed), 9.0));
        assert!(close(policy.priority(Egg, 5, &armed), 3.0));
    }

    #[test]
    fn set_weights_depend_on_progress() {
        let policy = WeightedPolicy::new();
        let odd_tempura = Collection::with_cards(vec![Tempura]);
        assert!(close(policy.priority(Tempura, 8, &odd_tempura), 5.0));
        let p_tempura = 14.0 / 108.0;
        assert!(close(
            policy.priority(Tempura, 8, &Collection::new()),
            5.0 * 8.0 * p_tempura
        ));

        let two_sashimi = Collection::with_cards(vec![Sashimi, Sashimi]);
        let one_sashimi = Collection::with_cards(vec![Sashimi]);
        let p_sashimi = 14.0 / 108.0;
        assert!(close(policy.priority(Sashimi, 4, &two_sashimi), 10.0));
        assert!(close(
            policy.priority(Sashimi, 4, &one_sashimi),
            10.0 * 4.0 * p_sashimi
        ));
        assert!(close(
            policy.priority(Sashimi, 4, &Collection::new()),
            10.0 * 4.0 * p_sashimi * p_sashimi
        ));
    }

    #[test]
    fn maki_and_fillers_have_fixed_weights() {
        let policy = WeightedPolicy::new();
        let held = Collection::new();
        assert!(close(policy.priority(Maki3, 7, &held), 0.75));
        assert!(close(policy.priority(Maki1, 7, &held), 0.25));
        assert!(close(policy.priority(Chopsticks, 7, &held), -1.0));
        assert!(close(policy.priority(Pudding, 7, &held), 0.0));
        assert!(close(
            policy.priority(Wasabi, 6, &held),
            6.0 * 20.0 / 108.0
        ));
    }

    #[test]
    fn squid_beats_salmon_and_lands_on_wasabi() {
        assert_eq!(pick(&[Egg, Salmon, Squid], &[]), Squid);
        assert_eq!(pick(&[Tempura, Squid, Sashimi], &[Wasabi]), Squid);
    }

    #[test]
    fn completes_a_sashimi_set() {
        assert_eq!(pick(&[Squid, Sashimi, Salmon], &[Sashimi, Sashimi]), Sashimi);
    }

    #[test]
    fn ties_follow_composition_order() {
        // Dumpling and pudding both weigh zero; dumpling comes first.
        assert_eq!(pick(&[Pudding, Chopsticks, Dumpling], &[]), Dumpling);
    }

    #[test]
    fn takes_first_copy_of_chosen_kind() {
        let held = Collection::new();
        let mut offered = hand(&[Egg, Squid, Pudding, Squid]);
        let card = WeightedPolicy::new().take(&mut offered, &ctx(&held));
        assert_eq!(card, Some(Squid));
        assert_eq!(offered.cards(), &[Egg, Pudding, Squid]);
    }

    #[test]
    fn single_card_is_taken_unconditionally() {
        assert_eq!(pick(&[Chopsticks], &[]), Chopsticks);
    }

    #[test]
    fn custom_params_shift_the_choice() {
        let params = WeightedParams {
            maki_icon: 2.0,
            ..WeightedParams::default()
        };
        let held = Collection::new();
        let mut offered = hand(&[Squid, Maki3]);
        let card = WeightedPolicy::with_params(params).take(&mut offered, &ctx(&held));
        assert_eq!(card, Some(Maki3));
    }
}
