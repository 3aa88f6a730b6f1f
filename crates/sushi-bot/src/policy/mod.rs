mod first;
mod heuristic;
mod preference;
mod strategy;
mod weighted;

pub use first::FirstAvailablePolicy;
pub use heuristic::HeuristicPolicy;
pub use preference::{PreferencePolicy, parse_preferences};
pub use strategy::Strategy;
pub use weighted::{WeightedParams, WeightedPolicy};

pub use sushi_core::game::PickContext as PolicyContext;

use sushi_core::model::card::CardKind;
use sushi_core::model::hand::Hand;
use tracing::{Level, event};

/// Drafting behaviour bound to one seat.
pub trait Policy: Send {
    /// Removes exactly one card from `hand` and returns it. Only an empty hand
    /// may yield `None`.
    fn take(&mut self, hand: &mut Hand, ctx: &PolicyContext<'_>) -> Option<CardKind>;

    /// Short label used in logs and reports.
    fn name(&self) -> &str;
}

/// Takes the card at `index`, tracing the decision against the hand as it was
/// offered.
pub(crate) fn take_logged(
    policy: &str,
    ctx: &PolicyContext<'_>,
    hand: &mut Hand,
    index: usize,
    reason: &'static str,
) -> Option<CardKind> {
    log_decision(policy, ctx, hand, index, reason);
    hand.take_at(index)
}

fn log_decision(policy: &str, ctx: &PolicyContext<'_>, offered: &Hand, index: usize, reason: &str) {
    if !tracing::enabled!(target: "sushi_bot::policy", Level::TRACE) {
        return;
    }

    let chosen = offered
        .cards()
        .get(index)
        .map(|card| card.to_string())
        .unwrap_or_else(|| "-".to_string());

    event!(
        target: "sushi_bot::policy",
        Level::TRACE,
        policy,
        seat = %ctx.seat,
        round = ctx.round,
        turn = ctx.turn,
        offered = %offered,
        held = %ctx.collection,
        chosen = %chosen,
        reason,
    );
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::PolicyContext;
    use sushi_core::model::card::CardKind;
    use sushi_core::model::hand::{Collection, Hand};
    use sushi_core::model::player::Seat;

    pub fn hand(cards: &[CardKind]) -> Hand {
        Hand::with_cards(cards.to_vec())
    }

    pub fn ctx(collection: &Collection) -> PolicyContext<'_> {
        PolicyContext {
            seat: Seat::new(0),
            players: 4,
            round: 1,
            turn: 0,
            collection,
        }
    }
}
