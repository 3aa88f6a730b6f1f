use super::{Policy, PolicyContext, take_logged};
use sushi_core::GameError;
use sushi_core::model::card::CardKind;
use sushi_core::model::hand::Hand;

/// Parses a comma separated preference list. `maki` and `nigiri` expand to
/// their groups in descending value; empty entries are skipped.
pub fn parse_preferences(list: &str) -> Result<Vec<CardKind>, GameError> {
    let mut order = Vec::new();
    for token in list.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        match token.to_ascii_lowercase().as_str() {
            "maki" => order.extend(CardKind::MAKI),
            "nigiri" => order.extend(CardKind::NIGIRI),
            _ => order.push(token.parse()?),
        }
    }
    Ok(order)
}

/// Takes the first offered card of the most preferred kind present, or the
/// first card when none of the listed kinds are on offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencePolicy {
    order: Vec<CardKind>,
    label: String,
}

impl PreferencePolicy {
    pub fn new(order: Vec<CardKind>) -> Self {
        let label = order
            .iter()
            .map(|kind| kind.as_str().to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join(",");
        Self { order, label }
    }

    pub fn order(&self) -> &[CardKind] {
        &self.order
    }

    fn choose(&self, hand: &Hand) -> Option<usize> {
        self.order.iter().find_map(|&kind| hand.position(kind))
    }
}

impl Policy for PreferencePolicy {
    fn take(&mut self, hand: &mut Hand, ctx: &PolicyContext<'_>) -> Option<CardKind> {
        match self.choose(hand) {
            Some(index) => take_logged(&self.label, ctx, hand, index, "preferred"),
            None => take_logged(&self.label, ctx, hand, 0, "fallback_first"),
        }
    }

    fn name(&self) -> &str {
        &self.label
    }
}
