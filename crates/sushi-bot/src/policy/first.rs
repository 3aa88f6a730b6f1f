use super::{Policy, PolicyContext, take_logged};
use sushi_core::model::card::CardKind;
use sushi_core::model::hand::Hand;

/// Always takes the first offered card. Serves as the baseline opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailablePolicy;

impl FirstAvailablePolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for FirstAvailablePolicy {
    fn take(&mut self, hand: &mut Hand, ctx: &PolicyContext<'_>) -> Option<CardKind> {
        take_logged(self.name(), ctx, hand, 0, "first")
    }

    fn name(&self) -> &str {
        "first"
    }
}
