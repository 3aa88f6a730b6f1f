//! Scoring rules: per-hand category values and the cross-hand majority
//! bonuses for maki and pudding.

mod hand;
mod modifiers;

pub use hand::{
    HandBreakdown, base_score, dumpling_score, nigiri_score, sashimi_score, tempura_score,
};
pub use modifiers::{MAKI_FIRST, MAKI_SECOND, PUDDING_SWING, maki_bonuses, pudding_bonuses};
