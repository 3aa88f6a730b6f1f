pub mod draft;
pub mod match_state;
pub mod serialization;

pub use draft::{DraftRound, PickContext};
pub use match_state::{MatchState, ROUNDS, simulate_undrafted_game};
