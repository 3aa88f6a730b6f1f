pub mod policy;
pub mod simulate;

pub use policy::{
    FirstAvailablePolicy, HeuristicPolicy, Policy, PolicyContext, PreferencePolicy, Strategy,
    WeightedParams, WeightedPolicy,
};
pub use simulate::{
    Agent, play_match, simulate_baseline_game, simulate_baseline_game_with_seed, simulate_game,
    simulate_game_with_seed,
};
