use crate::policy::{Policy, Strategy};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sushi_core::GameError;
use sushi_core::game::MatchState;
use sushi_core::model::score::GameOutcome;
use tracing::{Level, event};

/// A named policy occupying one seat.
pub struct Agent {
    pub name: String,
    pub policy: Box<dyn Policy>,
}

impl Agent {
    pub fn new(name: impl Into<String>, policy: Box<dyn Policy>) -> Self {
        Self {
            name: name.into(),
            policy,
        }
    }

    /// Agent named after its strategy.
    pub fn from_strategy(strategy: &Strategy) -> Self {
        Self::new(strategy.to_string(), strategy.spawn())
    }

    pub fn first_available() -> Self {
        Self::from_strategy(&Strategy::First)
    }
}

impl core::fmt::Debug for Agent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("policy", &self.policy.name())
            .finish()
    }
}

/// Plays a whole game, seat `i` drafting with `agents[i]`.
pub fn play_match(state: MatchState, agents: &mut [Agent]) -> Result<GameOutcome, GameError> {
    if agents.len() != state.players() {
        return Err(GameError::InvalidParticipantCount {
            found: agents.len(),
        });
    }

    event!(
        target: "sushi_bot::simulate",
        Level::DEBUG,
        players = agents.len(),
        seed = ?state.seed(),
        agents = ?agents.iter().map(|agent| agent.name.as_str()).collect::<Vec<_>>(),
        "game started"
    );

    state.play(|ctx, hand| agents[ctx.seat.index()].policy.take(hand, ctx))
}

/// Shuffles a fresh deck from `rng` and plays one game.
pub fn simulate_game<R: Rng + ?Sized>(
    agents: &mut [Agent],
    rng: &mut R,
) -> Result<GameOutcome, GameError> {
    let state = MatchState::new(agents.len(), rng)?;
    play_match(state, agents)
}

pub fn simulate_game_with_seed(agents: &mut [Agent], seed: u64) -> Result<GameOutcome, GameError> {
    let state = MatchState::with_seed(agents.len(), seed)?;
    play_match(state, agents)
}

/// One game where every seat takes the first card offered.
pub fn simulate_baseline_game<R: Rng + ?Sized>(
    players: usize,
    rng: &mut R,
) -> Result<GameOutcome, GameError> {
    let mut agents: Vec<Agent> = (0..players).map(|_| Agent::first_available()).collect();
    simulate_game(&mut agents, rng)
}

/// Convenience for callers that only hold a seed.
pub fn simulate_baseline_game_with_seed(players: usize, seed: u64) -> Result<GameOutcome, GameError> {
    let mut rng = StdRng::seed_from_u64(seed);
    simulate_baseline_game(players, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sushi_core::game::ROUNDS;

    fn lineup(strategies: &[&str]) -> Vec<Agent> {
        strategies
            .iter()
            .map(|text| Agent::from_strategy(&text.parse().unwrap()))
            .collect()
    }

    #[test]
    fn every_strategy_completes_a_game_at_every_table_size() {
        for players in 2..=5 {
            let names = ["first", "smart", "smarter", "maki,nigiri", "sashimi"];
            let mut agents = lineup(&names[..players]);
            let outcome = simulate_game_with_seed(&mut agents, 31 + players as u64).unwrap();
            assert_eq!(outcome.final_scores.len(), players);
            assert_eq!(outcome.round_scores.len(), ROUNDS);
            assert!(outcome.final_scores.iter().all(|score| score.is_finite()));
        }
    }

    #[test]
    fn rejects_unsupported_table_sizes() {
        let mut solo = lineup(&["first"]);
        assert_eq!(
            simulate_game_with_seed(&mut solo, 1).unwrap_err(),
            GameError::InvalidParticipantCount { found: 1 }
        );
        let mut crowd = lineup(&["first"; 6]);
        assert_eq!(
            simulate_game_with_seed(&mut crowd, 1).unwrap_err(),
            GameError::InvalidParticipantCount { found: 6 }
        );
    }

    #[test]
    fn agent_count_must_match_the_table() {
        let state = MatchState::with_seed(3, 4).unwrap();
        let mut agents = lineup(&["first", "smart"]);
        assert_eq!(
            play_match(state, &mut agents).unwrap_err(),
            GameError::InvalidParticipantCount { found: 2 }
        );
    }

    #[test]
    fn same_seed_gives_same_outcome() {
        let a = simulate_game_with_seed(&mut lineup(&["smarter", "smart", "first"]), 99).unwrap();
        let b = simulate_game_with_seed(&mut lineup(&["smarter", "smart", "first"]), 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn baseline_game_matches_explicit_first_lineup() {
        let baseline = simulate_baseline_game_with_seed(4, 12).unwrap();
        let explicit = simulate_game_with_seed(&mut lineup(&["first"; 4]), 12).unwrap();
        assert_eq!(baseline, explicit);
    }

    #[test]
    fn maki_pool_is_handed_out_every_round() {
        let outcome = simulate_game_with_seed(&mut lineup(&["maki", "first", "smart"]), 5).unwrap();
        for round in &outcome.rounds {
            let pool: f64 = round.iter().map(|score| score.maki).sum();
            assert!((pool - 6.0).abs() < 1e-9 || (pool - 9.0).abs() < 1e-9);
        }
    }
}
