//! Quick experiments driven from the command line: score one random hand,
//! average a fixed line-up over many games, and sweep strategies against
//! first-available opponents.

use rand::{RngCore, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use sushi_bot::{Agent, Strategy, simulate_game_with_seed};
use sushi_core::GameError;
use sushi_core::game::{ROUNDS, simulate_undrafted_game};
use sushi_core::model::card::CardKind;
use sushi_core::model::deck::{Deck, hand_size};
use sushi_core::model::hand::Collection;
use sushi_core::model::score::GameOutcome;
use sushi_core::scoring::HandBreakdown;

/// Strategies compared by `sweep` when none are named.
pub const DEFAULT_SWEEP: [&str; 9] = [
    "nigiri", "maki", "tempura", "dumpling", "pudding", "sashimi", "wasabi", "smart", "smarter",
];

fn game_seeds(master: u64, games: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(master);
    (0..games).map(|_| rng.next_u64()).collect()
}

/// Category breakdown of the first `cards` cards of a shuffled deck.
#[derive(Debug, Clone, Serialize)]
pub struct HandReport {
    pub hand: String,
    pub breakdown: HandBreakdown,
}

pub fn score_random_hand(seed: u64, cards: usize) -> HandReport {
    let deck = Deck::shuffled_with_seed(seed);
    let cards: Vec<CardKind> = deck.cards().iter().take(cards).copied().collect();
    let breakdown = HandBreakdown::of(&cards);
    HandReport {
        hand: Collection::with_cards(cards).to_string(),
        breakdown,
    }
}

impl fmt::Display for HandReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.breakdown;
        writeln!(f, "hand:     {}", self.hand)?;
        writeln!(f, "tempura:  {}", b.tempura)?;
        writeln!(f, "sashimi:  {}", b.sashimi)?;
        writeln!(f, "dumpling: {}", b.dumpling)?;
        writeln!(f, "nigiri:   {}", b.nigiri)?;
        writeln!(f, "maki:     {} icons", b.maki_points)?;
        write!(f, "pudding:  {}", b.puddings)
    }
}

/// Mean scores by seat across many games with the same line-up.
#[derive(Debug, Clone, Serialize)]
pub struct LineupReport {
    pub games: usize,
    pub labels: Vec<String>,
    /// Indexed `[round][seat]`.
    pub round_means: Vec<Vec<f64>>,
    pub final_means: Vec<f64>,
}

impl LineupReport {
    fn from_outcomes(labels: Vec<String>, outcomes: &[GameOutcome]) -> Self {
        let players = labels.len();
        let games = outcomes.len();
        let mut round_means = vec![vec![0.0; players]; ROUNDS];
        let mut final_means = vec![0.0; players];
        for outcome in outcomes {
            for (means, scores) in round_means.iter_mut().zip(&outcome.round_scores) {
                for (mean, score) in means.iter_mut().zip(scores) {
                    *mean += score;
                }
            }
            for (mean, score) in final_means.iter_mut().zip(&outcome.final_scores) {
                *mean += score;
            }
        }
        if games > 0 {
            let scale = 1.0 / games as f64;
            round_means.iter_mut().flatten().for_each(|m| *m *= scale);
            final_means.iter_mut().for_each(|m| *m *= scale);
        }
        Self {
            games,
            labels,
            round_means,
            final_means,
        }
    }
}

impl fmt::Display for LineupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seats = self
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| format!("{}: {label}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Seats: {seats}")?;
        writeln!(
            f,
            "Mean score by seat and round across {} games:",
            self.games
        )?;
        for (round, means) in self.round_means.iter().enumerate() {
            writeln!(f, "  round {}: {}", round + 1, format_row(means))?;
        }
        writeln!(f, "Mean final score by seat across {} games:", self.games)?;
        write!(f, "  {}", format_row(&self.final_means))
    }
}

fn format_row(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| format!("{value:8.3}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plays `games` games with one strategy per seat.
pub fn run_lineup(
    strategies: &[Strategy],
    games: usize,
    seed: u64,
) -> Result<LineupReport, GameError> {
    let outcomes = game_seeds(seed, games)
        .into_par_iter()
        .map(|game_seed| {
            let mut agents: Vec<Agent> = strategies.iter().map(Agent::from_strategy).collect();
            simulate_game_with_seed(&mut agents, game_seed)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let labels = strategies.iter().map(ToString::to_string).collect();
    Ok(LineupReport::from_outcomes(labels, &outcomes))
}

/// Scores dealt hands with no drafting at all.
pub fn run_undrafted(players: usize, games: usize, seed: u64) -> Result<LineupReport, GameError> {
    hand_size(players)?;
    let outcomes = game_seeds(seed, games)
        .into_par_iter()
        .map(|game_seed| {
            let mut rng = StdRng::seed_from_u64(game_seed);
            simulate_undrafted_game(players, &mut rng)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let labels = (0..players).map(|_| "dealt".to_string()).collect();
    Ok(LineupReport::from_outcomes(labels, &outcomes))
}

/// Mean final score of one strategy in seat 1 against first-available
/// opponents.
#[derive(Debug, Clone, Serialize)]
pub struct SweepRow {
    pub strategy: String,
    pub mean_score: f64,
    pub opponent_mean: f64,
    pub win_rate: f64,
}

pub fn run_sweep(
    strategies: &[Strategy],
    players: usize,
    games: usize,
    seed: u64,
) -> Result<Vec<SweepRow>, GameError> {
    hand_size(players)?;
    let seeds = game_seeds(seed, games);
    strategies
        .iter()
        .map(|strategy| {
            let mut lineup = vec![strategy.clone()];
            lineup.extend((1..players).map(|_| Strategy::First));
            let outcomes = seeds
                .par_iter()
                .map(|&game_seed| {
                    let mut agents: Vec<Agent> = lineup.iter().map(Agent::from_strategy).collect();
                    simulate_game_with_seed(&mut agents, game_seed)
                })
                .collect::<Result<Vec<_>, _>>()?;

            let n = outcomes.len().max(1) as f64;
            let mean_score = outcomes.iter().map(|o| o.final_scores[0]).sum::<f64>() / n;
            let opponent_mean = outcomes
                .iter()
                .map(|o| o.final_scores[1..].iter().sum::<f64>() / (players - 1) as f64)
                .sum::<f64>()
                / n;
            let wins = outcomes
                .iter()
                .filter(|o| o.winners().iter().any(|seat| seat.index() == 0))
                .count();
            Ok(SweepRow {
                strategy: strategy.to_string(),
                mean_score,
                opponent_mean,
                win_rate: wins as f64 / n,
            })
        })
        .collect()
}

pub fn format_sweep(rows: &[SweepRow]) -> String {
    let mut out = String::from("strategy                          mean   opponents   win %\n");
    for row in rows {
        out.push_str(&format!(
            "{:<30} {:8.3} {:11.3} {:7.1}\n",
            row.strategy,
            row.mean_score,
            row.opponent_mean,
            row.win_rate * 100.0
        ));
    }
    out
}
