use crate::model::player::Seat;
use crate::scoring::pudding_bonuses;
use serde::{Deserialize, Serialize};

/// One seat's result for a single round.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoundScore {
    pub base: u32,
    pub maki: f64,
}

impl RoundScore {
    pub fn total(&self) -> f64 {
        f64::from(self.base) + self.maki
    }
}

/// Running per-round results for one game.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBoard {
    players: usize,
    rounds: Vec<Vec<RoundScore>>,
}

impl ScoreBoard {
    pub fn new(players: usize) -> Self {
        Self {
            players,
            rounds: Vec::new(),
        }
    }

    pub fn players(&self) -> usize {
        self.players
    }

    pub fn record_round(&mut self, scores: Vec<RoundScore>) {
        debug_assert_eq!(scores.len(), self.players);
        self.rounds.push(scores);
    }

    pub fn rounds(&self) -> &[Vec<RoundScore>] {
        &self.rounds
    }

    /// Sum of base and maki points over the recorded rounds.
    pub fn totals(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.players];
        for round in &self.rounds {
            for (total, score) in totals.iter_mut().zip(round) {
                *total += score.total();
            }
        }
        totals
    }

    pub fn score(&self, seat: Seat) -> f64 {
        self.totals().get(seat.index()).copied().unwrap_or(0.0)
    }

    /// Applies the end-of-game pudding adjustment and freezes the result.
    pub fn finish(self, puddings: Vec<u32>) -> GameOutcome {
        let pudding_bonus = pudding_bonuses(&puddings);
        let final_scores = self
            .totals()
            .into_iter()
            .zip(&pudding_bonus)
            .map(|(total, bonus)| total + bonus)
            .collect();
        let round_scores = self
            .rounds
            .iter()
            .map(|round| round.iter().map(RoundScore::total).collect())
            .collect();

        GameOutcome {
            final_scores,
            round_scores,
            rounds: self.rounds,
            puddings,
            pudding_bonus,
        }
    }
}

/// Everything an external driver needs from one finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub final_scores: Vec<f64>,
    /// Base plus maki points, indexed `[round][seat]`.
    pub round_scores: Vec<Vec<f64>>,
    pub rounds: Vec<Vec<RoundScore>>,
    pub puddings: Vec<u32>,
    pub pudding_bonus: Vec<f64>,
}

impl GameOutcome {
    pub fn players(&self) -> usize {
        self.final_scores.len()
    }

    /// Seats sharing the highest final score.
    pub fn winners(&self) -> Vec<Seat> {
        let best = self
            .final_scores
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        self.final_scores
            .iter()
            .enumerate()
            .filter(|(_, score)| **score == best)
            .map(|(index, _)| Seat::new(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{RoundScore, ScoreBoard};
    use crate::model::player::Seat;

    fn round(values: &[(u32, f64)]) -> Vec<RoundScore> {
        values
            .iter()
            .map(|&(base, maki)| RoundScore { base, maki })
            .collect()
    }

    #[test]
    fn totals_sum_base_and_maki_across_rounds() {
        let mut board = ScoreBoard::new(2);
        board.record_round(round(&[(10, 6.0), (4, 3.0)]));
        board.record_round(round(&[(2, 3.0), (7, 6.0)]));
        assert_eq!(board.totals(), vec![21.0, 20.0]);
        assert_eq!(board.score(Seat::new(1)), 20.0);
    }

    #[test]
    fn finish_applies_pudding_once() {
        let mut board = ScoreBoard::new(2);
        board.record_round(round(&[(10, 3.0), (10, 3.0)]));
        board.record_round(round(&[(0, 3.0), (0, 3.0)]));
        let outcome = board.finish(vec![3, 1]);
        assert_eq!(outcome.pudding_bonus, vec![6.0, -6.0]);
        assert_eq!(outcome.final_scores, vec![22.0, 10.0]);
        assert_eq!(outcome.round_scores, vec![vec![13.0, 13.0], vec![3.0, 3.0]]);
    }

    #[test]
    fn winners_include_every_tied_leader() {
        let mut board = ScoreBoard::new(3);
        board.record_round(round(&[(5, 0.0), (5, 0.0), (1, 0.0)]));
        let outcome = board.finish(vec![0, 0, 0]);
        assert_eq!(outcome.winners(), vec![Seat::new(0), Seat::new(1)]);
    }
}
