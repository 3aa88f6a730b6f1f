use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use sushi_core::game::ROUNDS;
use thiserror::Error;

use crate::config::BenchmarkConfig;
use crate::tournament::GameResult;

const CONFIDENCE_Z: f64 = 1.96; // 95% CI

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("baseline agent '{0}' not present in tournament results")]
    MissingBaseline(String),
    #[error("agent '{0}' defined in results but missing from configuration")]
    UnknownAgent(String),
    #[error("baseline '{0}' missing for game {1}")]
    MissingBaselineGame(String, String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub struct AnalyticsCollector {
    baseline: String,
    agents: HashMap<String, AgentAccumulator>,
    comparisons: HashMap<String, ComparisonAccumulator>,
    agent_order: Vec<String>,
}

impl AnalyticsCollector {
    pub fn new(config: &BenchmarkConfig) -> Result<Self, AnalyticsError> {
        let baseline = config
            .metrics
            .baseline
            .clone()
            .ok_or_else(|| AnalyticsError::MissingBaseline("<unset>".into()))?;

        let mut agents = HashMap::new();
        let mut order = Vec::new();
        for agent in &config.agents {
            agents.insert(
                agent.name.clone(),
                AgentAccumulator::new(agent.name.clone(), agent.strategy.clone()),
            );
            order.push(agent.name.clone());
        }

        if !agents.contains_key(&baseline) {
            return Err(AnalyticsError::MissingBaseline(baseline));
        }

        Ok(Self {
            baseline,
            agents,
            comparisons: HashMap::new(),
            agent_order: order,
        })
    }

    pub fn record_game(&mut self, result: &GameResult) -> Result<(), AnalyticsError> {
        let game_id = format!(
            "G{:05}_P{:02}",
            result.game_index, result.permutation_index
        );

        let baseline_score = result
            .seat_results
            .iter()
            .find(|seat| seat.agent_name == self.baseline)
            .map(|seat| seat.final_score)
            .ok_or_else(|| {
                AnalyticsError::MissingBaselineGame(self.baseline.clone(), game_id.clone())
            })?;

        for seat in &result.seat_results {
            let acc = self
                .agents
                .get_mut(&seat.agent_name)
                .ok_or_else(|| AnalyticsError::UnknownAgent(seat.agent_name.clone()))?;
            acc.record_game(seat.final_score, seat.won, &seat.round_scores);
        }

        for seat in &result.seat_results {
            if seat.agent_name == self.baseline {
                continue;
            }
            self.comparisons
                .entry(seat.agent_name.clone())
                .or_insert_with(ComparisonAccumulator::new)
                .record(seat.final_score - baseline_score);
        }

        Ok(())
    }

    pub fn finalize(mut self) -> Result<AnalyticsSummary, AnalyticsError> {
        let mut reports = Vec::new();
        for name in &self.agent_order {
            if let Some(acc) = self.agents.remove(name) {
                reports.push(acc.into_report());
            }
        }

        let mut comparisons = Vec::new();
        for report in &reports {
            if report.name == self.baseline {
                comparisons.push(ComparisonReport {
                    agent: report.name.clone(),
                    p_value: 1.0,
                    sample_size: report.games,
                });
                continue;
            }
            let (p_value, sample_size) = self
                .comparisons
                .remove(&report.name)
                .map(ComparisonAccumulator::wilcoxon_signed_rank)
                .unwrap_or((1.0, 0));
            comparisons.push(ComparisonReport {
                agent: report.name.clone(),
                p_value,
                sample_size,
            });
        }

        Ok(AnalyticsSummary {
            baseline: self.baseline,
            agents: reports,
            comparisons,
        }
        .enrich())
    }
}

struct AgentAccumulator {
    name: String,
    strategy: String,
    total_score: f64,
    games: u32,
    wins: u32,
    per_game_scores: Vec<f64>,
    round_totals: [f64; ROUNDS],
}

impl AgentAccumulator {
    fn new(name: String, strategy: String) -> Self {
        Self {
            name,
            strategy,
            total_score: 0.0,
            games: 0,
            wins: 0,
            per_game_scores: Vec::new(),
            round_totals: [0.0; ROUNDS],
        }
    }

    fn record_game(&mut self, score: f64, won: bool, round_scores: &[f64]) {
        self.total_score += score;
        self.games += 1;
        self.per_game_scores.push(score);
        if won {
            self.wins += 1;
        }
        for (total, round) in self.round_totals.iter_mut().zip(round_scores) {
            *total += round;
        }
    }

    fn into_report(self) -> AgentReport {
        let games = self.games as f64;
        let mean = |total: f64| if self.games == 0 { 0.0 } else { total / games };

        AgentReport {
            name: self.name.clone(),
            strategy: self.strategy.clone(),
            games: self.games as usize,
            mean_score: mean(self.total_score),
            ci95: confidence_interval(&self.per_game_scores),
            wins: self.wins as usize,
            round_means: self.round_totals.iter().map(|&total| mean(total)).collect(),
            delta_vs_baseline: 0.0, // Filled later once we know baseline report
        }
    }
}

#[derive(Clone)]
struct ComparisonAccumulator {
    diffs: Vec<f64>,
}

impl ComparisonAccumulator {
    fn new() -> Self {
        Self { diffs: Vec::new() }
    }

    fn record(&mut self, diff: f64) {
        self.diffs.push(diff);
    }

    /// Two-sided p-value of the paired differences (normal approximation
    /// with tie and continuity corrections) and the count of non-zero pairs.
    fn wilcoxon_signed_rank(self) -> (f64, usize) {
        let diffs: Vec<f64> = self
            .diffs
            .into_iter()
            .filter(|d| d.abs() > f64::EPSILON)
            .collect();
        let n = diffs.len();
        if n == 0 {
            return (1.0, 0);
        }

        let mut paired: Vec<(f64, f64)> =
            diffs.into_iter().map(|d| (d.abs(), d.signum())).collect();
        paired.sort_by(|a, b| a.0.total_cmp(&b.0));

        // Rank handling with ties
        let mut ranks = Vec::with_capacity(n);
        let mut tie_sizes = Vec::new();
        let mut i = 0;
        while i < paired.len() {
            let mut j = i;
            while j + 1 < paired.len() && (paired[j + 1].0 - paired[i].0).abs() < 1e-12 {
                j += 1;
            }
            let rank = (i + j + 2) as f64 / 2.0;
            for entry in &paired[i..=j] {
                ranks.push((rank, entry.1));
            }
            if j > i {
                tie_sizes.push(j - i + 1);
            }
            i = j + 1;
        }

        let w_plus: f64 = ranks
            .iter()
            .filter(|(_, sign)| *sign > 0.0)
            .map(|(rank, _)| *rank)
            .sum();
        let w_minus: f64 = ranks
            .iter()
            .filter(|(_, sign)| *sign < 0.0)
            .map(|(rank, _)| *rank)
            .sum();

        let w = w_plus.min(w_minus);
        let n_f = n as f64;
        let mean_w = n_f * (n_f + 1.0) / 4.0;

        let tie_adjustment: f64 = tie_sizes
            .into_iter()
            .map(|count| {
                let c = count as f64;
                (c.powi(3) - c) / 48.0
            })
            .sum();
        let variance_w = n_f * (n_f + 1.0) * (2.0 * n_f + 1.0) / 24.0 - tie_adjustment;
        if variance_w <= 0.0 {
            return (1.0, n);
        }

        let Ok(normal) = Normal::new(0.0, 1.0) else {
            return (1.0, n);
        };
        let z = ((w - mean_w).abs() - 0.5).max(0.0) / variance_w.sqrt();
        let p = 2.0 * (1.0 - normal.cdf(z));
        (p.clamp(0.0, 1.0), n)
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub baseline: String,
    pub agents: Vec<AgentReport>,
    pub comparisons: Vec<ComparisonReport>,
}

impl AnalyticsSummary {
    pub fn enrich(mut self) -> Self {
        let baseline_mean = self
            .agents
            .iter()
            .find(|agent| agent.name == self.baseline)
            .map(|agent| agent.mean_score)
            .unwrap_or(0.0);

        for agent in &mut self.agents {
            agent.delta_vs_baseline = agent.mean_score - baseline_mean;
        }

        self
    }

    pub fn p_value(&self, agent: &str) -> f64 {
        self.comparisons
            .iter()
            .find(|c| c.agent == agent)
            .map(|c| c.p_value)
            .unwrap_or(1.0)
    }

    pub fn to_markdown(&self) -> String {
        let mut rows = String::new();
        rows.push_str("# Tournament Summary\n\n");
        rows.push_str(&format!(
            "Baseline: {} (higher scores are better)\n\n",
            self.baseline
        ));
        rows.push_str("| Agent | Strategy | Games | Mean score | Δ vs baseline | 95% CI | Win % |");
        for round in 1..=ROUNDS {
            rows.push_str(&format!(" Round {round} |"));
        }
        rows.push_str(" p-value |\n");
        rows.push_str("|-------|----------|-------|------------|----------------|--------|-------|");
        for _ in 0..ROUNDS {
            rows.push_str("---------|");
        }
        rows.push_str("---------|\n");

        for agent in &self.agents {
            let win_rate = if agent.games == 0 {
                0.0
            } else {
                agent.wins as f64 / agent.games as f64
            };

            rows.push_str(&format!(
                "| {name} | {strategy} | {games} | {mean:.3} | {delta:+.3} | [{ci_low:.3}, {ci_high:.3}] | {win:.1}% |",
                name = agent.name,
                strategy = agent.strategy,
                games = agent.games,
                mean = agent.mean_score,
                delta = agent.delta_vs_baseline,
                ci_low = agent.ci95.0,
                ci_high = agent.ci95.1,
                win = win_rate * 100.0,
            ));
            for round in &agent.round_means {
                rows.push_str(&format!(" {round:.3} |"));
            }
            rows.push_str(&format!(" {:.3} |\n", self.p_value(&agent.name)));
        }
        rows
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        fs::write(path.as_ref(), self.to_markdown()).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub name: String,
    pub strategy: String,
    pub games: usize,
    pub mean_score: f64,
    pub ci95: (f64, f64),
    pub wins: usize,
    pub round_means: Vec<f64>,
    #[serde(skip)]
    pub delta_vs_baseline: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub agent: String,
    pub p_value: f64,
    pub sample_size: usize,
}

/// Normal-approximation 95% interval around the mean of `points`.
pub fn confidence_interval(points: &[f64]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let mean = points.iter().sum::<f64>() / points.len() as f64;
    if points.len() == 1 {
        return (mean, mean);
    }
    let variance = points
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (points.len() as f64 - 1.0);
    let std_error = (variance / points.len() as f64).sqrt();
    let margin = CONFIDENCE_Z * std_error;
    (mean - margin, mean + margin)
}
