mod permutations;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::analytics::{AnalyticsCollector, AnalyticsError};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::Serialize;
use sushi_bot::{Agent, Strategy, play_match};
use sushi_core::GameError;
use sushi_core::game::MatchState;
use sushi_core::model::deck::hand_size;
use sushi_core::model::player::Seat;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{AgentConfig, BenchmarkConfig, ResolvedOutputs};

pub use permutations::SeatRotations;

/// Primary entry point for orchestrating tournaments.
pub struct TournamentRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: Vec<AgentBlueprint>,
    rotations: SeatRotations,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub permutations: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
}

impl TournamentRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let agents = AgentBlueprint::from_configs(&config.agents)?;

        if hand_size(agents.len()).is_err() {
            return Err(RunnerError::SeatCount {
                found: agents.len(),
            });
        }

        if config.games.permutations > agents.len() {
            return Err(RunnerError::PermutationLimit {
                requested: config.games.permutations,
                max: agents.len(),
            });
        }

        let rotations = SeatRotations::new(agents.len(), config.games.permutations);

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            agents,
            rotations,
        })
    }

    /// Plays every game, then writes JSONL rows and the Markdown summary.
    ///
    /// Game seeds are drawn from the master seed before any game starts, so
    /// results do not depend on how rayon schedules the work.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let jobs: Vec<(usize, usize, u64)> = (0..self.config.games.count)
            .flat_map(|game_index| {
                let seed = rng.next_u64();
                (0..self.rotations.len()).map(move |perm_index| (game_index, perm_index, seed))
            })
            .collect();

        let results = jobs
            .par_iter()
            .map(|&(game_index, perm_index, seed)| self.play_game(game_index, perm_index, seed))
            .collect::<Result<Vec<_>, _>>()?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut analytics = AnalyticsCollector::new(&self.config)?;
        let mut rows_written = 0usize;
        for result in &results {
            analytics.record_game(result)?;
            rows_written += write_game_rows(&mut writer, &self.config.run_id, result)?;
        }
        writer.flush()?;

        let summary = analytics.finalize()?;
        summary.write_markdown(&self.outputs.summary_md)?;

        let telemetry_path = self.logging_enabled.then(|| {
            self.outputs
                .summary_md
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
                .join("telemetry.jsonl")
        });

        Ok(RunSummary {
            games_played: self.config.games.count,
            permutations: self.rotations.len(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
        })
    }

    fn play_game(
        &self,
        game_index: usize,
        permutation_index: usize,
        seed: u64,
    ) -> Result<GameResult, RunnerError> {
        let rotation = self.rotations.as_slice().get(permutation_index).ok_or(
            RunnerError::PermutationLimit {
                requested: permutation_index + 1,
                max: self.rotations.len(),
            },
        )?;
        let mut seats = build_seats(rotation, &self.agents)?;

        let state = MatchState::with_seed(seats.len(), seed).map_err(|source| {
            RunnerError::Game {
                game_index,
                source,
            }
        })?;
        let outcome = play_match(state, &mut seats).map_err(|source| RunnerError::Game {
            game_index,
            source,
        })?;

        if self.logging_enabled && tracing::enabled!(Level::INFO) {
            event!(
                target: "sushi_bench::game",
                Level::INFO,
                run_id = %self.config.run_id,
                game_index = game_index as u32,
                permutation_index = permutation_index as u32,
                seed,
                final_scores = ?outcome.final_scores,
            );
        }

        let winners = outcome.winners();
        let seat_results = seats
            .iter()
            .zip(rotation)
            .enumerate()
            .map(|(index, (agent, &agent_index))| SeatResult {
                seat: Seat::new(index),
                agent_name: agent.name.clone(),
                strategy: self.agents[agent_index].strategy.to_string(),
                final_score: outcome.final_scores[index],
                round_scores: outcome.round_scores.iter().map(|round| round[index]).collect(),
                puddings: outcome.puddings[index],
                pudding_bonus: outcome.pudding_bonus[index],
                won: winners.contains(&Seat::new(index)),
            })
            .collect();

        Ok(GameResult {
            game_index,
            permutation_index,
            seed,
            seat_results,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_rows(
    writer: &mut BufWriter<File>,
    run_id: &str,
    result: &GameResult,
) -> Result<usize, RunnerError> {
    let game_id = format!(
        "G{:05}_P{:02}",
        result.game_index, result.permutation_index
    );
    let seating: Vec<&str> = result
        .seat_results
        .iter()
        .map(|seat| seat.agent_name.as_str())
        .collect();

    let mut rows_written = 0usize;
    for seat in &result.seat_results {
        let row = GameLogRow {
            run_id,
            game_id: &game_id,
            game_index: result.game_index,
            permutation_index: result.permutation_index,
            game_seed: result.seed,
            seat: seat.seat.index(),
            agent: &seat.agent_name,
            strategy: &seat.strategy,
            seating: &seating,
            final_score: seat.final_score,
            round_scores: &seat.round_scores,
            puddings: seat.puddings,
            pudding_bonus: seat.pudding_bonus,
            won: seat.won,
        };

        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        rows_written += 1;
    }

    Ok(rows_written)
}

fn build_seats(rotation: &[usize], agents: &[AgentBlueprint]) -> Result<Vec<Agent>, RunnerError> {
    rotation
        .iter()
        .enumerate()
        .map(|(seat_index, &agent_index)| {
            agents
                .get(agent_index)
                .map(AgentBlueprint::spawn)
                .ok_or(RunnerError::InvalidPermutation {
                    index: seat_index,
                    agent_index,
                })
        })
        .collect()
}

/// Everything the writers and analytics need from one finished game.
pub struct GameResult {
    pub game_index: usize,
    pub permutation_index: usize,
    pub seed: u64,
    pub seat_results: Vec<SeatResult>,
}

pub struct SeatResult {
    pub seat: Seat,
    pub agent_name: String,
    pub strategy: String,
    pub final_score: f64,
    pub round_scores: Vec<f64>,
    pub puddings: u32,
    pub pudding_bonus: f64,
    /// Highest final score at the table, shared on ties.
    pub won: bool,
}

#[derive(Serialize)]
struct GameLogRow<'a> {
    run_id: &'a str,
    game_id: &'a str,
    game_index: usize,
    permutation_index: usize,
    game_seed: u64,
    seat: usize,
    agent: &'a str,
    strategy: &'a str,
    seating: &'a [&'a str],
    final_score: f64,
    round_scores: &'a [f64],
    puddings: u32,
    pudding_bonus: f64,
    won: bool,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("{0}")]
    Agent(#[from] AgentError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game {game_index} failed: {source}")]
    Game {
        game_index: usize,
        #[source]
        source: GameError,
    },
    #[error("games need between 2 and 5 agents but found {found}")]
    SeatCount { found: usize },
    #[error("requested {requested} seat rotations exceeds maximum of {max}")]
    PermutationLimit { requested: usize, max: usize },
    #[error("rotation {index} references invalid agent index {agent_index}")]
    InvalidPermutation { index: usize, agent_index: usize },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent '{name}' has an invalid strategy: {source}")]
    InvalidStrategy {
        name: String,
        #[source]
        source: GameError,
    },
}

/// Parsed agent definition; spawns a fresh policy for every game.
struct AgentBlueprint {
    name: String,
    strategy: Strategy,
}

impl AgentBlueprint {
    fn from_configs(configs: &[AgentConfig]) -> Result<Vec<Self>, AgentError> {
        configs.iter().map(Self::from_config).collect()
    }

    fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let strategy = config
            .strategy()
            .map_err(|source| AgentError::InvalidStrategy {
                name: config.name.clone(),
                source,
            })?;
        Ok(Self {
            name: config.name.clone(),
            strategy,
        })
    }

    fn spawn(&self) -> Agent {
        Agent::new(self.name.clone(), self.strategy.spawn())
    }
}
