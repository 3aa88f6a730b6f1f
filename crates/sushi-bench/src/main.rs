use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::Level;

use sushi_bench::config::{BenchmarkConfig, ResolvedOutputs};
use sushi_bench::experiments::{
    DEFAULT_SWEEP, format_sweep, run_lineup, run_sweep, run_undrafted, score_random_hand,
};
use sushi_bench::logging::{init_logging, init_stderr_logging};
use sushi_bench::tournament::TournamentRunner;
use sushi_bot::Strategy;

/// Batch driver for the sushi drafting simulator.
#[derive(Debug, Parser)]
#[command(
    name = "sushi-bench",
    author,
    version,
    about = "Deterministic Sushi Go strategy comparisons"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play a YAML-configured line-up and write JSONL rows plus a summary.
    Run(RunArgs),
    /// Score the first cards of one shuffled deck.
    Score {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 8)]
        cards: usize,
    },
    /// Mean scores by seat and round with every seat taking the first card.
    Baseline {
        #[command(flatten)]
        games: GameArgs,
        /// Score the dealt hands without drafting.
        #[arg(long)]
        undrafted: bool,
    },
    /// Mean scores by seat and round for an explicit line-up, one strategy per seat.
    Lineup {
        #[arg(long, default_value_t = 10_000)]
        games: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(required = true, num_args = 2..=5, value_name = "STRATEGY")]
        strategies: Vec<Strategy>,
    },
    /// Each strategy in seat 1 against first-available opponents.
    Sweep {
        #[command(flatten)]
        games: GameArgs,
        #[arg(value_name = "STRATEGY")]
        strategies: Vec<Strategy>,
    },
}

#[derive(Debug, Args)]
struct GameArgs {
    #[arg(long, default_value_t = 4)]
    players: usize,
    #[arg(long, default_value_t = 10_000)]
    games: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for deck generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of seat rotations per deck.
    #[arg(long, value_name = "COUNT")]
    permutations: Option<usize>,

    /// Exit after validating the configuration (no tournament is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args),
        Command::Score { seed, cards } => {
            println!("{}", score_random_hand(seed, cards));
            Ok(())
        }
        Command::Baseline { games, undrafted } => {
            init_stderr_logging(Level::WARN);
            let report = if undrafted {
                run_undrafted(games.players, games.games, games.seed)?
            } else {
                let lineup = vec![Strategy::First; games.players];
                run_lineup(&lineup, games.games, games.seed)?
            };
            println!("{report}");
            Ok(())
        }
        Command::Lineup {
            games,
            seed,
            strategies,
        } => {
            init_stderr_logging(Level::WARN);
            println!("{}", run_lineup(&strategies, games, seed)?);
            Ok(())
        }
        Command::Sweep { games, strategies } => {
            init_stderr_logging(Level::WARN);
            let strategies = if strategies.is_empty() {
                DEFAULT_SWEEP
                    .iter()
                    .map(|name| name.parse())
                    .collect::<Result<Vec<Strategy>, _>>()?
            } else {
                strategies
            };
            let rows = run_sweep(&strategies, games.players, games.games, games.seed)?;
            print!("{}", format_sweep(&rows));
            Ok(())
        }
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = BenchmarkConfig::from_path(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    if let Some(run_id) = args.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = args.games {
        config.games.count = games;
    }

    if let Some(seed) = args.seed {
        config.games.seed = Some(seed);
    }

    if let Some(permutations) = args.permutations {
        config.games.permutations = permutations;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let agent_count = config.agents.len();
    let run_id = config.run_id.clone();
    let games = config.games.count;
    let permutations = config.games.permutations;

    println!(
        "Loaded configuration '{run_id}' with {agent_count} agents ({games} games, {permutations} rotations)"
    );

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = TournamentRunner::new(config, outputs)?;

    if args.validate_only {
        println!("Validation-only mode: tournament execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Tournament complete for '{run_id}': {} games × {} rotations → {} rows at {}",
        summary.games_played,
        summary.permutations,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
