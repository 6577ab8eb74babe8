//! Mousel simulator CLI - plays whole games in memory with AI seats.
//!
//! Every decision still goes through the engine's reducer, so a run doubles
//! as a conformance check for the registered policies.

mod metrics;
mod output;
mod simulator;
mod types;

use std::time::{Duration, Instant};

use clap::Parser;
use metrics::{build_game_metrics, RunSettings};
use mousel::ai::{registered_ais, AiConfig, Seat};
use mousel::domain::player::PlayerId;
use mousel::RulesConfig;
use output::OutputWriter;
use simulator::{GameResult, Simulator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use types::{MetricsLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "mousel-simulator")]
#[command(about = "In-memory Mousel game simulator for AI evaluation")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Players at the table
    #[arg(short, long, default_value = "4")]
    players: usize,

    /// AI for each seat in order, by registered name or as a JSON config
    /// (`{"ai": "RandomPlayer", "seed": 1}`); missing seats use the last one
    #[arg(long = "ai", conflicts_with = "seats")]
    ai: Vec<String>,

    /// AI for every seat
    #[arg(long)]
    seats: Option<String>,

    /// Base seed; game `n` uses `seed + n`. Random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Stop a game after this many settled rounds if nobody ended it
    #[arg(long, default_value = "50")]
    max_rounds: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Gzip the JSONL output
    #[arg(long)]
    compress: bool,

    /// Metrics detail level
    #[arg(long, default_value = "detailed")]
    metrics_level: MetricsLevel,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default; RUST_LOG wins when set.
    let default_filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let rules = RulesConfig::from_env()?;
    if !rules.allows_player_count(args.players) {
        return Err(format!(
            "--players must be between {} and {}",
            rules.min_players, rules.max_players
        )
        .into());
    }

    let seat_configs = seat_configs(&args)?;
    let ai_types: Vec<String> = seat_configs
        .iter()
        .map(|c| c.name.clone().unwrap_or_else(|| mousel::ai::DEFAULT_AI.to_string()))
        .collect();
    if args.show_output {
        info!(games = args.games, players = args.players, ?ai_types, "starting simulator");
    }

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;
    let run = RunSettings {
        ai_types,
        max_rounds: args.max_rounds,
        total_games: args.games,
        level: args.metrics_level.clone(),
    };

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let game_seed = match args.seed {
            Some(s) => s.wrapping_add(u64::from(game_num)),
            None => rand::random(),
        };

        let seats = build_seats(&seat_configs, game_seed)?;
        let simulator = Simulator::new(rules.clone(), game_seed, args.max_rounds);
        match simulator.simulate_game(&seats) {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(game_num, game_seed, &run, &result, duration_ms);
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }
                if args.verbose {
                    info!(
                        game_num,
                        rounds = result.rounds.len(),
                        deltas = ?result.bank_deltas(),
                        "game finished"
                    );
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} (seed {}) failed: {}", game_num, game_seed, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.cloned();
    let csv_path = csv_path.clone();
    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, &run.ai_types, errors, elapsed, args.games);
    }

    Ok(())
}

/// One config per seat, from `--seats` or the `--ai` list.
fn seat_configs(args: &Args) -> Result<Vec<AiConfig>, Box<dyn std::error::Error>> {
    let entries: Vec<&str> = match (&args.seats, args.ai.last()) {
        (Some(all), _) => vec![all.as_str(); args.players],
        (None, Some(last)) => (0..args.players)
            .map(|i| args.ai.get(i).unwrap_or(last).as_str())
            .collect(),
        (None, None) => vec![mousel::ai::DEFAULT_AI; args.players],
    };

    entries
        .into_iter()
        .map(|entry| -> Result<AiConfig, Box<dyn std::error::Error>> {
            let config = if entry.trim_start().starts_with('{') {
                AiConfig::parse(entry)?
            } else {
                AiConfig::named(entry)
            };
            let name = config.name.as_deref().unwrap_or(mousel::ai::DEFAULT_AI);
            if mousel::ai::by_name(name).is_none() {
                let known: Vec<&str> = registered_ais().iter().map(|f| f.name).collect();
                return Err(format!("Unknown AI type '{name}', expected one of {known:?}").into());
            }
            Ok(config)
        })
        .collect()
}

/// Instantiate the seats for one game; unseeded configs derive from the game seed.
fn build_seats(
    configs: &[AiConfig],
    game_seed: u64,
) -> Result<Vec<Seat>, Box<dyn std::error::Error>> {
    configs
        .iter()
        .enumerate()
        .map(|(i, config)| -> Result<Seat, Box<dyn std::error::Error>> {
            Ok(config.clone().for_seat(game_seed, i as PlayerId).build()?)
        })
        .collect()
}

fn print_summary(
    results: &[GameResult],
    ai_types: &[String],
    errors: u32,
    elapsed: Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!("Average time per game: {:?}", elapsed / results.len() as u32);

    let finished = results.iter().filter(|r| r.completed).count();
    let rounds: usize = results.iter().map(|r| r.rounds.len()).sum();
    println!(
        "Ended in GameOver: {}, average rounds: {:.1}",
        finished,
        rounds as f64 / results.len() as f64
    );

    let seats = ai_types.len();
    let mut wins = vec![0u32; seats];
    let mut total_delta = vec![0i64; seats];
    let mut best = vec![i64::MIN; seats];
    let mut worst = vec![i64::MAX; seats];
    for result in results {
        if let Some(w) = result.winner() {
            wins[w as usize] += 1;
        }
        for (seat, delta) in result.bank_deltas().into_iter().enumerate() {
            total_delta[seat] += delta;
            best[seat] = best[seat].max(delta);
            worst[seat] = worst[seat].min(delta);
        }
    }

    println!("\n=== Results by Seat ===");
    for seat in 0..seats {
        let avg = total_delta[seat] as f64 / results.len() as f64;
        let win_rate = (wins[seat] as f64 / results.len() as f64) * 100.0;
        println!(
            "Seat {} ({}): avg={:+.1}, min={:+}, max={:+}, wins={} ({:.1}%)",
            seat, ai_types[seat], avg, worst[seat], best[seat], wins[seat], win_rate
        );
    }
}
