//! Example demonstrating no-guess board generation.
//!
//! This example shows how to:
//! - Create a `BoardGenerator` with a `StrategySolver`
//! - Generate a board, optionally from a fixed seed
//! - Display the board, its mine layout, and the seed
//! - Filter boards by solving-strategy usage counts
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_board
//! ```
//!
//! Reproduce a specific board:
//!
//! ```sh
//! cargo run --example generate_board -- --seed <64-hex-digits>
//! ```
//!
//! Search for a board whose solution leans on a strategy (case-insensitive),
//! sampling up to the budget:
//!
//! ```sh
//! cargo run --example generate_board -- --strategy "tank enumeration" --max-tries 2000
//! ```

use std::process;

use clap::Parser;
use nonomine_core::Position;
use nonomine_generator::{BoardGenerator, BoardSeed, GeneratedBoard, GenerateParams};
use nonomine_solver::{SolverStats, StrategySolver};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board width in cells.
    #[arg(long, default_value_t = 16)]
    width: u16,

    /// Board height in cells.
    #[arg(long, default_value_t = 16)]
    height: u16,

    /// Number of mines.
    #[arg(long, default_value_t = 40)]
    bombs: usize,

    /// First click x coordinate (defaults to the board center).
    #[arg(long)]
    click_x: Option<u16>,

    /// First click y coordinate (defaults to the board center).
    #[arg(long)]
    click_y: Option<u16>,

    /// Accept boards that may require guessing.
    #[arg(long)]
    allow_guessing: bool,

    /// Seed to reproduce a specific board (64 hex digits).
    #[arg(long)]
    seed: Option<BoardSeed>,

    /// Strategy name to maximize in solve stats (case-insensitive). Repeatable.
    #[arg(short, long = "strategy", value_name = "STRATEGY", num_args = 1..)]
    strategies: Vec<String>,

    /// Maximum boards to sample when filtering.
    #[arg(long, value_name = "COUNT", default_value_t = 1_000)]
    max_tries: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let solver = StrategySolver::with_all_strategies();
    let generator = BoardGenerator::new(&solver);
    let params = GenerateParams {
        width: args.width,
        height: args.height,
        bomb_count: args.bombs,
        first_click: Position::new(
            args.click_x.unwrap_or(args.width / 2),
            args.click_y.unwrap_or(args.height / 2),
        ),
        no_guess: !args.allow_guessing,
    };

    let available: Vec<&'static str> = solver.strategies().iter().map(|s| s.name()).collect();
    let unknown: Vec<String> = args
        .strategies
        .iter()
        .filter(|name| !available.iter().any(|a| a.eq_ignore_ascii_case(name)))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        eprintln!("Unknown strategy(s): {}", unknown.join(", "));
        eprintln!("Available strategies:");
        for name in &available {
            eprintln!("  {name}");
        }
        process::exit(2);
    }

    if args.strategies.is_empty() {
        let generated = match args.seed {
            Some(seed) => generator.generate_with_seed(&params, seed),
            None => generator.generate(&params),
        };
        let generated = generated.unwrap_or_else(|err| {
            eprintln!("{err}");
            process::exit(1);
        });
        let stats = solve_stats(&solver, &generated, params.first_click);
        print_board(&generated, &solver, &stats, None, &[]);
        return;
    }

    if args.max_tries == 0 {
        eprintln!("--max-tries must be at least 1.");
        process::exit(1);
    }

    let best = (0..args.max_tries)
        .into_par_iter()
        .filter_map(|_| {
            let generated = generator.generate(&params).ok()?;
            let stats = solve_stats(&solver, &generated, params.first_click);
            let score = strategies_score(&solver, &stats, &args.strategies);
            Some((generated, stats, score))
        })
        .max_by(|a, b| a.2.cmp(&b.2));

    if let Some((generated, stats, score)) = best {
        print_board(
            &generated,
            &solver,
            &stats,
            Some((args.max_tries, score)),
            &args.strategies,
        );
        return;
    }

    eprintln!("No board matched the requested strategies.");
    process::exit(1);
}

fn solve_stats(
    solver: &StrategySolver,
    generated: &GeneratedBoard,
    first_click: Position,
) -> SolverStats {
    let mut board = generated.board.clone();
    board.reveal(first_click);
    let (_outcome, stats) = solver.solve(&mut board).unwrap();
    stats
}

fn strategies_score(solver: &StrategySolver, stats: &SolverStats, strategies: &[String]) -> usize {
    strategies
        .iter()
        .map(|name| strategy_count(solver, stats, name))
        .sum()
}

fn strategy_count(solver: &StrategySolver, stats: &SolverStats, name: &str) -> usize {
    let Some(i) = solver
        .strategies()
        .iter()
        .position(|s| s.name().eq_ignore_ascii_case(name))
    else {
        return 0;
    };
    stats.applications()[i]
}

fn print_board(
    generated: &GeneratedBoard,
    solver: &StrategySolver,
    stats: &SolverStats,
    selection: Option<(usize, usize)>,
    strategies: &[String],
) {
    println!("Seed:");
    println!("  {}", generated.seed);
    println!();

    println!("Attempts: {}", generated.attempts);
    if let Some(warning) = generated.warning {
        println!("Warning: {warning:?}");
    }
    println!();

    if let Some((max_tries, best_score)) = selection {
        println!("Selection:");
        println!("  Strategies: {}", strategies.join(", "));
        println!("  Max tries: {max_tries}");
        println!("  Best score: {best_score}");
        println!();
    }

    let mut exposed = generated.board.clone();
    exposed.expose_bombs();
    println!("Layout:");
    for line in exposed.to_string().lines() {
        println!("  {line}");
    }
    println!();

    println!("Stats:");
    for (i, count) in stats.applications().iter().enumerate() {
        let name = solver.strategies()[i].name();
        println!("  {name}: {count}");
    }
    println!("  total: {}", stats.total_steps());
}
