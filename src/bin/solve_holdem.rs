//! Simplified hold'em solver binary.
//!
//! Usage:
//!   cargo run --release --bin solve_holdem -- [OPTIONS]
//!
//! Options:
//!   --iterations <N>   Training iterations (default: 200000)
//!   --scheme <NAME>    vanilla | external | outcome (default: external)
//!   --seed <N>         Random seed (optional)
//!   --output <FILE>    Write solver snapshot JSON (optional)

use std::env;
use std::fs;

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

use toy_cfr_solver::cfr::{Action, CfrSolver, Game, SamplingScheme, SolverConfig};
use toy_cfr_solver::games::holdem::SimplifiedHoldem;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut iterations: u64 = 200_000;
    let mut scheme = SamplingScheme::ExternalSampling;
    let mut seed: Option<u64> = None;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--iterations" | "-i" => {
                i += 1;
                if i < args.len() {
                    iterations = args[i].parse().unwrap_or(iterations);
                }
            }
            "--scheme" => {
                i += 1;
                if i < args.len() {
                    match SamplingScheme::from_name(&args[i]) {
                        Some(s) => scheme = s,
                        None => {
                            eprintln!("Unknown scheme: {}", args[i]);
                            return;
                        }
                    }
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    println!(
        "Simplified Hold'em solver ({} scheme, {} iterations)",
        scheme.name(),
        iterations
    );

    let mut config = SolverConfig::default().with_scheme(scheme);
    if let Some(s) = seed {
        config = config.with_seed(s);
    }
    let game = SimplifiedHoldem::new();
    let mut solver = CfrSolver::new(game, config);

    let bar = ProgressBar::new(iterations);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} [{elapsed_precise}] {msg}")
            .expect("valid progress template"),
    );
    let interval = (iterations / 100).max(1);
    solver.train_with_callback(iterations, interval, |stats| {
        bar.set_position(stats.iterations);
        bar.set_message(format!("{} info sets", stats.info_sets));
    });
    bar.finish();

    let stats = solver.stats();
    println!(
        "Done: {} iterations, {} info sets, {:.1} it/s",
        stats.iterations, stats.info_sets, stats.iterations_per_second
    );
    println!();

    // Sample a few deals and show the opening strategy for each holding
    println!("Opening strategies for sampled holdings:");
    let mut rng = StdRng::seed_from_u64(seed.unwrap_or(0));
    for _ in 0..8 {
        let state = game.initial_state(&mut rng);
        let holding: String = state.hole[0].iter().map(|c| c.to_string()).collect();

        let strategy = solver.strategy_for(&state, 0);
        let mut entries: Vec<(String, f64)> =
            strategy.into_iter().map(|(a, p)| (a.label(), p)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let formatted: Vec<String> = entries
            .iter()
            .map(|(label, p)| format!("{}={:.3}", label, p))
            .collect();
        println!("  {:<8} {}", holding, formatted.join("  "));
    }

    if let Some(path) = output {
        let snapshot = solver.export_state();
        let json = serde_json::to_string_pretty(&snapshot).expect("snapshot serializes");
        fs::write(&path, json).expect("snapshot written");
        println!("Snapshot written to {}", path);
    }
}

fn print_help() {
    println!("Usage: solve_holdem [--iterations N] [--scheme vanilla|external|outcome] [--seed N] [--output FILE]");
}
