//! Kuhn poker solver binary.
//!
//! Usage:
//!   cargo run --release --bin solve_kuhn -- [OPTIONS]
//!
//! Options:
//!   --iterations <N>   Training iterations (default: 100000)
//!   --scheme <NAME>    vanilla | external | outcome (default: vanilla)
//!   --seed <N>         Random seed (optional)
//!   --output <FILE>    Write solver snapshot JSON (optional)

use std::env;
use std::fs;

use indicatif::{ProgressBar, ProgressStyle};

use toy_cfr_solver::cfr::{CfrSolver, SamplingScheme, SolverConfig};
use toy_cfr_solver::games::kuhn::KuhnPoker;
use toy_cfr_solver::games::table::{PokerAction, TableState};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut iterations: u64 = 100_000;
    let mut scheme = SamplingScheme::Vanilla;
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

    println!("Kuhn Poker solver ({} scheme, {} iterations)", scheme.name(), iterations);

    let mut config = SolverConfig::default().with_scheme(scheme);
    if let Some(s) = seed {
        config = config.with_seed(s);
    }
    let mut solver = CfrSolver::new(KuhnPoker::new(), config);

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

    print_strategy_table(&mut solver);

    if let Some(path) = output {
        let snapshot = solver.export_state();
        let json = serde_json::to_string_pretty(&snapshot).expect("snapshot serializes");
        fs::write(&path, json).expect("snapshot written");
        println!("Snapshot written to {}", path);
    }
}

/// Print the average strategy at every Kuhn decision point.
fn print_strategy_table(solver: &mut CfrSolver<KuhnPoker>) {
    let deck = KuhnPoker::deck();

    println!("{:<22} {:<10} strategy", "decision point", "card");
    for &card in &deck {
        // Opponent's card does not enter the acting player's info state;
        // any distinct filler card works.
        let filler = deck.iter().copied().find(|&c| c != card).unwrap();

        let root = TableState::new(vec![vec![card], vec![filler]], vec![], 1);
        print_row(solver, "P0 opening", card.rank_char(), &root, 0);

        let after_check = root.apply_action(&PokerAction::Check, 1);
        let facing_check = TableState {
            hole: vec![vec![filler], vec![card]],
            ..after_check.clone()
        };
        print_row(solver, "P1 after check", card.rank_char(), &facing_check, 1);

        let after_bet = root.apply_action(&PokerAction::Bet(1), 1);
        let facing_bet = TableState {
            hole: vec![vec![filler], vec![card]],
            ..after_bet.clone()
        };
        print_row(solver, "P1 facing bet", card.rank_char(), &facing_bet, 1);

        let check_bet = after_check.apply_action(&PokerAction::Bet(1), 1);
        let facing_check_bet = TableState {
            hole: vec![vec![card], vec![filler]],
            ..check_bet
        };
        print_row(solver, "P0 after check-bet", card.rank_char(), &facing_check_bet, 0);
    }
}

fn print_row(
    solver: &mut CfrSolver<KuhnPoker>,
    label: &str,
    card: char,
    state: &TableState,
    player: usize,
) {
    use toy_cfr_solver::cfr::Action;

    let strategy = solver.strategy_for(state, player);
    let mut entries: Vec<(String, f64)> = strategy
        .into_iter()
        .map(|(a, p)| (a.label(), p))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let formatted: Vec<String> = entries
        .iter()
        .map(|(label, p)| format!("{}={:.3}", label, p))
        .collect();
    println!("{:<22} {:<10} {}", label, card, formatted.join("  "));
}

fn print_help() {
    println!("Usage: solve_kuhn [--iterations N] [--scheme vanilla|external|outcome] [--seed N] [--output FILE]");
}
