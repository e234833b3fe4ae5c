use clap::Parser;
use eight_puzzle_solver::engine::{Board, GOAL_POSITIONS};
use eight_puzzle_solver::heuristics::HeuristicMode;
use eight_puzzle_solver::logging::init_logging;
use eight_puzzle_solver::solver::{solve_with, SearchConfig, SearchOutcome};
use std::collections::HashMap;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compares the search modes on seeded random scrambles", long_about = None)]
struct Args {
    /// Number of scrambled boards to solve
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Random blank moves applied to the goal to build each board
    #[clap(long, default_value_t = 40)]
    scramble_steps: usize,

    /// Expansion cap per search
    #[clap(long, default_value_t = 500_000)]
    max_expansions: usize,

    /// Verbosity level (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Default)]
struct ModeTotals {
    solved: usize,
    moves: usize,
    expanded: usize,
    unsolved: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = SearchConfig {
        max_expansions: Some(args.max_expansions),
    };
    let mut totals: HashMap<HeuristicMode, ModeTotals> = HashMap::new();

    println!("Starting mode evaluation for {} boards...", args.boards);

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx as u64;
        let initial_board = Board::scrambled(args.scramble_steps, current_seed);

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);

        for mode in HeuristicMode::ALL {
            let entry = totals.entry(mode).or_default();
            match solve_with(&initial_board, mode, &GOAL_POSITIONS, &config) {
                Ok(SearchOutcome::Solved(solution)) => {
                    println!(
                        "  Mode: {:<10}, Moves: {:<4}, Expanded: {}",
                        mode,
                        solution.move_count(),
                        solution.stats.expanded
                    );
                    entry.solved += 1;
                    entry.moves += solution.move_count();
                    entry.expanded += solution.stats.expanded;
                }
                Ok(other) => {
                    println!(
                        "  Mode: {:<10}, unsolved after {} expansions",
                        mode,
                        other.stats().expanded
                    );
                    entry.unsolved += 1;
                }
                Err(e) => {
                    eprintln!("Error: mode {} failed on board {} (Seed: {}): {}", mode, board_idx, current_seed, e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages ---");

    for mode in HeuristicMode::ALL {
        let Some(t) = totals.get(&mode) else {
            continue;
        };
        if t.solved == 0 {
            println!("Mode {:<10}: no boards solved ({} unsolved)", mode, t.unsolved);
            continue;
        }
        println!(
            "Mode {:<10}: Average Moves = {:.2}, Average Expanded = {:.1}, Unsolved = {}",
            mode,
            t.moves as f64 / t.solved as f64,
            t.expanded as f64 / t.solved as f64,
            t.unsolved
        );
    }
    ExitCode::SUCCESS
}
