use clap::Parser;
use eight_puzzle_solver::engine::{Board, GOAL_POSITIONS};
use eight_puzzle_solver::heuristics::HeuristicMode;
use eight_puzzle_solver::logging::init_logging;
use eight_puzzle_solver::solver::{solve_with, SearchConfig, SearchOutcome};
use eight_puzzle_solver::utils::board_from_str;
use eight_puzzle_solver::PuzzleError;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search strategy: uninformed, best-first or a-star
    #[clap(short, long, default_value = "a-star")]
    mode: HeuristicMode,

    /// Give up after this many node expansions
    #[clap(long)]
    max_expansions: Option<usize>,

    /// Board given inline as nine values in row-major order, e.g. "1 2 3 4 0 6 7 5 8"
    #[clap(short, long, conflicts_with = "board_file")]
    board: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a board file (three lines of three integers, 0 for the blank).
    /// Reads standard input when neither this nor --board is given.
    board_file: Option<PathBuf>,
}

fn read_board(args: &Args) -> Result<Board, PuzzleError> {
    let content = match (&args.board, &args.board_file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => fs::read_to_string(path).map_err(|source| PuzzleError::Io {
            operation: format!("read board file {}", path.display()),
            source,
        })?,
        (None, None) => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| PuzzleError::Io {
                    operation: "read board from stdin".to_string(),
                    source,
                })?;
            buf
        }
    };
    board_from_str(&content)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let board = match read_board(&args) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Invalid board: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Initial board state:\n{}\n", board);
    println!("Searching with {} mode...\n", args.mode);

    let config = SearchConfig {
        max_expansions: args.max_expansions,
    };
    let outcome = match solve_with(&board, args.mode, &GOAL_POSITIONS, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Search failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match outcome {
        SearchOutcome::Solved(solution) => {
            for (i, state) in solution.boards.iter().enumerate() {
                println!("State:\n{}\nDepth: {}\n", state, i + 1);
            }
            let moves: Vec<String> = solution.moves.iter().map(|m| m.to_string()).collect();
            println!("Moves ({}): {}", solution.move_count(), moves.join(" "));
            println!(
                "Expanded {} nodes, generated {}, peak frontier {}",
                solution.stats.expanded, solution.stats.generated, solution.stats.max_frontier
            );
            ExitCode::SUCCESS
        }
        SearchOutcome::Exhausted(stats) => {
            println!("No solution found after expanding {} nodes.", stats.expanded);
            ExitCode::FAILURE
        }
        SearchOutcome::LimitReached(stats) => {
            println!("Gave up after expanding {} nodes.", stats.expanded);
            ExitCode::FAILURE
        }
    }
}
