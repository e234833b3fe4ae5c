//! # 8-Puzzle Solver Library
//!
//! This library solves the 3x3 sliding-tile puzzle: starting from a scrambled
//! board it searches for a sequence of blank moves reaching the goal
//!
//! ```text
//! 1 2 3
//! 4 5 6
//! 7 8 .
//! ```
//!
//! Three strategies are available through `heuristics::HeuristicMode`:
//! uninformed FIFO traversal, greedy best-first on the Manhattan distance, and
//! A* (depth plus Manhattan distance), which always returns a shortest path.
//!
//! It is used by two binaries:
//! - `puzzle_solver`: reads a board and prints the path found by one strategy.
//! - `mode_evaluator`: solves seeded random scrambles with every strategy and
//!   compares path lengths and search effort.
//!
//! ## Modules
//! - `engine`: the board (`Board`), blank moves (`Direction`) and the goal
//!   position table (`PositionTable`).
//! - `tree`: search nodes and the arena (`SearchTree`) holding them.
//! - `heuristics`: heuristic modes and node scoring.
//! - `solver`: the frontiers and search drivers, returning a `SearchOutcome`.
//! - `utils`: parsing boards from text.
//! - `error`: the crate's error type.
//! - `logging`: log subscriber setup for the binaries.
//!
//! The search core trusts the boards it is given. Boards from users should go
//! through `utils::board_from_str`, which validates them. Unsolvable boards are
//! not detected up front; the search exhausts the reachable space and reports
//! `SearchOutcome::Exhausted`.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod logging;
pub mod solver;
pub mod tree;
pub mod utils;

pub use error::PuzzleError;
