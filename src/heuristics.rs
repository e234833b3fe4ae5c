//! Node scoring for the informed searches.
//!
//! The score is a key extracted from a node and handed to the frontier's
//! priority ordering. Lower scores are expanded first.
use crate::engine::PositionTable;
use crate::error::Result;
use crate::tree::SearchNode;
use std::fmt;
use std::str::FromStr;

/// How the search orders its frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeuristicMode {
    /// FIFO traversal; nodes are never scored.
    Uninformed,
    /// Greedy best-first: the Manhattan distance alone.
    BestFirst,
    /// A*: depth plus the Manhattan distance.
    AStar,
}

impl HeuristicMode {
    pub const ALL: [HeuristicMode; 3] = [
        HeuristicMode::Uninformed,
        HeuristicMode::BestFirst,
        HeuristicMode::AStar,
    ];

    pub fn is_informed(&self) -> bool {
        !matches!(self, HeuristicMode::Uninformed)
    }

    pub fn name(&self) -> &'static str {
        match self {
            HeuristicMode::Uninformed => "uninformed",
            HeuristicMode::BestFirst => "best-first",
            HeuristicMode::AStar => "a-star",
        }
    }
}

impl fmt::Display for HeuristicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for HeuristicMode {
    type Err = String;

    /// Accepts the mode names plus the numeric options of the classic menu
    /// (`1` uninformed, `2` best-first, `3` A*).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uninformed" | "none" | "1" => Ok(HeuristicMode::Uninformed),
            "best-first" | "greedy" | "2" => Ok(HeuristicMode::BestFirst),
            "a-star" | "astar" | "a*" | "3" => Ok(HeuristicMode::AStar),
            other => Err(format!(
                "unknown mode '{}' (expected uninformed, best-first or a-star)",
                other
            )),
        }
    }
}

/// Computes the priority of `node` under its own heuristic mode.
///
/// Returns `Ok(None)` for `HeuristicMode::Uninformed`: the uninformed search
/// never orders by score.
///
/// # Errors
/// Propagates `PuzzleError::UnknownTile` from the distance computation.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::{Board, GOAL_POSITIONS};
/// use eight_puzzle_solver::heuristics::{heuristic_score, HeuristicMode};
/// use eight_puzzle_solver::tree::SearchNode;
///
/// let board = Board::from_grid([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
/// let root = SearchNode::root(board, HeuristicMode::AStar);
/// // Root depth is 1, Manhattan distance is 2.
/// assert_eq!(heuristic_score(&root, &GOAL_POSITIONS).unwrap(), Some(3));
/// ```
pub fn heuristic_score(node: &SearchNode, table: &PositionTable) -> Result<Option<u32>> {
    match node.mode() {
        HeuristicMode::Uninformed => Ok(None),
        HeuristicMode::BestFirst => Ok(Some(node.board().misplacement_distance(table)?)),
        HeuristicMode::AStar => {
            let remaining = node.board().misplacement_distance(table)?;
            Ok(Some(node.depth() + remaining))
        }
    }
}
