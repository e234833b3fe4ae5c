use crate::engine::{Board, Direction, PositionTable, GOAL_POSITIONS};
use crate::error::Result;
use crate::heuristics::{heuristic_score, HeuristicMode};
use crate::tree::{NodeId, SearchNode, SearchTree};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use tracing::{debug, info, trace, warn};

/// Knobs for a single search run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Stop after this many expansions. `None` searches until the goal is
    /// found or the reachable space is exhausted.
    pub max_expansions: Option<usize>,
}

/// Counters collected while searching.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes removed from the frontier and expanded.
    pub expanded: usize,
    /// Nodes created, root included.
    pub generated: usize,
    /// Successors dropped because their board was already explored, plus
    /// frontier entries skipped for the same reason.
    pub duplicates_pruned: usize,
    /// Largest frontier size observed.
    pub max_frontier: usize,
}

/// A path from the initial board to the goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Boards from the initial arrangement to the goal, both included.
    pub boards: Vec<Board>,
    /// Blank moves; `moves[i]` turns `boards[i]` into `boards[i + 1]`.
    pub moves: Vec<Direction>,
    pub stats: SearchStats,
}

impl Solution {
    fn from_tree(tree: &SearchTree, goal: NodeId, stats: SearchStats) -> Self {
        let path = tree.trace_path(goal);
        Solution {
            boards: path.iter().map(|node| *node.board()).collect(),
            moves: path.iter().filter_map(|node| node.last_move()).collect(),
            stats,
        }
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

/// How a search run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved(Solution),
    /// The frontier ran dry: the goal is unreachable from the initial board.
    Exhausted(SearchStats),
    /// `SearchConfig::max_expansions` was hit before reaching a verdict.
    LimitReached(SearchStats),
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Solved(solution) => &solution.stats,
            SearchOutcome::Exhausted(stats) | SearchOutcome::LimitReached(stats) => stats,
        }
    }
}

/// Discovered nodes awaiting expansion.
pub trait Frontier {
    fn push(&mut self, id: NodeId, score: Option<u32>);
    fn pop(&mut self) -> Option<NodeId>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Insert at the tail, remove from the head. Scores are ignored.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<NodeId>,
}

impl Frontier for FifoFrontier {
    fn push(&mut self, id: NodeId, _score: Option<u32>) {
        self.queue.push_back(id);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Min-priority frontier keyed on the heuristic score.
///
/// Equal scores are served in insertion order. Unscored nodes count as score
/// zero, which degrades the frontier to FIFO order.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Reverse<(u32, u64, NodeId)>>,
    next_seq: u64,
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, id: NodeId, score: Option<u32>) {
        self.heap
            .push(Reverse((score.unwrap_or(0), self.next_seq, id)));
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse((_, _, id))| id)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Solves `initial` towards the canonical goal with no expansion cap.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::HeuristicMode;
/// use eight_puzzle_solver::solver::solve;
///
/// let board = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
/// let outcome = solve(&board, HeuristicMode::AStar).unwrap();
/// assert_eq!(outcome.solution().unwrap().move_count(), 1);
/// ```
pub fn solve(initial: &Board, mode: HeuristicMode) -> Result<SearchOutcome> {
    solve_with(initial, mode, &GOAL_POSITIONS, &SearchConfig::default())
}

/// Runs the driver matching `mode`.
pub fn solve_with(
    initial: &Board,
    mode: HeuristicMode,
    table: &PositionTable,
    config: &SearchConfig,
) -> Result<SearchOutcome> {
    match mode {
        HeuristicMode::Uninformed => solve_uninformed(initial, table, config),
        HeuristicMode::BestFirst | HeuristicMode::AStar => {
            solve_informed(initial, mode, table, config)
        }
    }
}

/// Uninformed search: FIFO frontier, so nodes are expanded level by level.
pub fn solve_uninformed(
    initial: &Board,
    table: &PositionTable,
    config: &SearchConfig,
) -> Result<SearchOutcome> {
    run_search(
        initial,
        HeuristicMode::Uninformed,
        table,
        config,
        FifoFrontier::default(),
    )
}

/// Informed search: the frontier always yields the lowest-scored node.
///
/// `mode` selects greedy best-first or A*.
pub fn solve_informed(
    initial: &Board,
    mode: HeuristicMode,
    table: &PositionTable,
    config: &SearchConfig,
) -> Result<SearchOutcome> {
    run_search(initial, mode, table, config, PriorityFrontier::default())
}

fn run_search<F: Frontier>(
    initial: &Board,
    mode: HeuristicMode,
    table: &PositionTable,
    config: &SearchConfig,
    mut frontier: F,
) -> Result<SearchOutcome> {
    let mut tree = SearchTree::new();
    let mut explored: HashSet<Board> = HashSet::new();
    let mut stats = SearchStats::default();

    let root = SearchNode::root(*initial, mode);
    let root_score = heuristic_score(&root, table)?;
    let root_id = tree.insert(root);
    frontier.push(root_id, root_score);
    stats.generated = 1;
    stats.max_frontier = 1;
    debug!(%mode, max_expansions = ?config.max_expansions, "starting search");

    while let Some(current_id) = frontier.pop() {
        let current = tree.get(current_id);

        if current.board().is_goal(table)? {
            let solution = Solution::from_tree(&tree, current_id, stats);
            info!(
                %mode,
                moves = solution.move_count(),
                expanded = solution.stats.expanded,
                generated = solution.stats.generated,
                "solved"
            );
            return Ok(SearchOutcome::Solved(solution));
        }

        // The same board may sit in the frontier more than once.
        if !explored.insert(*current.board()) {
            stats.duplicates_pruned += 1;
            continue;
        }

        if let Some(limit) = config.max_expansions {
            if stats.expanded >= limit {
                warn!(%mode, limit, "expansion limit reached");
                return Ok(SearchOutcome::LimitReached(stats));
            }
        }

        stats.expanded += 1;
        trace!(node = current_id.index(), depth = current.depth(), "expanding");

        let mut children = Vec::with_capacity(4);
        for child in current.successors(current_id)? {
            stats.generated += 1;
            if explored.contains(child.board()) {
                stats.duplicates_pruned += 1;
                continue;
            }
            children.push(child);
        }

        for child in children {
            let score = heuristic_score(&child, table)?;
            let child_id = tree.insert(child);
            frontier.push(child_id, score);
        }
        stats.max_frontier = stats.max_frontier.max(frontier.len());
    }

    info!(%mode, expanded = stats.expanded, "search space exhausted without reaching the goal");
    Ok(SearchOutcome::Exhausted(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;

    /// Number of arrangements reachable from any 8-puzzle board.
    const REACHABLE_STATES: usize = 181_440;

    fn assert_valid_path(solution: &Solution, start: &Board) {
        assert_eq!(solution.boards.first(), Some(start));
        assert_eq!(solution.boards.last(), Some(&Board::goal()));
        assert_eq!(solution.boards.len(), solution.moves.len() + 1);
        for (i, dir) in solution.moves.iter().enumerate() {
            let next = solution.boards[i].slide_towards(*dir).unwrap();
            assert_eq!(next, Some(solution.boards[i + 1]), "step {} ({})", i, dir);
        }
    }

    fn solved(outcome: SearchOutcome) -> Solution {
        match outcome {
            SearchOutcome::Solved(solution) => solution,
            other => panic!("expected a solution, got {:?}", other),
        }
    }

    #[test]
    fn test_goal_board_needs_no_moves() {
        for mode in HeuristicMode::ALL {
            let sol = solved(solve(&Board::goal(), mode).unwrap());
            assert_eq!(sol.move_count(), 0, "mode {}", mode);
            assert_eq!(sol.boards, vec![Board::goal()]);
            assert_eq!(sol.stats.expanded, 0);
        }
    }

    #[test]
    fn test_one_move_board_all_modes() {
        let start = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        for mode in HeuristicMode::ALL {
            let sol = solved(solve(&start, mode).unwrap());
            assert_eq!(sol.move_count(), 1, "mode {}", mode);
            assert_eq!(sol.moves, vec![Direction::Right]);
            assert_valid_path(&sol, &start);
        }
    }

    #[test]
    fn test_two_move_board_all_modes() {
        let start = Board::from_grid([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        for mode in HeuristicMode::ALL {
            let sol = solved(solve(&start, mode).unwrap());
            assert_eq!(sol.move_count(), 2, "mode {}", mode);
            assert_eq!(sol.moves, vec![Direction::Down, Direction::Right]);
            assert_valid_path(&sol, &start);
        }
    }

    #[test]
    fn test_a_star_matches_breadth_first_length() {
        for seed in 0..8 {
            let start = Board::scrambled(18, seed);
            let bfs = solved(solve(&start, HeuristicMode::Uninformed).unwrap());
            let astar = solved(solve(&start, HeuristicMode::AStar).unwrap());
            assert_eq!(astar.move_count(), bfs.move_count(), "seed {}", seed);
            assert_valid_path(&astar, &start);
            assert_valid_path(&bfs, &start);
        }
    }

    #[test]
    fn test_best_first_finds_a_valid_path() {
        for seed in 0..8 {
            let start = Board::scrambled(30, seed);
            let greedy = solved(solve(&start, HeuristicMode::BestFirst).unwrap());
            let astar = solved(solve(&start, HeuristicMode::AStar).unwrap());
            assert_valid_path(&greedy, &start);
            assert!(greedy.move_count() >= astar.move_count(), "seed {}", seed);
        }
    }

    #[test]
    fn test_a_star_on_hardest_board() {
        let start = Board::from_grid([[8, 6, 7], [2, 5, 4], [3, 0, 1]]);
        let sol = solved(solve(&start, HeuristicMode::AStar).unwrap());
        assert_eq!(sol.move_count(), 31);
        assert_valid_path(&sol, &start);
    }

    #[test]
    fn test_uninformed_is_deterministic() {
        let start = Board::scrambled(14, 42);
        let first = solved(solve(&start, HeuristicMode::Uninformed).unwrap());
        let second = solved(solve(&start, HeuristicMode::Uninformed).unwrap());
        assert_eq!(first.move_count(), second.move_count());
        assert_eq!(first.boards, second.boards);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn test_unsolvable_board_exhausts() {
        let start = Board::from_grid([[2, 1, 3], [4, 5, 6], [7, 8, 0]]);
        let config = SearchConfig {
            max_expansions: Some(2 * REACHABLE_STATES),
        };
        for mode in [HeuristicMode::Uninformed, HeuristicMode::AStar] {
            let outcome = solve_with(&start, mode, &GOAL_POSITIONS, &config).unwrap();
            match outcome {
                SearchOutcome::Exhausted(stats) => {
                    assert_eq!(stats.expanded, REACHABLE_STATES, "mode {}", mode)
                }
                other => panic!("mode {}: expected exhaustion, got {:?}", mode, other),
            }
        }
    }

    #[test]
    fn test_expansion_limit() {
        let start = Board::from_grid([[8, 6, 7], [2, 5, 4], [3, 0, 1]]);
        let config = SearchConfig {
            max_expansions: Some(10),
        };
        let outcome = solve_with(&start, HeuristicMode::Uninformed, &GOAL_POSITIONS, &config).unwrap();
        assert!(!outcome.is_solved());
        assert!(outcome.solution().is_none());
        assert!(matches!(outcome, SearchOutcome::LimitReached(_)));
        assert_eq!(outcome.stats().expanded, 10);
    }

    #[test]
    fn test_invalid_board_is_an_error() {
        let broken = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        let result = solve(&broken, HeuristicMode::AStar);
        assert!(matches!(result, Err(PuzzleError::UnknownTile { tile: 9 })));
    }

    #[test]
    fn test_priority_frontier_breaks_ties_by_insertion() {
        let mut tree = SearchTree::new();
        let ids: Vec<NodeId> = (0..4)
            .map(|_| tree.insert(SearchNode::root(Board::goal(), HeuristicMode::AStar)))
            .collect();

        let mut frontier = PriorityFrontier::default();
        frontier.push(ids[0], Some(5));
        frontier.push(ids[1], Some(3));
        frontier.push(ids[2], Some(5));
        frontier.push(ids[3], Some(3));
        assert_eq!(frontier.len(), 4);

        let order: Vec<NodeId> = std::iter::from_fn(|| frontier.pop()).collect();
        assert_eq!(order, vec![ids[1], ids[3], ids[0], ids[2]]);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_fifo_frontier_order() {
        let mut tree = SearchTree::new();
        let ids: Vec<NodeId> = (0..3)
            .map(|_| tree.insert(SearchNode::root(Board::goal(), HeuristicMode::Uninformed)))
            .collect();

        let mut frontier = FifoFrontier::default();
        for &id in &ids {
            frontier.push(id, Some(100 - id.index() as u32));
        }
        let order: Vec<NodeId> = std::iter::from_fn(|| frontier.pop()).collect();
        assert_eq!(order, ids);
    }
}
