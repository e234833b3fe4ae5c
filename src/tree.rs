//! The explicit search tree.
//!
//! Nodes live in an arena (`SearchTree`) and point at their parent through a
//! `NodeId` handle, so many children can share one parent and walking back to
//! the root is a plain index walk.
use crate::engine::{Board, Direction};
use crate::error::Result;
use crate::heuristics::HeuristicMode;

/// Handle to a node stored in a `SearchTree`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One state in the search tree.
///
/// A node is never modified once built. The root has depth 1 and no parent;
/// every child sits one level below its parent and inherits its mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    board: Board,
    parent: Option<NodeId>,
    depth: u32,
    mode: HeuristicMode,
    last_move: Option<Direction>,
}

impl SearchNode {
    /// Builds the root node of a search run.
    pub fn root(board: Board, mode: HeuristicMode) -> Self {
        SearchNode {
            board,
            parent: None,
            depth: 1,
            mode,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn mode(&self) -> HeuristicMode {
        self.mode
    }

    /// The blank move that produced this node; `None` for the root.
    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// Lazily generates the children of this node, stored under `id`.
    ///
    /// Children come in `Direction::ALL` order (up, down, right, left) and
    /// directions that would push the blank off the board are skipped, so a
    /// node has between two and four children.
    ///
    /// # Errors
    /// `PuzzleError::MissingBlank` if the board has no blank.
    pub fn successors(&self, id: NodeId) -> Result<impl Iterator<Item = SearchNode> + '_> {
        let blank = self.board.locate_blank()?;
        Ok(Direction::ALL.into_iter().filter_map(move |dir| {
            let (dr, dc) = dir.as_offset();
            self.board.slide_from(blank, dr, dc).map(|board| SearchNode {
                board,
                parent: Some(id),
                depth: self.depth + 1,
                mode: self.mode,
                last_move: Some(dir),
            })
        }))
    }
}

/// Arena owning every node created during one search run.
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// # Panics
    /// Panics if `id` was not issued by this tree.
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the nodes from the root down to `goal`, inclusive.
    pub fn trace_path(&self, goal: NodeId) -> Vec<&SearchNode> {
        let mut path = Vec::new();
        let mut current = Some(goal);

        while let Some(id) = current {
            let node = self.get(id);
            path.push(node);
            current = node.parent;
        }

        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_node() {
        let root = SearchNode::root(Board::goal(), HeuristicMode::BestFirst);
        assert_eq!(root.depth(), 1);
        assert_eq!(root.parent(), None);
        assert_eq!(root.last_move(), None);
        assert_eq!(root.mode(), HeuristicMode::BestFirst);
    }

    #[test]
    fn test_successor_counts() {
        let corner = Board::goal();
        let edge = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        let center = Board::from_grid([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);

        for (board, expected) in [(corner, 2), (edge, 3), (center, 4)] {
            let mut tree = SearchTree::new();
            let id = tree.insert(SearchNode::root(board, HeuristicMode::Uninformed));
            let count = tree.get(id).successors(id).unwrap().count();
            assert_eq!(count, expected, "board:\n{}", board);
        }
    }

    #[test]
    fn test_successor_bounds_on_scrambles() {
        for seed in 0..25 {
            let mut tree = SearchTree::new();
            let root = SearchNode::root(Board::scrambled(12, seed), HeuristicMode::AStar);
            let id = tree.insert(root);
            let count = tree.get(id).successors(id).unwrap().count();
            assert!((2..=4).contains(&count), "seed {} produced {} children", seed, count);
        }
    }

    #[test]
    fn test_successor_order_and_links() {
        let center = Board::from_grid([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        let mut tree = SearchTree::new();
        let id = tree.insert(SearchNode::root(center, HeuristicMode::AStar));
        let children: Vec<SearchNode> = tree.get(id).successors(id).unwrap().collect();

        let moves: Vec<Direction> = children.iter().filter_map(|c| c.last_move()).collect();
        assert_eq!(moves, Direction::ALL.to_vec());
        assert_eq!(
            *children[0].board(),
            Board::from_grid([[1, 0, 3], [4, 2, 6], [7, 5, 8]])
        );
        for child in &children {
            assert_eq!(child.parent(), Some(id));
            assert_eq!(child.depth(), 2);
            assert_eq!(child.mode(), HeuristicMode::AStar);
        }
    }

    #[test]
    fn test_successors_missing_blank() {
        let broken = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        let mut tree = SearchTree::new();
        let id = tree.insert(SearchNode::root(broken, HeuristicMode::Uninformed));
        assert!(tree.get(id).successors(id).is_err());
    }

    #[test]
    fn test_trace_path_walks_to_root() {
        let start = Board::from_grid([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        let mut tree = SearchTree::new();
        let root = tree.insert(SearchNode::root(start, HeuristicMode::Uninformed));

        let down = tree
            .get(root)
            .successors(root)
            .unwrap()
            .find(|c| c.last_move() == Some(Direction::Down))
            .unwrap();
        let mid = tree.insert(down);
        let right = tree
            .get(mid)
            .successors(mid)
            .unwrap()
            .find(|c| c.last_move() == Some(Direction::Right))
            .unwrap();
        let goal = tree.insert(right);

        let path = tree.trace_path(goal);
        assert_eq!(path.len(), 3);
        assert_eq!(*path[0].board(), start);
        assert_eq!(*path[2].board(), Board::goal());
        assert_eq!(path[2].depth(), 3);

        assert_eq!(tree.trace_path(root).len(), 1);
        assert_eq!(tree.len(), 3);
    }
}
