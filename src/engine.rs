//! Board model for the 8-puzzle.
//!
//! This module defines the fundamental pieces the search is built from:
//! - `Board`: an immutable 3x3 arrangement of tiles with `0` as the blank.
//! - `PositionTable`: the goal row/column of every tile, used for the
//!   Manhattan distance and the goal test.
//! - `Direction`: the four ways the blank can slide.
use crate::error::{PuzzleError, Result};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// Value used for the blank cell.
pub const BLANK: u8 = 0;

/// Number of cells on the board, blank included.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A direction the blank slides in.
///
/// The order of `Direction::ALL` is the order successors are generated in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    /// Every direction, in successor generation order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Right,
        Direction::Left,
    ];

    /// Row and column offset applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Right => "Right",
            Direction::Left => "Left",
        };
        write!(f, "{}", s)
    }
}

/// Goal row and column of every tile.
///
/// Index `t` holds the target cell of tile `t`. The blank has no entry; asking
/// for it, or for anything above 8, is an invariant breach.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionTable {
    positions: [Option<(usize, usize)>; CELL_COUNT],
}

/// The table for the canonical goal: tiles ascending in row-major order with
/// the blank in the bottom-right corner.
pub static GOAL_POSITIONS: PositionTable = PositionTable::standard();

impl PositionTable {
    /// Builds the table for the canonical goal arrangement.
    pub const fn standard() -> Self {
        let mut positions = [None; CELL_COUNT];
        let mut tile = 1;
        while tile < CELL_COUNT {
            positions[tile] = Some(((tile - 1) / BOARD_SIZE, (tile - 1) % BOARD_SIZE));
            tile += 1;
        }
        PositionTable { positions }
    }

    /// Returns the goal `(row, col)` of `tile`.
    ///
    /// # Errors
    /// `PuzzleError::UnknownTile` if `tile` is the blank or greater than 8.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::GOAL_POSITIONS;
    /// assert_eq!(GOAL_POSITIONS.lookup(1).unwrap(), (0, 0));
    /// assert_eq!(GOAL_POSITIONS.lookup(8).unwrap(), (2, 1));
    /// assert!(GOAL_POSITIONS.lookup(9).is_err());
    /// ```
    pub fn lookup(&self, tile: u8) -> Result<(usize, usize)> {
        self.positions
            .get(tile as usize)
            .copied()
            .flatten()
            .ok_or(PuzzleError::UnknownTile { tile })
    }
}

/// A 3x3 arrangement of the tiles `1..=8` and the blank.
///
/// Boards never change after construction; sliding the blank produces a new
/// board. Equality and hashing are structural, so equal arrangements collapse
/// to one entry in the explored set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[u8; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// The canonical goal arrangement.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    /// let goal = Board::goal();
    /// assert_eq!(goal.get_tile(0, 0), 1);
    /// assert_eq!(goal.get_tile(2, 2), 0);
    /// ```
    pub const fn goal() -> Self {
        Board {
            grid: [[1, 2, 3], [4, 5, 6], [7, 8, BLANK]],
        }
    }

    /// Creates a board from a grid.
    ///
    /// The grid is trusted to be a permutation of `0..=8`; use
    /// `utils::board_from_str` to build boards from untrusted input.
    pub fn from_grid(grid: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Board { grid }
    }

    /// Creates a solvable board by walking the blank `steps` random moves away
    /// from the goal. The same seed always yields the same board.
    ///
    /// The walk never immediately undoes its previous move, but it may still
    /// wander back, so the optimal solution can be shorter than `steps`.
    pub fn scrambled(steps: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::goal();
        let mut blank = (BOARD_SIZE - 1, BOARD_SIZE - 1);
        let mut last: Option<Direction> = None;

        for _ in 0..steps {
            let candidates: Vec<(Direction, Board, (usize, usize))> = Direction::ALL
                .iter()
                .filter(|dir| last.map_or(true, |l| **dir != l.opposite()))
                .filter_map(|&dir| {
                    let (dr, dc) = dir.as_offset();
                    let target = offset_within_bounds(blank, dr, dc)?;
                    board.slide_from(blank, dr, dc).map(|b| (dir, b, target))
                })
                .collect();

            // The blank always has at least one neighbour besides the one it came from.
            if let Some(&(dir, next, target)) = candidates.choose(&mut rng) {
                board = next;
                blank = target;
                last = Some(dir);
            }
        }
        board
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the board.
    pub fn get_tile(&self, r: usize, c: usize) -> u8 {
        self.grid[r][c]
    }

    pub fn get_grid(&self) -> &[[u8; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }

    /// Finds the blank cell.
    ///
    /// # Errors
    /// `PuzzleError::MissingBlank` if no cell holds `0`.
    pub fn locate_blank(&self) -> Result<(usize, usize)> {
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                if self.grid[r][c] == BLANK {
                    return Ok((r, c));
                }
            }
        }
        Err(PuzzleError::MissingBlank)
    }

    /// Slides the blank by `(d_row, d_col)`.
    ///
    /// Returns `Ok(None)` when the target cell lies outside the board. `self`
    /// is never modified.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    /// let goal = Board::goal();
    /// assert!(goal.slide(1, 0).unwrap().is_none());
    /// let moved = goal.slide(0, -1).unwrap().unwrap();
    /// assert_eq!(moved.get_tile(2, 1), 0);
    /// assert_eq!(moved.get_tile(2, 2), 8);
    /// ```
    pub fn slide(&self, d_row: isize, d_col: isize) -> Result<Option<Board>> {
        let blank = self.locate_blank()?;
        Ok(self.slide_from(blank, d_row, d_col))
    }

    /// Slides the blank one step in `direction`.
    pub fn slide_towards(&self, direction: Direction) -> Result<Option<Board>> {
        let (dr, dc) = direction.as_offset();
        self.slide(dr, dc)
    }

    /// Like `slide`, with the blank position already known.
    pub(crate) fn slide_from(
        &self,
        blank: (usize, usize),
        d_row: isize,
        d_col: isize,
    ) -> Option<Board> {
        let (tr, tc) = offset_within_bounds(blank, d_row, d_col)?;
        let mut grid = self.grid;
        grid[blank.0][blank.1] = grid[tr][tc];
        grid[tr][tc] = BLANK;
        Some(Board { grid })
    }

    /// Sum of the Manhattan distances between every tile and its goal cell.
    ///
    /// The blank is ignored. The sum is zero exactly when the board is the
    /// goal arrangement described by `table`.
    ///
    /// # Errors
    /// `PuzzleError::UnknownTile` if a cell holds a value with no entry in
    /// `table`.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Board, GOAL_POSITIONS};
    /// let board = Board::from_grid([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
    /// assert_eq!(board.misplacement_distance(&GOAL_POSITIONS).unwrap(), 2);
    /// ```
    pub fn misplacement_distance(&self, table: &PositionTable) -> Result<u32> {
        let mut distance = 0;
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let tile = self.grid[r][c];
                if tile == BLANK {
                    continue;
                }
                let (goal_r, goal_c) = table.lookup(tile)?;
                distance += (r.abs_diff(goal_r) + c.abs_diff(goal_c)) as u32;
            }
        }
        Ok(distance)
    }

    /// Goal test: the board is solved when no tile is displaced.
    pub fn is_goal(&self, table: &PositionTable) -> Result<bool> {
        Ok(self.misplacement_distance(table)? == 0)
    }
}

fn offset_within_bounds(
    (r, c): (usize, usize),
    d_row: isize,
    d_col: isize,
) -> Option<(usize, usize)> {
    let nr = r as isize + d_row;
    let nc = c as isize + d_col;
    if nr >= 0 && nr < BOARD_SIZE as isize && nc >= 0 && nc < BOARD_SIZE as isize {
        Some((nr as usize, nc as usize))
    } else {
        None
    }
}

impl fmt::Display for Board {
    /// Renders one row per line with the blank shown as `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.grid.iter().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .map(|&tile| {
                    if tile == BLANK {
                        ".".to_string()
                    } else {
                        tile.to_string()
                    }
                })
                .collect();
            write!(f, "{}", cells.join(" "))?;
            if r < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
