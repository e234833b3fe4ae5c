use crate::engine::{Board, BOARD_SIZE, CELL_COUNT};
use crate::error::{PuzzleError, Result};

/// Parses a board from text.
///
/// The text holds either `BOARD_SIZE` lines of `BOARD_SIZE` whitespace
/// separated integers, or a single line with all nine values in row-major
/// order. Blank lines are ignored. `0` marks the blank.
///
/// Unlike `Board::from_grid`, the result is checked: every value must be in
/// `0..=8` and appear exactly once.
///
/// # Errors
/// - `PuzzleError::InvalidRowCount` if the number of non-empty lines is wrong.
/// - `PuzzleError::InvalidRowLength` if a row has the wrong number of values.
/// - `PuzzleError::InvalidTileValue` if a value is not an integer in `0..=8`.
/// - `PuzzleError::DuplicateTile` if a value appears twice.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::utils::board_from_str;
///
/// let board = board_from_str("1 2 3\n4 0 6\n7 5 8\n").unwrap();
/// assert_eq!(board, Board::from_grid([[1, 2, 3], [4, 0, 6], [7, 5, 8]]));
///
/// let flat = board_from_str("1 2 3 4 0 6 7 5 8").unwrap();
/// assert_eq!(flat, board);
///
/// assert!(board_from_str("1 2 3\n4 4 6\n7 5 8").is_err());
/// ```
pub fn board_from_str(s: &str) -> Result<Board> {
    let lines: Vec<&str> = s
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() == 1 {
        let values: Vec<&str> = lines[0].split_whitespace().collect();
        if values.len() != CELL_COUNT {
            return Err(PuzzleError::InvalidRowLength {
                row: 0,
                expected: CELL_COUNT,
                found: values.len(),
            });
        }
        let rows: Vec<Vec<&str>> = values.chunks(BOARD_SIZE).map(|c| c.to_vec()).collect();
        return board_from_tokens(&rows);
    }

    if lines.len() != BOARD_SIZE {
        return Err(PuzzleError::InvalidRowCount {
            expected: BOARD_SIZE,
            found: lines.len(),
        });
    }

    let rows: Vec<Vec<&str>> = lines
        .iter()
        .map(|line| line.split_whitespace().collect())
        .collect();
    board_from_tokens(&rows)
}

fn board_from_tokens(rows: &[Vec<&str>]) -> Result<Board> {
    let mut grid = [[0u8; BOARD_SIZE]; BOARD_SIZE];
    let mut seen = [false; CELL_COUNT];

    for (r, row) in rows.iter().enumerate() {
        if row.len() != BOARD_SIZE {
            return Err(PuzzleError::InvalidRowLength {
                row: r,
                expected: BOARD_SIZE,
                found: row.len(),
            });
        }

        for (c, token) in row.iter().enumerate() {
            let tile = match token.parse::<u8>() {
                Ok(v) if (v as usize) < CELL_COUNT => v,
                _ => {
                    return Err(PuzzleError::InvalidTileValue {
                        value: token.to_string(),
                        row: r,
                        col: c,
                    })
                }
            };
            if seen[tile as usize] {
                return Err(PuzzleError::DuplicateTile { tile });
            }
            seen[tile as usize] = true;
            grid[r][c] = tile;
        }
    }
    // Nine distinct values from 0..=8 always include the blank.
    Ok(Board::from_grid(grid))
}
