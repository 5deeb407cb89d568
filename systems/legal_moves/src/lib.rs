#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that decides whether any further move can change the grid.

use twenty48_core::{Grid, GRID_SIZE};

/// Returns `true` while at least one move remains.
///
/// A move remains when any cell is empty or when two horizontally or
/// vertically adjacent cells hold the same value. Every row and column is
/// inspected, including the last ones.
#[must_use]
pub fn has_legal_move(grid: &Grid) -> bool {
    !grid.is_full() || mergeable_pairs(grid) > 0
}

/// Counts adjacent pairs of equal non-zero tiles across the whole grid.
#[must_use]
pub fn mergeable_pairs(grid: &Grid) -> usize {
    let rows = grid.rows();
    let mut pairs = 0;

    for row in 0..GRID_SIZE {
        for column in 0..GRID_SIZE {
            let value = rows[row][column];
            if value == 0 {
                continue;
            }
            if column + 1 < GRID_SIZE && rows[row][column + 1] == value {
                pairs += 1;
            }
            if row + 1 < GRID_SIZE && rows[row + 1][column] == value {
                pairs += 1;
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_pairs_in_last_row_and_column() {
        let grid = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 8], [2, 4, 2, 8], [4, 2, 16, 16]])
            .expect("valid grid");
        assert_eq!(mergeable_pairs(&grid), 2);
    }
}
