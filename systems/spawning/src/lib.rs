#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure spawning system that picks the cell receiving a newly spawned tile.
//!
//! New tiles only ever enter along a single line: the edge the board just
//! slid away from. The selector samples that line's cells in random order
//! without replacement and returns the first empty one. It never writes to
//! the grid; placing the tile is the turn controller's job.

use rand::{seq::SliceRandom, Rng};
use thiserror::Error;
use twenty48_core::{CellCoord, Grid, SpawnAxis, GRID_SIZE};

/// Contract violations detected before any sampling takes place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// Both or neither of the fixed row and fixed column were supplied.
    #[error("exactly one of fixed row or fixed column must be given (row: {row:?}, column: {column:?})")]
    InvalidArgument {
        /// Fixed row supplied by the caller.
        row: Option<usize>,
        /// Fixed column supplied by the caller.
        column: Option<usize>,
    },
    /// The fixed index lies outside the board.
    #[error("spawn line index {index} is outside the board")]
    OutOfBounds {
        /// Offending index.
        index: usize,
    },
}

/// Resolves an explicit row/column constraint into a [`SpawnAxis`].
pub fn resolve_axis(
    fixed_row: Option<usize>,
    fixed_column: Option<usize>,
) -> Result<SpawnAxis, SpawnError> {
    let axis = match (fixed_row, fixed_column) {
        (Some(row), None) => SpawnAxis::Row(row),
        (None, Some(column)) => SpawnAxis::Column(column),
        (row, column) => return Err(SpawnError::InvalidArgument { row, column }),
    };

    let index = axis.fixed_index();
    if index >= GRID_SIZE {
        return Err(SpawnError::OutOfBounds { index });
    }
    Ok(axis)
}

/// Picks a uniformly random empty cell on the line named by the constraint.
///
/// Exactly one of `fixed_row` and `fixed_column` must be present. Returns
/// `Ok(None)` when every cell of that line is occupied.
pub fn select_spawn_cell<R: Rng + ?Sized>(
    grid: &Grid,
    fixed_row: Option<usize>,
    fixed_column: Option<usize>,
    rng: &mut R,
) -> Result<Option<CellCoord>, SpawnError> {
    let axis = resolve_axis(fixed_row, fixed_column)?;
    Ok(select_on_axis(grid, axis, rng))
}

/// Picks a uniformly random empty cell on `axis`, or `None` when the line is full.
///
/// Other lines are never searched, even when they have room. The axis must
/// lie on the board; [`resolve_axis`] checks untrusted indices.
pub fn select_on_axis<R: Rng + ?Sized>(
    grid: &Grid,
    axis: SpawnAxis,
    rng: &mut R,
) -> Option<CellCoord> {
    debug_assert!(
        axis.fixed_index() < GRID_SIZE,
        "spawn axis {axis:?} is off the board"
    );
    let mut candidates: [usize; GRID_SIZE] = std::array::from_fn(|index| index);
    candidates.shuffle(rng);

    candidates
        .into_iter()
        .map(|index| axis.cell_at(index))
        .find(|cell| grid.get(*cell) == Some(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_axis_requires_exactly_one_constraint() {
        assert_eq!(resolve_axis(Some(3), None), Ok(SpawnAxis::Row(3)));
        assert_eq!(resolve_axis(None, Some(0)), Ok(SpawnAxis::Column(0)));
        assert_eq!(
            resolve_axis(None, None),
            Err(SpawnError::InvalidArgument {
                row: None,
                column: None,
            })
        );
        assert_eq!(
            resolve_axis(Some(1), Some(1)),
            Err(SpawnError::InvalidArgument {
                row: Some(1),
                column: Some(1),
            })
        );
    }

    #[test]
    fn resolve_axis_rejects_indices_off_the_board() {
        assert_eq!(
            resolve_axis(None, Some(GRID_SIZE)),
            Err(SpawnError::OutOfBounds { index: GRID_SIZE })
        );
    }
}
