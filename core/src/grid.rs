use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CellCoord, GRID_SIZE};

/// Value held by a single cell. Zero marks an empty cell.
pub type Tile = u32;

/// Reports whether `value` may legally appear on the board.
#[must_use]
pub const fn is_valid_tile(value: Tile) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// A tile value outside the power-of-two set was found on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("tile value {value} at {cell} is not a power of two")]
pub struct InvariantViolation {
    /// Cell that holds the offending value.
    pub cell: CellCoord,
    /// Offending value.
    pub value: Tile,
}

/// Fixed 4x4 board of tile values, stored row-major.
///
/// Every non-zero value is `2^k` for some `k >= 1`. The grid itself does not
/// enforce this on [`Grid::set`]; the world validates writes before they land
/// and [`Grid::validate`] re-checks the whole board. Deserialization goes
/// through [`Grid::from_rows`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[[Tile; GRID_SIZE]; GRID_SIZE]", into = "[[Tile; GRID_SIZE]; GRID_SIZE]")]
pub struct Grid {
    cells: [[Tile; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Builds a board from row-major values, rejecting non power-of-two tiles.
    pub fn from_rows(rows: [[Tile; GRID_SIZE]; GRID_SIZE]) -> Result<Self, InvariantViolation> {
        let grid = Self { cells: rows };
        grid.validate()?;
        Ok(grid)
    }

    /// Row-major view of every cell.
    #[must_use]
    pub const fn rows(&self) -> &[[Tile; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Values of row `row` from left to right.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<[Tile; GRID_SIZE]> {
        self.cells.get(row).copied()
    }

    /// Values of column `column` from top to bottom.
    #[must_use]
    pub fn column(&self, column: usize) -> Option<[Tile; GRID_SIZE]> {
        (column < GRID_SIZE).then(|| self.cells.map(|row| row[column]))
    }

    /// Value stored at `cell`, or `None` when the coordinate is off the board.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<Tile> {
        self.cells
            .get(cell.row())
            .and_then(|row| row.get(cell.column()))
            .copied()
    }

    /// Overwrites the value at `cell`. Coordinates off the board are ignored.
    pub fn set(&mut self, cell: CellCoord, value: Tile) {
        if let Some(slot) = self
            .cells
            .get_mut(cell.row())
            .and_then(|row| row.get_mut(cell.column()))
        {
            *slot = value;
        }
    }

    /// Iterates every cell with its coordinate in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, Tile)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .map(move |(column, value)| (CellCoord::new(row, column), *value))
        })
    }

    /// Iterates the coordinates of every empty cell in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells()
            .filter_map(|(cell, value)| (value == 0).then_some(cell))
    }

    /// Returns `true` when no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|value| *value != 0)
    }

    /// Highest tile on the board, zero when empty.
    #[must_use]
    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of every tile on the board.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().map(|value| u64::from(*value)).sum()
    }

    /// Checks the power-of-two invariant, reporting the first offending cell.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        match self.cells().find(|(_, value)| !is_valid_tile(*value)) {
            Some((cell, value)) => Err(InvariantViolation { cell, value }),
            None => Ok(()),
        }
    }
}

impl TryFrom<[[Tile; GRID_SIZE]; GRID_SIZE]> for Grid {
    type Error = InvariantViolation;

    fn try_from(rows: [[Tile; GRID_SIZE]; GRID_SIZE]) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for [[Tile; GRID_SIZE]; GRID_SIZE] {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}
