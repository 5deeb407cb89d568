#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure slide-and-merge system that transforms the grid for a single move.
//!
//! Every direction is handled by the same line routine. A [`LineView`]
//! projects one row or column into leading-edge-first order, [`slide_line`]
//! compacts and merges that projection, and the view writes the result back.

use twenty48_core::{CellCoord, Direction, Grid, Tile, GRID_SIZE, WINNING_TILE};

/// Summary of a slide across all four lines of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SlideReport {
    /// A merge produced the winning tile somewhere on the board.
    pub reached_2048: bool,
    /// At least one cell changed value.
    pub moved: bool,
    /// Number of merges performed across all lines.
    pub merges: u32,
}

/// Result of sliding one line toward its leading edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSlide {
    /// Line values after compaction and merging, leading edge first.
    pub values: [Tile; GRID_SIZE],
    /// Number of merges performed in the line.
    pub merges: u32,
    /// A merge in this line produced the winning tile.
    pub reached_2048: bool,
}

/// Ordered projection of one row or column, traversed from the leading edge inward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineView {
    direction: Direction,
    index: usize,
}

impl LineView {
    /// View of line `index` (a column for vertical directions, a row otherwise).
    #[must_use]
    pub const fn new(direction: Direction, index: usize) -> Self {
        Self { direction, index }
    }

    /// Cell that sits `offset` steps in from the leading edge.
    #[must_use]
    pub const fn cell(&self, offset: usize) -> CellCoord {
        let along = if self.direction.leads_toward_origin() {
            offset
        } else {
            GRID_SIZE - 1 - offset
        };

        if self.direction.is_vertical() {
            CellCoord::new(along, self.index)
        } else {
            CellCoord::new(self.index, along)
        }
    }

    /// Every cell of the line, leading edge first.
    #[must_use]
    pub fn cells(&self) -> [CellCoord; GRID_SIZE] {
        std::array::from_fn(|offset| self.cell(offset))
    }

    /// Copies the line's values out of the grid, leading edge first.
    #[must_use]
    pub fn read(&self, grid: &Grid) -> [Tile; GRID_SIZE] {
        std::array::from_fn(|offset| grid.get(self.cell(offset)).unwrap_or(0))
    }

    /// Writes leading-edge-first values back into the grid.
    pub fn write(&self, grid: &mut Grid, values: [Tile; GRID_SIZE]) {
        for (offset, value) in values.into_iter().enumerate() {
            grid.set(self.cell(offset), value);
        }
    }
}

/// Slides every line of `grid` toward the edge named by `direction`.
///
/// The full transform always runs; callers inspect [`SlideReport::moved`] to
/// learn whether the move did anything.
pub fn apply(grid: &mut Grid, direction: Direction) -> SlideReport {
    let mut report = SlideReport::default();

    for index in 0..GRID_SIZE {
        let view = LineView::new(direction, index);
        let before = view.read(grid);
        let slid = slide_line(before);

        report.moved |= slid.values != before;
        report.merges += slid.merges;
        report.reached_2048 |= slid.reached_2048;
        view.write(grid, slid.values);
    }

    report
}

/// Compacts and merges a single line whose index 0 is the leading edge.
///
/// Each tile merges at most once: once a slot receives a merge result the
/// target moves past it, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`.
#[must_use]
pub fn slide_line(line: [Tile; GRID_SIZE]) -> LineSlide {
    let mut values = compact(line);
    let mut merges = 0;
    let mut reached_2048 = false;
    let mut target = 0;

    for index in 1..GRID_SIZE {
        let value = values[index];
        if value == 0 {
            continue;
        }
        values[index] = 0;

        // A pair whose doubled value overflows stays unmerged.
        let merged = (values[target] == value)
            .then(|| value.checked_mul(2))
            .flatten();

        if values[target] == 0 {
            values[target] = value;
        } else if let Some(merged) = merged {
            values[target] = merged;
            merges += 1;
            reached_2048 |= merged == WINNING_TILE;
            target += 1;
        } else {
            target += 1;
            values[target] = value;
        }
    }

    LineSlide {
        values,
        merges,
        reached_2048,
    }
}

fn compact(line: [Tile; GRID_SIZE]) -> [Tile; GRID_SIZE] {
    let mut compacted = [0; GRID_SIZE];
    for (slot, value) in compacted
        .iter_mut()
        .zip(line.into_iter().filter(|value| *value != 0))
    {
        *slot = value;
    }
    compacted
}
