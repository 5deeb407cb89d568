#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the twenty48 engine.
//!
//! This crate defines the grid data model and the message surface that
//! connects adapters, the authoritative world, and pure systems. The turn
//! controller submits [`Command`] values describing desired mutations, the
//! world executes those commands via its `apply` entry point, and then
//! broadcasts [`Event`] values describing what actually happened. Systems read
//! immutable [`Grid`] snapshots and never mutate state they do not own.

mod grid;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use grid::{is_valid_tile, Grid, InvariantViolation, Tile};

/// Number of rows and columns on the square board.
pub const GRID_SIZE: usize = 4;

/// Tile value that wins the game as soon as a merge produces it.
pub const WINNING_TILE: Tile = 2048;

/// Value written into the cell selected for a freshly spawned tile.
pub const SPAWN_TILE: Tile = 2;

/// Direction along which tiles slide during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Tiles compact toward row 0.
    Up,
    /// Tiles compact toward the last row.
    Down,
    /// Tiles compact toward column 0.
    Left,
    /// Tiles compact toward the last column.
    Right,
}

impl Direction {
    /// Every direction, in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns `true` when the direction slides tiles along columns.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Returns `true` when tiles compact toward index 0 of their line.
    #[must_use]
    pub const fn leads_toward_origin(self) -> bool {
        matches!(self, Direction::Up | Direction::Left)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(label)
    }
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: usize,
    column: usize,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Reports whether the coordinate lies on the board.
    #[must_use]
    pub const fn is_on_board(&self) -> bool {
        self.row < GRID_SIZE && self.column < GRID_SIZE
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Single row or column along which a new tile may appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnAxis {
    /// Every column of the given row is a candidate.
    Row(usize),
    /// Every row of the given column is a candidate.
    Column(usize),
}

impl SpawnAxis {
    /// Edge that new tiles enter from after sliding in `direction`.
    ///
    /// Tiles always appear on the side the board just slid away from.
    #[must_use]
    pub const fn entry_edge(direction: Direction) -> Self {
        match direction {
            Direction::Up => SpawnAxis::Row(GRID_SIZE - 1),
            Direction::Down => SpawnAxis::Row(0),
            Direction::Left => SpawnAxis::Column(GRID_SIZE - 1),
            Direction::Right => SpawnAxis::Column(0),
        }
    }

    /// Cell at position `index` along the free axis of this line.
    #[must_use]
    pub const fn cell_at(self, index: usize) -> CellCoord {
        match self {
            SpawnAxis::Row(row) => CellCoord::new(row, index),
            SpawnAxis::Column(column) => CellCoord::new(index, column),
        }
    }

    /// Index of the fixed row or column.
    #[must_use]
    pub const fn fixed_index(self) -> usize {
        match self {
            SpawnAxis::Row(index) | SpawnAxis::Column(index) => index,
        }
    }
}

/// State of the game after a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The game continues.
    #[default]
    Playing,
    /// A merge produced the winning tile.
    Victory,
    /// No legal move remains, or the entry edge had no room for a new tile.
    Defeat,
}

impl Outcome {
    /// Victory and defeat both end the session.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Playing)
    }
}

/// Decides whether a move that changed nothing still spawns a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpawnPolicy {
    /// Every move spawns a tile, even one that left the grid untouched.
    #[default]
    Always,
    /// Only moves that changed the grid spawn a tile.
    OnChange,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Slides and merges every line of the grid toward one edge.
    Slide {
        /// Direction the tiles travel.
        direction: Direction,
    },
    /// Writes a new tile into an empty cell.
    PlaceTile {
        /// Cell that receives the tile.
        cell: CellCoord,
        /// Value of the new tile.
        value: Tile,
    },
    /// Records the outcome decided by the turn controller.
    Conclude {
        /// Outcome to store.
        outcome: Outcome,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that a slide was performed.
    TilesSlid {
        /// Direction the tiles travelled.
        direction: Direction,
        /// Whether any cell changed value.
        moved: bool,
        /// Number of merges performed across all lines.
        merges: u32,
    },
    /// Announces that a merge produced the winning tile.
    GoalReached {
        /// Value of the tile that triggered the win.
        value: Tile,
    },
    /// Confirms that a tile was written into the grid.
    TilePlaced {
        /// Cell that received the tile.
        cell: CellCoord,
        /// Value of the placed tile.
        value: Tile,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Value provided in the placement request.
        value: Tile,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces a change of outcome.
    OutcomeDecided {
        /// Outcome that became active.
        outcome: Outcome,
    },
    /// Reports that a command arrived after the game had already ended.
    CommandIgnored {
        /// Terminal outcome that blocked the command.
        outcome: Outcome,
    },
}

/// Reasons a tile placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The cell lies outside the board.
    OutOfBounds,
    /// The cell already holds a tile.
    Occupied,
    /// The value is zero or not a power of two.
    InvalidValue,
}
