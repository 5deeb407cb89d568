#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for twenty48.
//!
//! The [`World`] exclusively owns the single [`Grid`] and the current
//! [`Outcome`]. Every mutation flows through [`apply`], which executes a
//! [`Command`] and reports what happened as [`Event`] values.

use log::{debug, info, warn};
use twenty48_core::{
    is_valid_tile, CellCoord, Command, Event, Grid, Outcome, PlacementError, Tile, WINNING_TILE,
};

/// Represents the authoritative twenty48 world state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct World {
    grid: Grid,
    outcome: Outcome,
    turn_index: u64,
}

impl World {
    /// Creates a world with an empty board and no starting tiles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a world that starts from an existing board.
    #[must_use]
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    fn place_tile(&mut self, cell: CellCoord, value: Tile) -> Result<(), PlacementError> {
        if !cell.is_on_board() {
            return Err(PlacementError::OutOfBounds);
        }
        if value == 0 || !is_valid_tile(value) {
            return Err(PlacementError::InvalidValue);
        }
        if self.grid.get(cell) != Some(0) {
            return Err(PlacementError::Occupied);
        }

        self.grid.set(cell, value);
        Ok(())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the outcome is terminal, slides and placements are ignored and
/// reported with [`Event::CommandIgnored`].
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.outcome.is_terminal() && !matches!(command, Command::Conclude { .. }) {
        warn!("ignoring {command:?}: game already ended in {:?}", world.outcome);
        out_events.push(Event::CommandIgnored {
            outcome: world.outcome,
        });
        return;
    }

    match command {
        Command::Slide { direction } => {
            let report = twenty48_system_slide::apply(&mut world.grid, direction);
            world.turn_index = world.turn_index.saturating_add(1);
            debug!(
                "turn {}: slid {direction}, moved={}, merges={}",
                world.turn_index, report.moved, report.merges
            );

            out_events.push(Event::TilesSlid {
                direction,
                moved: report.moved,
                merges: report.merges,
            });
            if report.reached_2048 {
                out_events.push(Event::GoalReached {
                    value: WINNING_TILE,
                });
            }
        }
        Command::PlaceTile { cell, value } => match world.place_tile(cell, value) {
            Ok(()) => out_events.push(Event::TilePlaced { cell, value }),
            Err(reason) => {
                warn!("rejected tile {value} at {cell}: {reason:?}");
                out_events.push(Event::PlacementRejected {
                    cell,
                    value,
                    reason,
                });
            }
        },
        Command::Conclude { outcome } => {
            if world.outcome.is_terminal() || world.outcome == outcome {
                return;
            }
            info!("outcome decided after {} turns: {outcome:?}", world.turn_index);
            world.outcome = outcome;
            out_events.push(Event::OutcomeDecided { outcome });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use twenty48_core::{Grid, Outcome};

    use super::World;

    /// Current board.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Current outcome.
    #[must_use]
    pub fn outcome(world: &World) -> Outcome {
        world.outcome
    }

    /// Number of slides the world has executed.
    #[must_use]
    pub fn turn_index(world: &World) -> u64 {
        world.turn_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twenty48_core::Direction;

    fn world_with(rows: [[Tile; 4]; 4]) -> World {
        World::from_grid(Grid::from_rows(rows).expect("valid grid"))
    }

    #[test]
    fn new_world_is_empty_and_playing() {
        let world = World::new();
        assert_eq!(query::grid(&world), &Grid::new());
        assert_eq!(query::outcome(&world), Outcome::Playing);
        assert_eq!(query::turn_index(&world), 0);
    }

    #[test]
    fn slide_reports_moves_and_goal() {
        let mut world = world_with([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Slide {
                direction: Direction::Left,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::TilesSlid {
                    direction: Direction::Left,
                    moved: true,
                    merges: 1,
                },
                Event::GoalReached { value: 2048 },
            ]
        );
        assert_eq!(query::turn_index(&world), 1);
        assert_eq!(
            query::outcome(&world),
            Outcome::Playing,
            "the controller decides outcomes"
        );
    }

    #[test]
    fn placement_rejects_occupied_cells_and_bad_values() {
        let mut world = world_with([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut events = Vec::new();

        for (cell, value) in [
            (CellCoord::new(0, 0), 2),
            (CellCoord::new(0, 1), 3),
            (CellCoord::new(0, 1), 0),
            (CellCoord::new(4, 0), 2),
        ] {
            apply(&mut world, Command::PlaceTile { cell, value }, &mut events);
        }

        let reasons: Vec<PlacementError> = events
            .iter()
            .filter_map(|event| match event {
                Event::PlacementRejected { reason, .. } => Some(*reason),
                _ => None,
            })
            .collect();
        assert_eq!(
            reasons,
            vec![
                PlacementError::Occupied,
                PlacementError::InvalidValue,
                PlacementError::InvalidValue,
                PlacementError::OutOfBounds,
            ]
        );
        assert_eq!(query::grid(&world).total(), 2);
    }

    #[test]
    fn placement_writes_into_empty_cells() {
        let mut world = World::new();
        let mut events = Vec::new();
        let cell = CellCoord::new(3, 1);
        apply(&mut world, Command::PlaceTile { cell, value: 2 }, &mut events);

        assert_eq!(events, vec![Event::TilePlaced { cell, value: 2 }]);
        assert_eq!(query::grid(&world).get(cell), Some(2));
    }

    #[test]
    fn terminal_outcome_freezes_the_board() {
        let mut world = world_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Conclude {
                outcome: Outcome::Defeat,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::OutcomeDecided {
                outcome: Outcome::Defeat,
            }]
        );

        events.clear();
        let before = *query::grid(&world);
        apply(
            &mut world,
            Command::Slide {
                direction: Direction::Left,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::Conclude {
                outcome: Outcome::Victory,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::CommandIgnored {
                outcome: Outcome::Defeat,
            }]
        );
        assert_eq!(query::grid(&world), &before);
        assert_eq!(query::outcome(&world), Outcome::Defeat);
    }
}
