#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn controller that orchestrates one complete move.
//!
//! A turn slides the board, spawns a tile on the entry edge, and asks the
//! legal-move oracle whether play can continue. The controller never touches
//! the grid directly; it drives the world through commands.

use log::debug;
use rand::Rng;
use twenty48_core::{
    Command, Direction, Event, Grid, Outcome, SpawnAxis, SpawnPolicy, SPAWN_TILE,
};
use twenty48_system_legal_moves::{has_legal_move, mergeable_pairs};
use twenty48_system_spawning::select_on_axis;
use twenty48_world::{self as world, query, World};

/// Drives a [`World`] through complete turns.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurnController {
    policy: SpawnPolicy,
}

impl TurnController {
    /// Creates a controller that spawns tiles according to `policy`.
    #[must_use]
    pub const fn new(policy: SpawnPolicy) -> Self {
        Self { policy }
    }

    /// Spawn policy applied after each slide.
    #[must_use]
    pub const fn policy(&self) -> SpawnPolicy {
        self.policy
    }

    /// Plays one turn in `direction` and returns the resulting outcome.
    ///
    /// Terminal outcomes are sticky: once the world has concluded, the call
    /// returns the stored outcome without issuing any command. Every event the
    /// world emits during the turn is appended to `out_events`.
    pub fn play_turn<R: Rng + ?Sized>(
        &self,
        world: &mut World,
        direction: Direction,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> Outcome {
        let current = query::outcome(world);
        if current.is_terminal() {
            return current;
        }

        debug!("turn {direction} under {:?} spawn policy", self.policy);
        let first_event = out_events.len();
        world::apply(world, Command::Slide { direction }, out_events);

        let slid = &out_events[first_event..];
        let reached_goal = slid
            .iter()
            .any(|event| matches!(event, Event::GoalReached { .. }));
        let moved = slid
            .iter()
            .any(|event| matches!(event, Event::TilesSlid { moved: true, .. }));

        let outcome = if reached_goal {
            Outcome::Victory
        } else if !moved && self.policy == SpawnPolicy::OnChange {
            debug!("{direction} changed nothing; skipping spawn");
            continuation(query::grid(world))
        } else {
            self.spawn(world, direction, rng, out_events)
        };

        world::apply(world, Command::Conclude { outcome }, out_events);
        outcome
    }

    fn spawn<R: Rng + ?Sized>(
        &self,
        world: &mut World,
        direction: Direction,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> Outcome {
        let axis = SpawnAxis::entry_edge(direction);
        let Some(cell) = select_on_axis(query::grid(world), axis, rng) else {
            debug!("entry edge {axis:?} is full");
            return Outcome::Defeat;
        };

        world::apply(
            world,
            Command::PlaceTile {
                cell,
                value: SPAWN_TILE,
            },
            out_events,
        );
        continuation(query::grid(world))
    }
}

fn continuation(grid: &Grid) -> Outcome {
    debug!(
        "{} empty cells, {} mergeable pairs",
        grid.empty_cells().count(),
        mergeable_pairs(grid)
    );
    if has_legal_move(grid) {
        Outcome::Playing
    } else {
        Outcome::Defeat
    }
}

/// Plays one turn directly against a bare grid.
///
/// The grid carries no memory of earlier outcomes, so callers that need
/// terminal outcomes to stick should hold a [`World`] and a
/// [`TurnController`] instead.
pub fn play_turn<R: Rng + ?Sized>(
    grid: &mut Grid,
    direction: Direction,
    rng: &mut R,
    policy: SpawnPolicy,
) -> Outcome {
    let mut world = World::from_grid(*grid);
    let mut events = Vec::new();
    let outcome = TurnController::new(policy).play_turn(&mut world, direction, rng, &mut events);
    *grid = *query::grid(&world);
    outcome
}
