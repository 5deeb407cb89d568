use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use twenty48_core::{CellCoord, Direction, Grid, SpawnAxis, GRID_SIZE};
use twenty48_system_spawning::{select_on_axis, select_spawn_cell, SpawnError};

fn grid(rows: [[u32; GRID_SIZE]; GRID_SIZE]) -> Grid {
    Grid::from_rows(rows).expect("test grid must hold valid tiles")
}

#[test]
fn after_sliding_left_only_the_rightmost_column_is_searched() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let mut board = grid([[2, 4, 0, 0], [8, 0, 0, 0], [0; 4], [2, 0, 0, 0]]);
    let _ = twenty48_system_slide::apply(&mut board, Direction::Left);

    for _ in 0..64 {
        let cell = select_on_axis(&board, SpawnAxis::entry_edge(Direction::Left), &mut rng)
            .expect("rightmost column has room");
        assert_eq!(cell.column(), GRID_SIZE - 1);
        assert_eq!(board.get(cell), Some(0));
    }
}

#[test]
fn full_entry_line_is_absent_even_when_other_cells_are_empty() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let board = grid([[0, 0, 0, 2], [0, 0, 0, 4], [0, 0, 0, 8], [0, 0, 0, 16]]);

    assert_eq!(
        select_spawn_cell(&board, None, Some(GRID_SIZE - 1), &mut rng),
        Ok(None)
    );
    assert!(select_spawn_cell(&board, None, Some(0), &mut rng)
        .expect("valid constraint")
        .is_some());
}

#[test]
fn single_empty_cell_is_always_found() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let board = grid([[2; 4], [4; 4], [8; 4], [16, 16, 0, 16]]);

    for _ in 0..32 {
        assert_eq!(
            select_spawn_cell(&board, Some(3), None, &mut rng),
            Ok(Some(CellCoord::new(3, 2)))
        );
    }
}

#[test]
fn every_empty_cell_on_the_line_is_reachable() {
    let mut rng = ChaCha8Rng::seed_from_u64(2048);
    let board = grid([[0, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);

    let seen: HashSet<CellCoord> = (0..256)
        .filter_map(|_| select_on_axis(&board, SpawnAxis::Row(0), &mut rng))
        .collect();

    let expected: HashSet<CellCoord> = [0, 2, 3]
        .into_iter()
        .map(|column| CellCoord::new(0, column))
        .collect();
    assert_eq!(seen, expected);
}

#[test]
fn contract_violations_fail_before_sampling() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let board = Grid::new();

    assert!(matches!(
        select_spawn_cell(&board, None, None, &mut rng),
        Err(SpawnError::InvalidArgument { .. })
    ));
    assert!(matches!(
        select_spawn_cell(&board, Some(0), Some(3), &mut rng),
        Err(SpawnError::InvalidArgument { .. })
    ));
    assert!(matches!(
        select_spawn_cell(&board, Some(4), None, &mut rng),
        Err(SpawnError::OutOfBounds { index: 4 })
    ));
}

#[test]
fn same_seed_selects_the_same_sequence() {
    let board = grid([[0; 4], [2, 0, 4, 0], [0; 4], [0; 4]]);
    let draw = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..16)
            .map(|_| select_on_axis(&board, SpawnAxis::Column(1), &mut rng))
            .collect::<Vec<_>>()
    };

    assert_eq!(draw(11), draw(11));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "off the board")]
fn off_board_axis_is_not_mistaken_for_a_full_line() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let _ = select_on_axis(&Grid::new(), SpawnAxis::Row(GRID_SIZE + 3), &mut rng);
}
