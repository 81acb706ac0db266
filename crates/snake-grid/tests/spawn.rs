use std::collections::BTreeSet;

use snake_core::{Cell, SplitMix64};
use snake_grid::{
    edge_midpoints, furthest_cell, sample_free_cell, GridGraph, ObstacleGrid, Topology,
};

#[test]
fn furthest_cell_on_small_torus() {
    let grid = ObstacleGrid::new(4, 4, Topology::Periodic).expect("grid");
    assert_eq!(furthest_cell(&grid, &[Cell::new(0, 0)]), Some((Cell::new(2, 2), 4)));
}

#[test]
fn furthest_cell_on_bounded_grid_picks_far_corner() {
    let grid = ObstacleGrid::new(5, 3, Topology::Bounded).expect("grid");
    assert_eq!(furthest_cell(&grid, &[Cell::new(0, 0)]), Some((Cell::new(4, 2), 6)));
}

#[test]
fn furthest_cell_breaks_ties_in_row_major_order() {
    let grid = ObstacleGrid::new(3, 3, Topology::Bounded).expect("grid");
    // Every corner is two steps from the center; the first in scan order wins.
    let (cell, d) = furthest_cell(&grid, &[Cell::new(1, 1)]).expect("cell");
    assert_eq!((cell, d), (Cell::new(0, 0), 2));

    let again = furthest_cell(&grid, &[Cell::new(1, 1), Cell::new(1, 1)]);
    assert_eq!(again, Some((cell, d)));
}

#[test]
fn furthest_cell_without_repellents_is_none() {
    let grid = ObstacleGrid::new(3, 3, Topology::Periodic).expect("grid");
    assert_eq!(furthest_cell(&grid, &[]), None);
    assert_eq!(furthest_cell(&grid, &[Cell::new(-1, 7)]), None);
}

#[test]
fn edge_midpoints_sit_on_the_border() {
    let grid = ObstacleGrid::new(9, 5, Topology::Bounded).expect("grid");
    assert_eq!(
        edge_midpoints(&grid),
        [Cell::new(4, 0), Cell::new(4, 4), Cell::new(0, 2), Cell::new(8, 2)]
    );
}

#[test]
fn sampled_cells_are_free_and_new() {
    let mut grid = ObstacleGrid::new(4, 4, Topology::Periodic).expect("grid");
    for x in 0..4 {
        grid.add(Cell::new(x, 0));
    }
    let food: BTreeSet<Cell> = [Cell::new(1, 1)].into_iter().collect();
    let mut rng = SplitMix64::new(99);
    for _ in 0..50 {
        if let Some(cell) = sample_free_cell(&grid, &mut rng, &food, 20) {
            assert!(grid.is_free(cell));
            assert!(!food.contains(&cell));
        }
    }
}

#[test]
fn sampling_a_full_grid_gives_up() {
    let mut grid = ObstacleGrid::new(2, 2, Topology::Periodic).expect("grid");
    for cell in [Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1), Cell::new(1, 1)] {
        grid.add(cell);
    }
    let mut rng = SplitMix64::new(1);
    assert_eq!(sample_free_cell(&grid, &mut rng, &BTreeSet::new(), 20), None);
}
