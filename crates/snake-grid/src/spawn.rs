use std::collections::{BTreeSet, VecDeque};

use snake_core::{Cell, DeterministicRng};

use crate::GridGraph;

/// Rejection-sampling budget for food placement.
pub const DEFAULT_FOOD_TRIES: u32 = 20;

/// Uniformly samples a cell that holds no obstacle and is not in `exclude`.
///
/// Gives up after `max_tries` rejected samples; callers treat `None` as
/// "nothing placed this tick".
pub fn sample_free_cell<G, R>(
    graph: &G,
    rng: &mut R,
    exclude: &BTreeSet<Cell>,
    max_tries: u32,
) -> Option<Cell>
where
    G: GridGraph,
    R: DeterministicRng,
{
    for _ in 0..max_tries {
        let cell = Cell::new(
            rng.next_below(graph.width()) as i32,
            rng.next_below(graph.height()) as i32,
        );
        if graph.is_free(cell) && !exclude.contains(&cell) {
            return Some(cell);
        }
    }
    None
}

/// Midpoints of the four grid edges (top, bottom, left, right).
pub fn edge_midpoints<G: GridGraph>(graph: &G) -> [Cell; 4] {
    let max_x = graph.width().saturating_sub(1) as i32;
    let max_y = graph.height().saturating_sub(1) as i32;
    let (half_x, half_y) = (max_x / 2, max_y / 2);
    [
        Cell::new(half_x, 0),
        Cell::new(half_x, max_y),
        Cell::new(0, half_y),
        Cell::new(max_x, half_y),
    ]
}

/// The cell whose distance to the nearest repellent is maximal, with that distance.
///
/// Distances are shortest 4-connected step counts under the graph's topology,
/// ignoring obstacles (a multi-source breadth-first sweep). Ties go to the
/// first cell in row-major order, so the answer only depends on the set of
/// repellents. Off-grid repellents are ignored; returns `None` when none remain.
pub fn furthest_cell<G: GridGraph>(graph: &G, repellents: &[Cell]) -> Option<(Cell, u32)> {
    let width = graph.width() as usize;
    let len = width * graph.height() as usize;
    let idx = |c: Cell| c.y as usize * width + c.x as usize;

    let mut dist = vec![u32::MAX; len];
    let mut frontier = VecDeque::new();
    for &cell in repellents {
        if graph.contains(cell) && dist[idx(cell)] == u32::MAX {
            dist[idx(cell)] = 0;
            frontier.push_back(cell);
        }
    }
    if frontier.is_empty() {
        return None;
    }

    while let Some(cell) = frontier.pop_front() {
        let d = dist[idx(cell)];
        for direction in snake_core::Direction::ALL {
            let n = graph.neighbor(cell, direction);
            if graph.contains(n) && dist[idx(n)] == u32::MAX {
                dist[idx(n)] = d + 1;
                frontier.push_back(n);
            }
        }
    }

    let mut best: Option<(usize, u32)> = None;
    for (i, &d) in dist.iter().enumerate() {
        if best.map_or(true, |(_, bd)| d > bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, d)| (Cell::new((i % width) as i32, (i / width) as i32), d))
}
