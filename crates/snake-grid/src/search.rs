use core::cmp::Ordering;
use std::collections::BinaryHeap;

use snake_core::{Cell, Direction};

use crate::{GridGraph, Heuristic, COST_SCALE};

/// One move of a planned path: the direction taken and the cell it lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub cell: Cell,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Upper bound on closed nodes before the search gives up.
    pub max_expansions: usize,
    /// Soft preference for cells with at least this many free neighbors.
    /// Only breaks ties between nodes of equal priority.
    pub caution: u32,
}

impl SearchParams {
    pub const DEFAULT_MAX_EXPANSIONS: usize = 450;
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_expansions: Self::DEFAULT_MAX_EXPANSIONS,
            caution: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Moves from the start (exclusive) to the last node of the path (inclusive).
    pub steps: Vec<Step>,
    /// Whether `steps` ends on the heuristic's target. When `false`, the path
    /// leads to the visited node with the best estimate instead.
    pub reached: bool,
    /// Closed nodes in expansion order.
    pub expanded: Vec<Cell>,
}

impl SearchOutcome {
    pub fn first_step(&self) -> Option<Step> {
        self.steps.first().copied()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[derive(Debug)]
struct OpenNode {
    f: u32,
    cramped: bool,
    g: u32,
    idx: usize,
    tie: u64,
}

impl OpenNode {
    // FIFO among equal priorities: `tie` is the insertion counter.
    fn key(&self) -> (u32, bool, u64) {
        (self.f, self.cramped, self.tie)
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

/// Reusable scratch buffers for [`best_first`].
///
/// Agents replan often; keeping one query per agent avoids per-search allocations.
#[derive(Debug, Default)]
pub struct SearchQuery {
    open: BinaryHeap<OpenNode>,
    g_score: Vec<u32>,
    came_from: Vec<Option<(usize, Direction)>>,
    closed: Vec<bool>,
}

impl SearchQuery {
    fn prepare(&mut self, len: usize) {
        self.open.clear();
        self.g_score.clear();
        self.g_score.resize(len, u32::MAX);
        self.came_from.clear();
        self.came_from.resize(len, None);
        self.closed.clear();
        self.closed.resize(len, false);
    }
}

fn idx_of<G: GridGraph>(graph: &G, cell: Cell) -> Option<usize> {
    graph
        .contains(cell)
        .then(|| cell.y as usize * graph.width() as usize + cell.x as usize)
}

fn cell_of<G: GridGraph>(graph: &G, idx: usize) -> Cell {
    let width = graph.width() as usize;
    Cell::new((idx % width) as i32, (idx / width) as i32)
}

/// Whether `cell`, entered from `from`, has fewer than `caution` free
/// neighbors beyond the step that reached it.
fn is_cramped<G: GridGraph>(graph: &G, cell: Cell, from: Cell, caution: u32) -> bool {
    if caution == 0 {
        return false;
    }
    let room = graph
        .free_neighbors(cell)
        .filter(|&(n, _)| n != from)
        .count() as u32;
    room < caution
}

fn reconstruct<G: GridGraph>(
    graph: &G,
    came_from: &[Option<(usize, Direction)>],
    mut current: usize,
) -> Vec<Step> {
    let mut out = Vec::new();
    while let Some((prev, direction)) = came_from[current] {
        out.push(Step {
            cell: cell_of(graph, current),
            direction,
        });
        current = prev;
    }
    out.reverse();
    out
}

/// Best-first (A*) search from `start` toward `heuristic.target()`.
///
/// The start cell itself is never tested for obstacles (it is usually the
/// searching agent's own head). Expansion goes through `free_neighbors`, so
/// the target is only reachable while it is free. Every step costs
/// [`COST_SCALE`]; the open list is ordered by `g + h`, ties resolved by the
/// caution preference and then by insertion order.
///
/// If the target cannot be reached within `params.max_expansions` closed
/// nodes, the outcome holds a path to the visited node with the lowest
/// estimate (possibly empty when no neighbor improves on the start).
pub fn best_first<G: GridGraph>(
    graph: &G,
    start: Cell,
    heuristic: &Heuristic,
    params: SearchParams,
    query: &mut SearchQuery,
) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();
    let Some(start_idx) = idx_of(graph, start) else {
        return outcome;
    };
    if start == heuristic.target() {
        outcome.reached = true;
        return outcome;
    }

    let grid_len = graph.width() as usize * graph.height() as usize;
    query.prepare(grid_len);

    let mut tie: u64 = 0;
    query.g_score[start_idx] = 0;
    query.open.push(OpenNode {
        f: heuristic.estimate(start),
        cramped: false,
        g: 0,
        idx: start_idx,
        tie,
    });
    tie += 1;

    let mut best = (heuristic.estimate(start), start_idx);

    while let Some(node) = query.open.pop() {
        if query.closed[node.idx] || node.g != query.g_score[node.idx] {
            // Stale heap entry.
            continue;
        }
        if outcome.expanded.len() >= params.max_expansions {
            break;
        }

        let cell = cell_of(graph, node.idx);
        query.closed[node.idx] = true;
        outcome.expanded.push(cell);

        if cell == heuristic.target() {
            outcome.steps = reconstruct(graph, &query.came_from, node.idx);
            outcome.reached = true;
            return outcome;
        }

        let h = heuristic.estimate(cell);
        if h < best.0 {
            best = (h, node.idx);
        }

        for (n, direction) in graph.free_neighbors(cell) {
            let Some(n_idx) = idx_of(graph, n) else { continue };
            if query.closed[n_idx] {
                continue;
            }

            let tentative_g = node.g.saturating_add(COST_SCALE);
            if tentative_g >= query.g_score[n_idx] {
                continue;
            }

            query.came_from[n_idx] = Some((node.idx, direction));
            query.g_score[n_idx] = tentative_g;
            query.open.push(OpenNode {
                f: tentative_g.saturating_add(heuristic.estimate(n)),
                cramped: is_cramped(graph, n, cell, params.caution),
                g: tentative_g,
                idx: n_idx,
                tie,
            });
            tie += 1;
        }
    }

    outcome.steps = reconstruct(graph, &query.came_from, best.1);
    outcome
}
