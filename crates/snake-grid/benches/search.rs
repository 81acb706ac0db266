use criterion::{black_box, criterion_group, criterion_main, Criterion};
use snake_core::Cell;
use snake_grid::{
    best_first, Heuristic, HeuristicKind, ObstacleGrid, SearchParams, SearchQuery, Topology,
};

fn maze(width: u32, height: u32, topology: Topology) -> ObstacleGrid {
    let mut grid = ObstacleGrid::new(width, height, topology).expect("grid");
    // Every fourth column is a wall with a gap alternating top/bottom.
    for x in (2..width as i32).step_by(4) {
        let gap = if (x / 4) % 2 == 0 { 0 } else { height as i32 - 1 };
        for y in 0..height as i32 {
            if y != gap {
                grid.add(Cell::new(x, y));
            }
        }
    }
    grid
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("snake-grid/best_first");
    let params = SearchParams {
        max_expansions: usize::MAX,
        caution: 0,
    };

    let bounded = maze(64, 64, Topology::Bounded);
    let h = Heuristic::new(HeuristicKind::Manhattan, &bounded, Cell::new(63, 63));
    let mut query = SearchQuery::default();
    group.bench_function("bounded_maze_reuse", |b| {
        b.iter(|| {
            let outcome = best_first(&bounded, Cell::new(0, 0), &h, params, &mut query);
            black_box(outcome.len());
        })
    });

    let torus = maze(64, 64, Topology::Periodic);
    let h = Heuristic::new(HeuristicKind::PeriodicEuclidean, &torus, Cell::new(33, 40));
    group.bench_function("periodic_maze_alloc", |b| {
        b.iter(|| {
            let mut query = SearchQuery::default();
            let outcome = best_first(&torus, Cell::new(0, 0), &h, params, &mut query);
            black_box(outcome.len());
        })
    });

    let cautious = SearchParams {
        max_expansions: usize::MAX,
        caution: 3,
    };
    group.bench_function("periodic_maze_cautious", |b| {
        b.iter(|| {
            let outcome = best_first(&torus, Cell::new(0, 0), &h, cautious, &mut query);
            black_box(outcome.len());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
