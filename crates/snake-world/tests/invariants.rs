use proptest::prelude::*;
use snake_agent::{OffensiveConfig, PathfindingConfig, Snake};
use snake_core::{AgentId, Cell, Direction};
use snake_grid::{GridGraph, Topology};
use snake_world::World;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn topology() -> impl Strategy<Value = Topology> {
    prop_oneof![Just(Topology::Bounded), Just(Topology::Periodic)]
}

fn arena(topology: Topology, seed: u64) -> World {
    let mut world = World::new(10, 10, topology, 4)
        .expect("world")
        .with_seed(seed)
        .with_respawn_cooldown(Some(2));
    let players = [
        Snake::player([Cell::new(1, 1), Cell::new(0, 1)], Direction::Right),
        Snake::player([Cell::new(8, 8), Cell::new(9, 8)], Direction::Left),
    ];
    for snake in players {
        world.attach(snake.expect("snake")).expect("attach");
    }
    let hunter = Snake::offensive(
        [Cell::new(5, 2), Cell::new(5, 1), Cell::new(5, 0)],
        Direction::Down,
        OffensiveConfig {
            attack_anticipation: 5,
            ..OffensiveConfig::default()
        },
    )
    .expect("snake");
    let hunter = world.attach(hunter).expect("attach");
    world
        .attach(
            Snake::pathfinding([Cell::new(2, 7)], Direction::Up, PathfindingConfig::default())
                .expect("snake"),
        )
        .expect("attach");
    for prey in world.roster().alive().to_vec() {
        if prey != hunter {
            world.add_opponent(hunter, prey).expect("known agents");
        }
    }
    world.reset();
    world
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn occupancy_counts_every_live_segment(
        topology in topology(),
        seed in any::<u64>(),
        inputs in prop::collection::vec((0usize..2, direction()), 0..80),
    ) {
        let mut world = arena(topology, seed);
        let players = [AgentId(0), AgentId(1)];

        for (who, d) in inputs {
            world.add_request(players[who], d).expect("known agent");
            world.simulate().expect("tick");

            let live: u64 = world.alive_agents().map(|s| s.len() as u64).sum();
            prop_assert_eq!(world.grid().total(), live);
            for snake in world.alive_agents() {
                for &cell in snake.body() {
                    prop_assert!(world.grid().contains(cell));
                    prop_assert!(world.grid().obstacle_count(cell) >= snake.own_count(cell));
                }
            }
            for &food in world.food() {
                prop_assert!(world.grid().contains(food));
            }
            prop_assert!(world.food().len() <= 4);
            prop_assert_eq!(world.roster().len(), 4);
        }
    }

    #[test]
    fn alive_bodies_stay_connected(
        seed in any::<u64>(),
        inputs in prop::collection::vec((0usize..2, direction()), 0..60),
    ) {
        let mut world = arena(Topology::Periodic, seed);
        let players = [AgentId(0), AgentId(1)];

        for (who, d) in inputs {
            world.add_request(players[who], d).expect("known agent");
            world.simulate().expect("tick");
            for snake in world.alive_agents() {
                let body: Vec<Cell> = snake.body().iter().copied().collect();
                for pair in body.windows(2) {
                    // Coiled (respawned or grown) segments share a cell.
                    let adjacent = pair[0] == pair[1]
                        || world.grid().direction_between(pair[0], pair[1]).is_some();
                    prop_assert!(adjacent, "{:?} and {:?} are not neighbors", pair[0], pair[1]);
                }
            }
        }
    }
}
