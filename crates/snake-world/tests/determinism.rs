use snake_agent::{OffensiveConfig, PathfindingConfig, Snake};
use snake_core::{AgentId, Cell, Direction};
use snake_grid::Topology;
use snake_world::{AgentKind, AgentSpec, World, WorldConfig};

fn busy_config(seed: u64) -> WorldConfig {
    let spec = |kind, x, y, direction, opponents: Vec<usize>| AgentSpec {
        kind,
        body: vec![Cell::new(x, y), Cell::new(x, y), Cell::new(x, y)],
        direction,
        opponents,
        ..AgentSpec::default()
    };
    WorldConfig {
        width: 16,
        height: 16,
        food: 4,
        respawn_cooldown: Some(3),
        topology: Topology::Periodic,
        seed,
        agents: vec![
            spec(AgentKind::Pathfinding, 2, 2, Direction::Right, vec![]),
            spec(AgentKind::Pathfinding, 12, 3, Direction::Left, vec![]),
            spec(AgentKind::Offensive, 8, 12, Direction::Up, vec![0, 1]),
            spec(AgentKind::Offensive, 3, 10, Direction::Down, vec![2]),
        ],
        ..WorldConfig::default()
    }
}

type Frame = (Vec<Vec<Cell>>, Vec<Cell>, Vec<AgentId>);

fn frames(seed: u64, ticks: usize) -> Vec<Frame> {
    let mut world = World::from_config(&busy_config(seed)).expect("world");
    (0..ticks)
        .map(|_| {
            let deaths = world.simulate().expect("tick");
            let bodies = world
                .agents()
                .iter()
                .map(|s| s.body().iter().copied().collect())
                .collect();
            let food = world.food().iter().copied().collect();
            (bodies, food, deaths)
        })
        .collect()
}

#[test]
fn same_seed_same_game() {
    assert_eq!(frames(11, 120), frames(11, 120));
}

#[test]
fn reset_replays_the_same_game() {
    let mut world = World::new(9, 9, Topology::Periodic, 5).expect("world").with_seed(3);
    for y in [1, 4, 7] {
        let snake = Snake::player([Cell::new(0, y), Cell::new(8, y)], Direction::Right).expect("snake");
        world.attach(snake).expect("attach");
    }
    world.reset();

    let run = |world: &mut World| -> Vec<(Vec<Cell>, Vec<(AgentId, u64)>)> {
        (0..60)
            .map(|_| {
                assert!(world.simulate().expect("tick").is_empty());
                (world.food().iter().copied().collect(), world.scores())
            })
            .collect()
    };
    let first = run(&mut world);
    world.reset();
    assert_eq!(run(&mut world), first);
}

#[test]
fn offensive_agent_aims_at_the_extrapolated_head() {
    let mut world = World::new(10, 10, Topology::Periodic, 0).expect("world");
    let prey = world
        .attach(Snake::player([Cell::new(1, 1)], Direction::Right).expect("snake"))
        .expect("attach");
    let hunter = world
        .attach(
            Snake::offensive(
                [Cell::new(8, 8)],
                Direction::Up,
                OffensiveConfig {
                    pathfinding: PathfindingConfig::default(),
                    attack_anticipation: 3,
                },
            )
            .expect("snake"),
        )
        .expect("attach");
    assert!(world.add_opponent(hunter, prey).expect("known agents"));
    assert!(!world.add_opponent(prey, hunter).expect("known agents"));

    world.simulate().expect("tick");

    // No interception fits the window and there is no food: pursue (4, 1).
    let inspect = world.agent(hunter).expect("agent").inspect();
    assert_eq!(inspect.last(), Some(&Cell::new(4, 1)));
}

#[test]
fn short_hunter_does_not_trade_heads_with_its_prey() {
    let mut world = World::new(10, 10, Topology::Periodic, 0).expect("world");
    let prey = world
        .attach(Snake::player([Cell::new(2, 5)], Direction::Right).expect("snake"))
        .expect("attach");
    let hunter = world
        .attach(
            Snake::offensive([Cell::new(5, 6)], Direction::Up, OffensiveConfig::default())
                .expect("snake"),
        )
        .expect("attach");
    assert!(world.add_opponent(hunter, prey).expect("known agents"));

    for tick in 0..10 {
        let deaths = world.simulate().expect("tick");
        assert!(deaths.is_empty(), "tick {tick}: {deaths:?}");
    }
    assert!(world.agent(hunter).expect("agent").is_alive());
    assert!(world.agent(prey).expect("agent").is_alive());
}
