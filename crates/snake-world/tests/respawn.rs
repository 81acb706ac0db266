use snake_agent::Snake;
use snake_core::{toward_center, Cell, Direction};
use snake_grid::{GridGraph, Topology};
use snake_tools::{tags, VecTraceSink};
use snake_world::World;

fn player(body: &[(i32, i32)], direction: Direction) -> Snake {
    Snake::player(body.iter().copied().map(Cell::from), direction).expect("snake")
}

#[test]
fn dead_agents_respawn_first_in_first_out() {
    let mut world = World::new(10, 10, Topology::Periodic, 0)
        .expect("world")
        .with_respawn_cooldown(Some(2));
    let first = world.attach(player(&[(1, 1)], Direction::Right)).expect("attach");
    let second = world.attach(player(&[(5, 5)], Direction::Right)).expect("attach");
    let bystander = world.attach(player(&[(0, 8)], Direction::Up)).expect("attach");
    world.reset();
    world.add_obstacle(Cell::new(2, 1)).expect("obstacle");
    world.add_obstacle(Cell::new(7, 5)).expect("obstacle");

    let mut sink = VecTraceSink::default();
    assert_eq!(world.simulate_traced(&mut sink).expect("tick"), vec![first]);
    assert_eq!(world.simulate_traced(&mut sink).expect("tick"), vec![second]);
    assert!(world.discard_obstacle(Cell::new(2, 1)));
    assert!(world.discard_obstacle(Cell::new(7, 5)));
    assert_eq!(world.respawn_cooldown(), Some(0));

    world.simulate_traced(&mut sink).expect("tick");
    assert!(world.agent(first).expect("agent").is_alive());
    assert_eq!(world.roster().dead().collect::<Vec<_>>(), vec![second]);
    assert_eq!(world.respawn_cooldown(), Some(2));

    for _ in 0..3 {
        world.simulate_traced(&mut sink).expect("tick");
    }
    let respawned: Vec<_> = sink
        .with_tag(tags::AGENT_RESPAWNED)
        .filter_map(|e| e.agent)
        .collect();
    assert_eq!(&respawned[..2], &[first, second]);
    assert!(world.agent(bystander).expect("agent").is_alive());
}

#[test]
fn respawn_lands_on_the_furthest_cell_facing_the_center() {
    let mut world = World::new(9, 9, Topology::Periodic, 0)
        .expect("world")
        .with_respawn_cooldown(Some(0));
    let dead = world
        .attach(player(&[(4, 4), (4, 5), (4, 6)], Direction::Up).with_alive(false))
        .expect("attach");
    world.attach(player(&[(0, 0)], Direction::Down)).expect("attach");
    world.reset();

    world.simulate().expect("tick");
    let snake = world.agent(dead).expect("agent");
    assert!(snake.is_alive());
    assert_eq!(snake.len(), 3);

    let spawn = snake.head();
    assert!(snake.body().iter().all(|&c| c == spawn));
    assert_eq!(snake.direction(), toward_center(spawn, 9, 9));
    assert_eq!(world.grid().obstacle_count(spawn), 3);
}

#[test]
fn spawn_cell_avoids_bodies_and_edge_midpoints() {
    let mut world = World::new(9, 9, Topology::Bounded, 0).expect("world");
    world.attach(player(&[(4, 4)], Direction::Up)).expect("attach");

    let spawn = world.spawn_cell().expect("free spawn cell");
    // Repellents: the body plus (4,0), (4,8), (0,4), (8,4). Several cells sit
    // 4 steps away; the first in row-major order wins.
    assert_eq!(spawn, Cell::new(0, 0));
}

#[test]
fn respawn_never_happens_without_cooldown() {
    let mut world = World::new(6, 6, Topology::Periodic, 0).expect("world");
    let id = world
        .attach(player(&[(1, 1)], Direction::Up).with_alive(false))
        .expect("attach");
    world.reset();

    for _ in 0..5 {
        world.simulate().expect("tick");
    }
    assert!(!world.agent(id).expect("agent").is_alive());
    assert_eq!(world.respawn_cooldown(), None);
}

#[test]
fn reset_keeps_dead_agents_queued() {
    let mut world = World::new(6, 6, Topology::Periodic, 2)
        .expect("world")
        .with_respawn_cooldown(Some(3));
    let alive = world.attach(player(&[(1, 1), (0, 1)], Direction::Right)).expect("attach");
    let dead = world
        .attach(player(&[(4, 4)], Direction::Up).with_alive(false))
        .expect("attach");
    world.simulate().expect("tick");

    world.reset();

    assert_eq!(world.tick(), 0);
    assert_eq!(world.roster().alive(), &[alive]);
    assert_eq!(world.roster().dead().collect::<Vec<_>>(), vec![dead]);
    assert_eq!(
        world.agent(alive).expect("agent").body().iter().copied().collect::<Vec<_>>(),
        vec![Cell::new(1, 1), Cell::new(0, 1)]
    );
    assert_eq!(world.grid().total(), 2);
    assert_eq!(world.food().len(), 2);
    assert_eq!(world.respawn_cooldown(), Some(3));
}
