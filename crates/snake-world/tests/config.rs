#![cfg(feature = "serde")]

use snake_agent::{PlanState, DEFAULT_ATTACK_ANTICIPATION};
use snake_core::{AgentId, Cell, Direction};
use snake_grid::{HeuristicKind, Topology};
use snake_world::{AgentKind, AgentSpec, World, WorldConfig, WorldError};

const ARENA: &str = r#"
width: 12
height: 10
food: 3
respawn_cooldown: 4
topology: periodic
seed: 7
agents:
  - kind: player
    body: [{x: 2, y: 2}, {x: 1, y: 2}]
    direction: right
  - kind: pathfinding
    body: [{x: 8, y: 8}]
    direction: up
    pathfinding:
      heuristic: periodic_euclidean
      latency: 1
  - kind: offensive
    body: [{x: 5, y: 1}, {x: 6, y: 1}]
    direction: left
    attack_anticipation: 6
    pathfinding:
      caution: 2
    opponents: [0, 1]
  - kind: player
    body: [{x: 0, y: 9}]
    alive: false
"#;

#[test]
fn yaml_arena_loads_with_defaults() {
    let config = WorldConfig::from_yaml_str(ARENA).expect("parse");

    assert_eq!((config.width, config.height), (12, 10));
    assert_eq!(config.respawn_cooldown, Some(4));
    assert_eq!(config.topology, Topology::Periodic);
    assert_eq!(config.agents.len(), 4);

    let pathfinding = &config.agents[1];
    assert_eq!(pathfinding.kind, AgentKind::Pathfinding);
    assert_eq!(pathfinding.pathfinding.latency, 1);
    assert_eq!(pathfinding.attack_anticipation, DEFAULT_ATTACK_ANTICIPATION);

    let offensive = &config.agents[2];
    assert_eq!(offensive.pathfinding.caution, 2);
    assert_eq!(offensive.pathfinding.heuristic, HeuristicKind::PeriodicEuclidean);
    assert_eq!(offensive.opponents, vec![0, 1]);

    let late = &config.agents[3];
    assert!(!late.alive);
    assert_eq!(late.direction, Direction::Right);
}

#[test]
fn world_from_config_attaches_in_order() {
    let config = WorldConfig::from_yaml_str(ARENA).expect("parse");
    let mut world = World::from_config(&config).expect("world");

    assert_eq!(world.agents().len(), 4);
    assert_eq!(world.roster().alive(), &[AgentId(0), AgentId(1), AgentId(2)]);
    assert_eq!(world.roster().dead().collect::<Vec<_>>(), vec![AgentId(3)]);
    assert_eq!(world.food().len(), 3);
    assert_eq!(world.grid().total(), 5);

    world.simulate().expect("tick");
    let offensive = world.agent(AgentId(2)).expect("agent");
    assert!(offensive.plan_state().is_some_and(|s| s != PlanState::Idle));
    assert!(world.agent(AgentId(0)).expect("agent").plan_state().is_none());
}

#[test]
fn unknown_opponents_are_rejected() {
    let config = WorldConfig {
        agents: vec![AgentSpec {
            kind: AgentKind::Offensive,
            body: vec![Cell::new(1, 1)],
            opponents: vec![3],
            ..AgentSpec::default()
        }],
        ..WorldConfig::default()
    };
    assert!(matches!(
        World::from_config(&config),
        Err(WorldError::UnknownOpponent { agent: 0, opponent: 3, count: 1 })
    ));
}

#[test]
fn empty_bodies_and_grids_are_rejected() {
    let config = WorldConfig {
        agents: vec![AgentSpec::default()],
        ..WorldConfig::default()
    };
    assert!(matches!(World::from_config(&config), Err(WorldError::Core(_))));

    let config = WorldConfig {
        width: 0,
        ..WorldConfig::default()
    };
    assert!(matches!(World::from_config(&config), Err(WorldError::Core(_))));
}

#[test]
fn malformed_yaml_is_an_error() {
    assert!(matches!(
        WorldConfig::from_yaml_str("width: [1, 2]"),
        Err(WorldError::Yaml(_))
    ));
}

#[test]
fn config_round_trips_through_json() {
    let config = WorldConfig::from_yaml_str(ARENA).expect("parse");
    let json = serde_json::to_string(&config).expect("serialize");
    let back: WorldConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
}
