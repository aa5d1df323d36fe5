//! Save → load round trips across the file store, including greedy-policy
//! equivalence of a reloaded agent.

use tempfile::TempDir;

use gomoku_rl::{
    Cell, Coord, Game, GameState, Player, StateKey, Trainer,
    adapters::MsgPackStore,
    app::{QLearningConfig, TrainerConfig},
    ports::{Agent, AgentStore},
    q_learning::TabularAgent,
};

fn agent_config() -> QLearningConfig {
    QLearningConfig::default().with_epsilon(0.8, 0.05, 0.995)
}

/// Train two seeded agents by self-play and return the X seat.
fn trained_x_agent() -> Box<dyn Agent> {
    let config = agent_config();
    let agent_x = TabularAgent::new(&config).unwrap().with_seed(21);
    let agent_o = TabularAgent::new(&config).unwrap().with_seed(22);

    let mut trainer = Trainer::new(
        Game::new(3).unwrap(),
        Box::new(agent_x),
        Box::new(agent_o),
        TrainerConfig::new(40).with_stats_interval(10),
    );
    trainer.train().unwrap();

    let (agent_x, _agent_o) = trainer.into_agents();
    agent_x
}

/// Rebuild a queryable state view from a stored 3x3 state key.
fn state_from_key(key: &StateKey) -> GameState {
    let cells: Vec<Cell> = key
        .as_str()
        .chars()
        .map(|c| Cell::from_char(c).unwrap())
        .collect();
    assert_eq!(cells.len(), 9);

    let legal_moves: Vec<Coord> = cells
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cell == Cell::Empty)
        .map(|(i, _)| Coord::new(i / 3, i % 3))
        .collect();

    GameState {
        key: key.clone(),
        current_player: Player::X,
        legal_moves,
        terminal: false,
        winner: None,
        draw: false,
    }
}

#[test]
fn file_roundtrip_preserves_table_epsilon_and_counter() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("agent_x.msgpack");
    let store = MsgPackStore::new();

    let trained = trained_x_agent();
    store.save(trained.as_ref(), &path).unwrap();

    let blob = trained.export_blob().unwrap();
    let mut direct = TabularAgent::new(&agent_config()).unwrap();
    direct.import_blob(&blob).unwrap();

    let mut reloaded = TabularAgent::new(&agent_config()).unwrap();
    store.load(&mut reloaded, &path).unwrap();

    assert_eq!(reloaded.q_table(), direct.q_table());
    assert!(!reloaded.q_table().is_empty());
    assert_eq!(reloaded.epsilon(), trained.epsilon());
    assert_eq!(reloaded.episode_count(), 40);
}

#[test]
fn reloaded_agent_replays_identical_greedy_choices() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("agent_x.msgpack");
    let store = MsgPackStore::new();

    let trained = trained_x_agent();
    store.save(trained.as_ref(), &path).unwrap();

    let mut original = TabularAgent::new(&agent_config()).unwrap();
    original.import_blob(&trained.export_blob().unwrap()).unwrap();
    let mut reloaded = TabularAgent::new(&agent_config()).unwrap();
    store.load(&mut reloaded, &path).unwrap();

    // Same tables, same tie-break draws: greedy queries must agree on every
    // state the table has seen. act_greedy never explores, so epsilon is
    // irrelevant here.
    original.set_seed(4242);
    reloaded.set_seed(4242);

    let states = original.q_table().states();
    assert!(!states.is_empty());
    for key in states {
        let state = state_from_key(&key);
        if state.legal_moves.is_empty() {
            continue;
        }
        let expected = original.act_greedy(&state).unwrap();
        let actual = reloaded.act_greedy(&state).unwrap();
        assert_eq!(expected, actual, "divergent greedy choice in state {key}");
    }
}

#[test]
fn missing_file_is_absorbed_as_fresh_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("never_saved.msgpack");
    let store = MsgPackStore::new();

    let mut agent = TabularAgent::new(&agent_config()).unwrap();
    let result = store.load(&mut agent, &path);

    assert!(result.is_err());
    // The failed load left the agent at its freshly-constructed defaults.
    assert!(agent.q_table().is_empty());
    assert_eq!(agent.episode_count(), 0);
    assert_eq!(agent.epsilon(), 0.8);
}

#[test]
fn corrupt_file_is_rejected_without_mutation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("corrupt.msgpack");
    std::fs::write(&path, b"definitely not an agent blob").unwrap();

    let store = MsgPackStore::new();
    let mut agent = TabularAgent::new(&agent_config()).unwrap();
    let result = store.load(&mut agent, &path);

    assert!(result.is_err());
    assert!(agent.q_table().is_empty());
}
