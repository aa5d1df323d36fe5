//! MessagePack-on-disk implementation of the agent store port.

use std::{fs, path::Path};

use crate::{Result, error::Error, ports::{Agent, AgentStore}};

/// File-backed agent store using the agents' opaque MessagePack blobs.
///
/// A missing or corrupt file surfaces as an error from [`AgentStore::load`];
/// the agent is left untouched, so callers can log the failure and continue
/// training from fresh defaults.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use gomoku_rl::adapters::MsgPackStore;
/// use gomoku_rl::app::QLearningConfig;
/// use gomoku_rl::ports::AgentStore;
/// use gomoku_rl::q_learning::TabularAgent;
///
/// let store = MsgPackStore::new();
/// let mut agent = TabularAgent::new(&QLearningConfig::default())?;
///
/// if let Err(err) = store.load(&mut agent, Path::new("agent_x.msgpack")) {
///     eprintln!("starting from a fresh table: {err}");
/// }
/// # Ok::<(), gomoku_rl::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackStore;

impl MsgPackStore {
    pub fn new() -> Self {
        Self
    }
}

impl AgentStore for MsgPackStore {
    fn save(&self, agent: &dyn Agent, path: &Path) -> Result<()> {
        let bytes = agent.export_blob()?;
        fs::write(path, bytes).map_err(|source| Error::Io {
            operation: format!("write agent state to {path:?}"),
            source,
        })
    }

    fn load(&self, agent: &mut dyn Agent, path: &Path) -> Result<()> {
        let bytes = fs::read(path).map_err(|source| Error::Io {
            operation: format!("read agent state from {path:?}"),
            source,
        })?;
        agent.import_blob(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{app::QLearningConfig, game::Game, q_learning::TabularAgent, types::Coord};

    fn trained_agent() -> TabularAgent {
        let mut agent = TabularAgent::new(&QLearningConfig::default())
            .unwrap()
            .with_seed(5);
        let state = Game::new(3).unwrap().state();
        let mut terminal = state.clone();
        terminal.terminal = true;
        terminal.legal_moves.clear();
        agent
            .learn(&state, Coord::new(0, 0), 1.0, &terminal)
            .unwrap();
        agent
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("agent.msgpack");

        let store = MsgPackStore::new();
        let agent = trained_agent();
        store.save(&agent, &path).expect("Failed to save");

        let mut restored = TabularAgent::new(&QLearningConfig::default()).unwrap();
        store.load(&mut restored, &path).expect("Failed to load");

        assert_eq!(restored.q_table(), agent.q_table());
        assert_eq!(restored.epsilon(), agent.epsilon());
    }

    #[test]
    fn test_load_nonexistent_returns_error_and_preserves_agent() {
        let store = MsgPackStore::new();
        let mut agent = TabularAgent::new(&QLearningConfig::default()).unwrap();
        let result = store.load(&mut agent, Path::new("/tmp/nonexistent_12345.msgpack"));
        assert!(result.is_err());
        assert!(agent.q_table().is_empty());
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let store = MsgPackStore::new();
        let agent = trained_agent();
        let result = store.save(&agent, Path::new("/invalid_dir_12345/agent.msgpack"));
        assert!(result.is_err());
    }
}
