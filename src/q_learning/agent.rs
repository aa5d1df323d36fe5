//! Tabular Q-learning agent with epsilon-greedy action selection.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    app::QLearningConfig,
    error::Result,
    game::GameState,
    ports::Agent,
    q_learning::{
        q_table::QTable,
        serialization::{AgentBlob, SavedAgent},
    },
    types::Coord,
};

/// Tabular Q-learning policy (off-policy TD control).
///
/// Owns its Q-table exclusively; the two seats of a self-play run never share
/// one. Exploration follows an epsilon-greedy schedule decayed
/// multiplicatively after every update, floored at the configured minimum.
#[derive(Debug, Clone)]
pub struct TabularAgent {
    q_table: QTable,
    epsilon: f64,
    epsilon_end: f64,
    epsilon_decay: f64,
    episode_count: u64,
    rng: StdRng,
}

impl TabularAgent {
    /// Create a new agent from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] when a hyperparameter
    /// is out of range.
    pub fn new(config: &QLearningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            q_table: QTable::new(config.learning_rate, config.discount_factor),
            epsilon: config.epsilon_start,
            epsilon_end: config.epsilon_end,
            epsilon_decay: config.epsilon_decay,
            episode_count: 0,
            rng: StdRng::from_rng(&mut rand::rng()),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Greedy selection with uniform tie-breaking among maximizers.
    ///
    /// First-seen-wins tie-breaking would bias early coordinates over
    /// millions of episodes, so every maximizer gets equal probability.
    fn select_greedy(&mut self, state: &GameState) -> Result<Coord> {
        if state.legal_moves.is_empty() {
            return Err(crate::Error::NoLegalMoves);
        }
        let best = self.q_table.best_actions(&state.key, &state.legal_moves);
        Ok(*best.choose(&mut self.rng).unwrap())
    }

    /// Decay epsilon multiplicatively, floored at the configured end value.
    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.epsilon_end);
    }

    pub(crate) fn export_state(&self) -> AgentBlob {
        AgentBlob {
            q_table: self.q_table.clone(),
            epsilon: self.epsilon,
            episode_count: self.episode_count,
        }
    }

    pub(crate) fn apply_state(&mut self, blob: AgentBlob) {
        self.q_table = blob.q_table;
        self.epsilon = blob.epsilon;
        self.episode_count = blob.episode_count;
    }
}

impl Agent for TabularAgent {
    fn act_training(&mut self, state: &GameState) -> Result<Coord> {
        if state.legal_moves.is_empty() {
            return Err(crate::Error::NoLegalMoves);
        }
        if self.rng.random::<f64>() < self.epsilon {
            // Explore: uniform over legal moves
            Ok(*state.legal_moves.choose(&mut self.rng).unwrap())
        } else {
            // Exploit: greedy over the current Q-estimates
            self.select_greedy(state)
        }
    }

    fn act_greedy(&mut self, state: &GameState) -> Result<Coord> {
        self.select_greedy(state)
    }

    fn learn(
        &mut self,
        state: &GameState,
        action: Coord,
        reward: f64,
        next_state: &GameState,
    ) -> Result<()> {
        self.q_table.update(
            state.key.clone(),
            action,
            reward,
            &next_state.key,
            &next_state.legal_moves,
            next_state.terminal,
        );
        self.decay_epsilon();
        Ok(())
    }

    fn export_blob(&self) -> Result<Vec<u8>> {
        SavedAgent::from_agent(self).to_bytes()
    }

    fn import_blob(&mut self, bytes: &[u8]) -> Result<()> {
        let saved = SavedAgent::from_bytes(bytes)?;
        self.apply_state(saved.into_state());
        Ok(())
    }

    fn increment_episode(&mut self) {
        self.episode_count += 1;
    }

    fn episode_count(&self) -> u64 {
        self.episode_count
    }

    fn epsilon(&self) -> f64 {
        self.epsilon
    }

    fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }
}
