//! Q-table implementation for tabular temporal difference learning.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Coord, StateKey};

/// Value returned for state-action pairs that have never been written.
///
/// Reads of absent entries do not create them; the table only grows on
/// [`QTable::set`]. This keeps iteration and serialization free of
/// accidentally materialized zero rows.
pub const UNSEEN_VALUE: f64 = 0.0;

/// Q-table mapping (state, action) pairs to value estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    /// Q-values: (state key, action coordinate) -> estimate
    q_values: HashMap<(StateKey, Coord), f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Get the estimate for a state-action pair, [`UNSEEN_VALUE`] if absent.
    pub fn get(&self, state: &StateKey, action: Coord) -> f64 {
        self.q_values
            .get(&(state.clone(), action))
            .copied()
            .unwrap_or(UNSEEN_VALUE)
    }

    /// Set the estimate for a state-action pair.
    pub fn set(&mut self, state: StateKey, action: Coord, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Maximum estimate over the given actions in a state.
    pub fn max_q(&self, state: &StateKey, actions: &[Coord]) -> f64 {
        actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// All actions attaining the maximum estimate in a state. Non-empty
    /// whenever `actions` is non-empty; the caller breaks ties.
    pub fn best_actions(&self, state: &StateKey, actions: &[Coord]) -> Vec<Coord> {
        let best = self.max_q(state, actions);
        actions
            .iter()
            .copied()
            .filter(|&action| self.get(state, action) == best)
            .collect()
    }

    /// One-step Q-learning update:
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The bootstrap term is forced to zero when the next state is terminal
    /// or offers no actions, so nothing bootstraps past episode end.
    pub fn update(
        &mut self,
        state: StateKey,
        action: Coord,
        reward: f64,
        next_state: &StateKey,
        next_actions: &[Coord],
        next_terminal: bool,
    ) {
        let current_q = self.get(&state, action);
        let max_next_q = if next_terminal || next_actions.is_empty() {
            0.0
        } else {
            self.max_q(next_state, next_actions)
        };
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state, action, new_q);
    }

    /// Total number of stored state-action entries.
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    /// Distinct state keys with at least one stored entry.
    pub fn states(&self) -> Vec<StateKey> {
        let mut states: Vec<StateKey> = self.q_values.keys().map(|(s, _)| s.clone()).collect();
        states.sort();
        states.dedup();
        states
    }
}
