//! Configuration types for agents and training runs.

use crate::{Error, Result};

/// Hyperparameters for a tabular Q-learning agent.
///
/// # Examples
///
/// ```
/// use gomoku_rl::app::QLearningConfig;
///
/// let config = QLearningConfig::default()
///     .with_learning_rate(0.2)
///     .with_epsilon(1.0, 0.05, 0.999);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QLearningConfig {
    /// Learning rate α, in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ, in [0, 1]
    pub discount_factor: f64,
    /// Initial exploration rate
    pub epsilon_start: f64,
    /// Exploration rate floor
    pub epsilon_end: f64,
    /// Multiplicative decay applied after every update, in (0, 1]
    pub epsilon_decay: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            epsilon_start: 1.0,
            epsilon_end: 0.1,
            epsilon_decay: 0.9995,
        }
    }
}

impl QLearningConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    /// Set the exploration schedule: start, floor, and per-update decay.
    pub fn with_epsilon(mut self, start: f64, end: f64, decay: f64) -> Self {
        self.epsilon_start = start;
        self.epsilon_end = end;
        self.epsilon_decay = decay;
        self
    }

    /// Check all hyperparameters against their valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("learning_rate {} must be in (0, 1]", self.learning_rate),
            });
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(Error::InvalidConfiguration {
                message: format!("discount_factor {} must be in [0, 1]", self.discount_factor),
            });
        }
        if !(0.0..=1.0).contains(&self.epsilon_start) {
            return Err(Error::InvalidConfiguration {
                message: format!("epsilon_start {} must be in [0, 1]", self.epsilon_start),
            });
        }
        if !(0.0..=self.epsilon_start).contains(&self.epsilon_end) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "epsilon_end {} must be in [0, epsilon_start]",
                    self.epsilon_end
                ),
            });
        }
        if !(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("epsilon_decay {} must be in (0, 1]", self.epsilon_decay),
            });
        }
        Ok(())
    }
}

/// Configuration for a self-play training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainerConfig {
    /// Number of training episodes
    pub episodes: usize,
    /// Flush running statistics every this many episodes
    pub stats_interval: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            stats_interval: 100,
        }
    }
}

impl TrainerConfig {
    pub fn new(episodes: usize) -> Self {
        Self {
            episodes,
            ..Self::default()
        }
    }

    pub fn with_stats_interval(mut self, stats_interval: usize) -> Self {
        self.stats_interval = stats_interval;
        self
    }
}
